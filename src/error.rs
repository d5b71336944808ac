//! Error types
//!
//! Nothing here is fatal to a running game: callers log and fall back.

use thiserror::Error;

use crate::assets::AssetId;

/// Errors surfaced by configuration, asset loading and the browser glue
#[derive(Debug, Error)]
pub enum GameError {
    /// Tuning JSON could not be parsed
    #[error("invalid tuning json: {0}")]
    TuningParse(#[from] serde_json::Error),

    /// Tuning parsed but holds an unusable value
    #[error("invalid tuning value `{field}`: {reason}")]
    TuningValue {
        field: &'static str,
        reason: &'static str,
    },

    /// An image or sound failed to load
    #[error("failed to load asset {asset:?} from {path}")]
    AssetLoad { asset: AssetId, path: &'static str },

    /// A browser API call failed
    #[error("platform error: {0}")]
    Platform(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Platform(format!("{value:?}"))
    }
}
