//! Asset catalogue and load-state tracking
//!
//! Each asset moves through `Loading -> Ready | Failed` once. Draw and play
//! calls query the registry synchronously instead of poking the browser
//! objects for readiness.

use crate::error::GameError;

/// Every named image and sound the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Player,
    Enemy,
    Boss,
    PlayerProjectile,
    EnemyProjectile,
    Coin,
    Background,
    CoinSound,
    HitSound,
    DestroySound,
}

impl AssetId {
    pub const ALL: [AssetId; 10] = [
        AssetId::Player,
        AssetId::Enemy,
        AssetId::Boss,
        AssetId::PlayerProjectile,
        AssetId::EnemyProjectile,
        AssetId::Coin,
        AssetId::Background,
        AssetId::CoinSound,
        AssetId::HitSound,
        AssetId::DestroySound,
    ];

    pub const IMAGES: [AssetId; 7] = [
        AssetId::Player,
        AssetId::Enemy,
        AssetId::Boss,
        AssetId::PlayerProjectile,
        AssetId::EnemyProjectile,
        AssetId::Coin,
        AssetId::Background,
    ];

    pub const SOUNDS: [AssetId; 3] = [AssetId::CoinSound, AssetId::HitSound, AssetId::DestroySound];

    /// URL relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            AssetId::Player => "assets/player.png",
            AssetId::Enemy => "assets/enemy1.png",
            AssetId::Boss => "assets/boss.png",
            AssetId::PlayerProjectile => "assets/projectile_player.png",
            AssetId::EnemyProjectile => "assets/projectile_enemy.png",
            AssetId::Coin => "assets/coin.png",
            AssetId::Background => "assets/background.png",
            AssetId::CoinSound => "assets/coin_collect.mp3",
            AssetId::HitSound => "assets/enemy_hit.mp3",
            AssetId::DestroySound => "assets/enemy_destroy.mp3",
        }
    }

    pub fn is_sound(&self) -> bool {
        matches!(
            self,
            AssetId::CoinSound | AssetId::HitSound | AssetId::DestroySound
        )
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Load state of a single asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetState {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Load state of every asset, indexed by `AssetId`
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    states: [AssetState; AssetId::ALL.len()],
}

impl AssetRegistry {
    /// A registry with everything still loading
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with everything ready (headless runs, tests)
    pub fn all_ready() -> Self {
        Self {
            states: [AssetState::Ready; AssetId::ALL.len()],
        }
    }

    pub fn state(&self, id: AssetId) -> AssetState {
        self.states[id.index()]
    }

    pub fn is_ready(&self, id: AssetId) -> bool {
        self.state(id) == AssetState::Ready
    }

    /// Completion notification. Ignored once the asset has settled.
    pub fn mark_ready(&mut self, id: AssetId) {
        if self.state(id) == AssetState::Loading {
            self.states[id.index()] = AssetState::Ready;
            log::debug!("Asset ready: {}", id.path());
        }
    }

    /// Error notification. Ignored once the asset has settled.
    pub fn mark_failed(&mut self, id: AssetId) -> Option<GameError> {
        if self.state(id) != AssetState::Loading {
            return None;
        }
        self.states[id.index()] = AssetState::Failed;
        let err = GameError::AssetLoad {
            asset: id,
            path: id.path(),
        };
        log::warn!("{err}");
        Some(err)
    }

    /// Assets still waiting on a notification
    pub fn pending(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == AssetState::Loading)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_loading() {
        let reg = AssetRegistry::new();
        assert_eq!(reg.pending(), AssetId::ALL.len());
        assert!(!reg.is_ready(AssetId::Player));
    }

    #[test]
    fn test_ready_and_failed_transitions() {
        let mut reg = AssetRegistry::new();
        reg.mark_ready(AssetId::Coin);
        let err = reg.mark_failed(AssetId::Background);

        assert!(reg.is_ready(AssetId::Coin));
        assert_eq!(reg.state(AssetId::Background), AssetState::Failed);
        assert!(matches!(
            err,
            Some(GameError::AssetLoad {
                asset: AssetId::Background,
                ..
            })
        ));
        assert_eq!(reg.pending(), AssetId::ALL.len() - 2);
    }

    #[test]
    fn test_settled_state_is_final() {
        let mut reg = AssetRegistry::new();
        reg.mark_failed(AssetId::Boss);
        reg.mark_ready(AssetId::Boss);
        assert_eq!(reg.state(AssetId::Boss), AssetState::Failed);

        reg.mark_ready(AssetId::Enemy);
        assert!(reg.mark_failed(AssetId::Enemy).is_none());
        assert!(reg.is_ready(AssetId::Enemy));
    }

    #[test]
    fn test_images_and_sounds_partition_catalogue() {
        assert_eq!(AssetId::IMAGES.len() + AssetId::SOUNDS.len(), AssetId::ALL.len());
        assert!(AssetId::SOUNDS.iter().all(|id| id.is_sound()));
        assert!(AssetId::IMAGES.iter().all(|id| !id.is_sound()));
    }
}
