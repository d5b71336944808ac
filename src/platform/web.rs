//! Browser glue: the 2D canvas sink and asset loading

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, EventTarget, HtmlAudioElement, HtmlCanvasElement,
    HtmlImageElement,
};

use crate::Viewport;
use crate::assets::{AssetId, AssetRegistry};
use crate::error::GameError;
use crate::renderer::{Canvas, Color};
use crate::sim::Aabb;

pub fn document() -> Result<Document, GameError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GameError::Platform("no document".into()))
}

/// Look up an element by id and cast it
pub fn element<T: JsCast>(id: &str) -> Result<T, GameError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| GameError::Platform(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| GameError::Platform(format!("#{id} has the wrong element type")))
}

/// Size the canvas to the window and return the matching viewport
pub fn fit_canvas(canvas: &HtmlCanvasElement) -> Result<Viewport, GameError> {
    let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;
    let w = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
    let h = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;

    // fit() already rounds to whole pixels
    let viewport = Viewport::fit(w, h);
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
    Ok(viewport)
}

/// `Canvas` over a 2D rendering context
pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
    images: Vec<(AssetId, HtmlImageElement)>,
}

impl WebCanvas {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, GameError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| GameError::Platform("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Platform("unexpected context type".into()))?;
        Ok(Self {
            ctx,
            images: Vec::new(),
        })
    }

    pub fn add_image(&mut self, id: AssetId, image: HtmlImageElement) {
        self.images.push((id, image));
    }
}

impl Canvas for WebCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_image(&mut self, image: AssetId, rect: Aabb) {
        let Some((_, element)) = self.images.iter().find(|(id, _)| *id == image) else {
            return;
        };
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            element,
            rect.min.x as f64,
            rect.min.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        ) {
            log::debug!("drawImage {:?} failed: {:?}", image, e);
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, color: Color) {
        self.ctx.set_font(&format!("{}px Arial", font_px.round()));
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

/// Attach a listener for the page's lifetime
pub fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn settle(target: &EventTarget, ok_event: &str, id: AssetId, assets: &Rc<RefCell<AssetRegistry>>) {
    {
        let assets = assets.clone();
        listen(target, ok_event, move |_: Event| assets.borrow_mut().mark_ready(id));
    }
    {
        let assets = assets.clone();
        listen(target, "error", move |_: Event| {
            let _ = assets.borrow_mut().mark_failed(id);
        });
    }
}

/// Start loading an image; the registry is updated when it settles
pub fn load_image(
    id: AssetId,
    assets: &Rc<RefCell<AssetRegistry>>,
) -> Result<HtmlImageElement, GameError> {
    let image = HtmlImageElement::new()?;
    settle(&image, "load", id, assets);
    image.set_src(id.path());
    Ok(image)
}

/// Start loading a sound clip; the registry is updated when it settles
pub fn load_sound(
    id: AssetId,
    assets: &Rc<RefCell<AssetRegistry>>,
) -> Result<HtmlAudioElement, GameError> {
    let audio = HtmlAudioElement::new()?;
    settle(&audio, "canplaythrough", id, assets);
    audio.set_preload("auto");
    audio.set_src(id.path());
    Ok(audio)
}
