//! Drawing sink abstraction
//!
//! The render pass talks to a `Canvas`; the browser build implements it over
//! `CanvasRenderingContext2d`, tests and the headless binary record calls.

use crate::assets::{AssetId, AssetRegistry};
use crate::sim::Aabb;

/// RGBA colour, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Dims the playfield behind end-of-run and title text
    pub const SHADE: Color = Color::rgba(0, 0, 0, 0.5);
    /// Flat fill when the background image is unavailable
    pub const SKY: Color = Color::rgb(0x1b, 0x26, 0x3b);
    pub const ORANGE: Color = Color::rgb(0xff, 0x8c, 0x1a);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS colour string for `fillStyle`
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Output sink for one frame of drawing
pub trait Canvas {
    /// Wipe the whole drawable area
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Aabb, color: Color);
    /// Draw a loaded image stretched over `rect`
    fn draw_image(&mut self, image: AssetId, rect: Aabb);
    /// Draw text with its baseline at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, color: Color);
}

/// A canvas plus the asset states needed to decide what can be drawn
pub struct Frame<'a> {
    canvas: &'a mut dyn Canvas,
    assets: &'a AssetRegistry,
}

impl<'a> Frame<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, assets: &'a AssetRegistry) -> Self {
        Self { canvas, assets }
    }

    /// Draw an image if it is loaded. Returns whether anything was drawn.
    pub fn blit(&mut self, image: AssetId, rect: Aabb) -> bool {
        if !self.assets.is_ready(image) {
            return false;
        }
        self.canvas.draw_image(image, rect);
        true
    }

    pub fn is_ready(&self, image: AssetId) -> bool {
        self.assets.is_ready(image)
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect(Aabb, Color),
    Image(AssetId, Aabb),
    Text(String),
}

/// Canvas that only records what was asked of it
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> Vec<AssetId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn draw_image(&mut self, image: AssetId, rect: Aabb) {
        self.calls.push(DrawCall::Image(image, rect));
    }

    fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _font_px: f32, _color: Color) {
        self.calls.push(DrawCall::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_strings() {
        assert_eq!(Color::WHITE.to_css(), "rgb(255,255,255)");
        assert_eq!(Color::SHADE.to_css(), "rgba(0,0,0,0.5)");
    }

    #[test]
    fn test_blit_skips_unready_images() {
        let mut assets = AssetRegistry::new();
        assets.mark_ready(AssetId::Coin);
        assets.mark_failed(AssetId::Boss);
        let mut canvas = RecordingCanvas::new();
        let rect = Aabb::new(0.0, 0.0, 10.0, 10.0);

        {
            let mut frame = Frame::new(&mut canvas, &assets);
            assert!(frame.blit(AssetId::Coin, rect));
            assert!(!frame.blit(AssetId::Boss, rect));
            assert!(!frame.blit(AssetId::Player, rect));
        }

        assert_eq!(canvas.images(), vec![AssetId::Coin]);
    }
}
