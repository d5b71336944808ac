//! Canvas render pass
//!
//! Reads the game state and paints one frame. The only state it keeps is the
//! background scroll offset.

pub mod canvas;

pub use canvas::{Canvas, Color, DrawCall, Frame, RecordingCanvas};

use crate::assets::{AssetId, AssetRegistry};
use crate::consts::BACKGROUND_SCROLL;
use crate::sim::{Aabb, GamePhase, GameState};

/// Paints frames and scrolls the background
#[derive(Debug, Default)]
pub struct Renderer {
    background_x: f32,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current horizontal background offset (≤ 0)
    pub fn background_offset(&self) -> f32 {
        self.background_x
    }

    /// Draw the full frame for `state`
    pub fn render(&mut self, state: &GameState, assets: &AssetRegistry, canvas: &mut dyn Canvas) {
        let width = state.viewport.width;
        let height = state.viewport.height;
        let mut frame = Frame::new(canvas, assets);

        frame.canvas().clear(width, height);
        self.draw_background(&mut frame, state);

        state.player.draw(&mut frame);
        for enemy in &state.enemies {
            enemy.draw(&mut frame);
        }
        for proj in &state.projectiles {
            proj.draw(&mut frame);
        }
        for coin in &state.collectibles {
            coin.draw(&mut frame);
        }

        draw_hud(&mut frame, state);

        match state.phase {
            GamePhase::Title => draw_title(&mut frame, state),
            GamePhase::GameOver => draw_game_over(&mut frame, state),
            GamePhase::Running => {}
        }
    }

    /// Two side-by-side copies scrolled left, or a flat fill
    fn draw_background(&mut self, frame: &mut Frame<'_>, state: &GameState) {
        let width = state.viewport.width;
        let height = state.viewport.height;

        if frame.is_ready(AssetId::Background) {
            frame.blit(
                AssetId::Background,
                Aabb::new(self.background_x, 0.0, width, height),
            );
            frame.blit(
                AssetId::Background,
                Aabb::new(self.background_x + width, 0.0, width, height),
            );
        } else {
            frame
                .canvas()
                .fill_rect(Aabb::new(0.0, 0.0, width, height), Color::SKY);
        }

        self.background_x -= BACKGROUND_SCROLL * state.viewport.scale.x;
        if self.background_x <= -width {
            self.background_x = 0.0;
        }
    }
}

fn draw_hud(frame: &mut Frame<'_>, state: &GameState) {
    let s = state.viewport.scale;
    let font = 20.0 * s.y;
    let canvas = frame.canvas();
    canvas.fill_text(
        &format!("Score: {}", state.score),
        10.0 * s.x,
        30.0 * s.y,
        font,
        Color::BLACK,
    );
    canvas.fill_text(
        &format!("Lives: {}", state.player.lives),
        10.0 * s.x,
        60.0 * s.y,
        font,
        Color::BLACK,
    );
}

fn shade(frame: &mut Frame<'_>, state: &GameState) {
    let rect = Aabb::new(0.0, 0.0, state.viewport.width, state.viewport.height);
    frame.canvas().fill_rect(rect, Color::SHADE);
}

fn draw_game_over(frame: &mut Frame<'_>, state: &GameState) {
    shade(frame, state);
    let s = state.viewport.scale;
    let cx = state.viewport.width / 2.0;
    let cy = state.viewport.height / 2.0;
    let canvas = frame.canvas();
    canvas.fill_text("Game Over", cx - 100.0 * s.x, cy, 48.0 * s.y, Color::WHITE);
    canvas.fill_text(
        &format!("Score: {}", state.score),
        cx - 50.0 * s.x,
        cy + 40.0 * s.y,
        24.0 * s.y,
        Color::WHITE,
    );
}

fn draw_title(frame: &mut Frame<'_>, state: &GameState) {
    shade(frame, state);
    let s = state.viewport.scale;
    let cx = state.viewport.width / 2.0;
    let cy = state.viewport.height / 2.0;
    let canvas = frame.canvas();
    canvas.fill_text("Orange Dynasty", cx - 160.0 * s.x, cy, 48.0 * s.y, Color::ORANGE);
    canvas.fill_text(
        "Press Start",
        cx - 60.0 * s.x,
        cy + 40.0 * s.y,
        24.0 * s.y,
        Color::WHITE,
    );
}
