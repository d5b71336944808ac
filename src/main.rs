//! Orange Dynasty entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use glam::Vec2;
    use orange_dynasty::assets::{AssetId, AssetRegistry};
    use orange_dynasty::audio::{AudioManager, SoundEffect};
    use orange_dynasty::consts::TICK_MS;
    use orange_dynasty::input::{Control, InputAdapter};
    use orange_dynasty::platform::FrameClock;
    use orange_dynasty::platform::web::{self, WebCanvas, listen};
    use orange_dynasty::renderer::Renderer;
    use orange_dynasty::sim::{GameState, tick};
    use orange_dynasty::{GameError, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        surface: WebCanvas,
        input: InputAdapter,
        assets: Rc<RefCell<AssetRegistry>>,
        audio: AudioManager,
        clock: FrameClock,
    }

    impl Game {
        /// Run due simulation ticks, then draw and play effects
        fn frame(&mut self, time: f64) {
            let steps = self.clock.advance(time);
            for _ in 0..steps {
                self.state.advance_clock(TICK_MS);
                let controls = self.input.snapshot();
                tick(&mut self.state, &controls);
            }

            let assets = self.assets.borrow();
            self.renderer
                .render(&self.state, &assets, &mut self.surface);

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect, &assets);
                }
            }
        }

        fn start(&mut self) {
            self.audio.resume();
            self.state.start();
        }

        fn restart(&mut self) {
            self.audio.resume();
            self.input.release_all();
            self.clock.reset();
            self.state.restart();
        }
    }

    pub fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Orange Dynasty starting...");

        let canvas: HtmlCanvasElement = web::element("gameCanvas")?;
        let viewport = web::fit_canvas(&canvas)?;
        let tuning = Tuning::load();

        let assets = Rc::new(RefCell::new(AssetRegistry::new()));
        let mut surface = WebCanvas::new(&canvas)?;
        for id in AssetId::IMAGES {
            surface.add_image(id, web::load_image(id, &assets)?);
        }
        let mut audio = AudioManager::new();
        for id in AssetId::SOUNDS {
            audio.add_clip(id, web::load_sound(id, &assets)?);
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, viewport, tuning),
            renderer: Renderer::new(),
            surface,
            input: InputAdapter::new(),
            assets,
            audio,
            clock: FrameClock::new(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone())?;
        setup_touch_buttons(game.clone())?;
        setup_pointer(&canvas, game.clone());
        setup_lifecycle_buttons(game.clone())?;
        setup_resize(canvas, game.clone())?;
        setup_visibility(game.clone())?;

        request_animation_frame(game);
        log::info!("Orange Dynasty running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;

        {
            let game = game.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if event.code() == "Enter" {
                    g.start();
                    return;
                }
                if g.input.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
        }
        {
            let game = game.clone();
            listen(&window, "keyup", move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
        }
        // Keys released while unfocused never send keyup
        listen(&window, "blur", move |_: Event| {
            game.borrow_mut().input.release_all();
        });
        Ok(())
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        let document = web::document()?;

        for id in Control::BUTTON_IDS {
            let (Some(button), Some(control)) =
                (document.get_element_by_id(id), Control::from_button_id(id))
            else {
                log::debug!("No #{} button on page", id);
                continue;
            };

            for (event_name, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("touchcancel", false),
            ] {
                let game = game.clone();
                listen(&button, event_name, move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.button(control, pressed);
                });
            }
            for (event_name, pressed) in [
                ("mousedown", true),
                ("mouseup", false),
                ("mouseleave", false),
            ] {
                let game = game.clone();
                listen(&button, event_name, move |_: MouseEvent| {
                    game.borrow_mut().input.button(control, pressed);
                });
            }
        }
        Ok(())
    }

    /// Position of the first touch relative to the canvas
    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            (touch.client_x() as f64 - rect.left()) as f32,
            (touch.client_y() as f64 - rect.top()) as f32,
        ))
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse drag
        {
            let game = game.clone();
            listen(canvas, "mousedown", move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.pointer_down(pos);
            });
        }
        {
            let game = game.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.pointer_move(pos);
            });
        }
        for event_name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            listen(canvas, event_name, move |_: MouseEvent| {
                game.borrow_mut().input.pointer_up();
            });
        }

        // Touch drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().input.pointer_down(pos);
                }
            });
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().input.pointer_move(pos);
                }
            });
        }
        for event_name in ["touchend", "touchcancel"] {
            let game = game.clone();
            listen(canvas, event_name, move |_: TouchEvent| {
                game.borrow_mut().input.pointer_up();
            });
        }
    }

    fn setup_lifecycle_buttons(game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        let document = web::document()?;

        if let Some(btn) = document.get_element_by_id("start") {
            let game = game.clone();
            listen(&btn, "click", move |_: MouseEvent| {
                game.borrow_mut().start();
            });
        }

        if let Some(btn) = document.get_element_by_id("restart") {
            listen(&btn, "click", move |_: MouseEvent| {
                game.borrow_mut().restart();
            });
        }
        Ok(())
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;
        listen(&window, "resize", move |_: Event| match web::fit_canvas(&canvas) {
            Ok(viewport) => game.borrow_mut().state.resize(viewport),
            Err(e) => log::warn!("Resize failed: {}", e),
        });
        Ok(())
    }

    /// Hidden tabs get no frames; drop held input and the stale timestamp
    fn setup_visibility(game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        let document = web::document()?;
        let doc = document.clone();
        listen(&document, "visibilitychange", move |_: Event| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            g.clock.reset();
            log::debug!("Visibility changed (hidden: {})", doc.hidden());
        });
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orange Dynasty (native) starting...");
    log::info!("Native mode runs a headless simulation - use `trunk serve` for the web version");

    headless_run(0x0D1E_5EED, 36_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted session without a browser and log a summary
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, max_ticks: u64) {
    use orange_dynasty::assets::AssetRegistry;
    use orange_dynasty::audio::SoundEffect;
    use orange_dynasty::consts::TICK_MS;
    use orange_dynasty::input::ControlState;
    use orange_dynasty::renderer::{RecordingCanvas, Renderer};
    use orange_dynasty::sim::{GamePhase, GameState, tick};
    use orange_dynasty::{Tuning, Viewport};

    let mut state = GameState::new(seed, Viewport::base(), Tuning::load());
    let mut renderer = Renderer::new();
    let assets = AssetRegistry::all_ready();
    let mut sounds = 0usize;
    let mut draw_calls = 0usize;

    state.start();
    for t in 0..max_ticks {
        // Sweep up and down while firing
        let sweep_up = (t / 120) % 2 == 0;
        let controls = ControlState {
            up: sweep_up,
            down: !sweep_up,
            shoot: true,
            ..Default::default()
        };
        state.advance_clock(TICK_MS);
        tick(&mut state, &controls);

        let mut canvas = RecordingCanvas::new();
        renderer.render(&state, &assets, &mut canvas);
        draw_calls += canvas.calls.len();

        sounds += state
            .drain_events()
            .into_iter()
            .filter_map(SoundEffect::for_event)
            .count();

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Headless run: {} ticks, score {}, lives {}, phase {:?}, {} sounds, {} draw calls",
        state.time_ticks,
        state.score,
        state.player.lives,
        state.phase,
        sounds,
        draw_calls
    );
}
