//! Input adapter
//!
//! Keyboard keys, on-screen touch buttons and pointer drags are all folded
//! into one `ControlState`. Held controls stay set until released; drag
//! deltas accumulate between ticks and are consumed by `snapshot`.

use glam::Vec2;

/// A discrete control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Shoot,
}

impl Control {
    /// Map a `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Control::Left),
            "ArrowRight" | "KeyD" => Some(Control::Right),
            "ArrowUp" | "KeyW" => Some(Control::Up),
            "ArrowDown" | "KeyS" => Some(Control::Down),
            "Space" => Some(Control::Shoot),
            _ => None,
        }
    }

    /// Map an on-screen touch button's element id
    pub fn from_button_id(id: &str) -> Option<Self> {
        match id {
            "left" => Some(Control::Left),
            "right" => Some(Control::Right),
            "up" => Some(Control::Up),
            "down" => Some(Control::Down),
            "shoot" => Some(Control::Shoot),
            _ => None,
        }
    }

    pub const BUTTON_IDS: [&'static str; 5] = ["left", "right", "up", "down", "shoot"];
}

/// Control state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    /// Pointer movement since the previous tick (canvas pixels)
    pub drag: Vec2,
}

/// Collects raw input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    // Keyboard and touch buttons are tracked separately so releasing one
    // source does not cancel the other.
    keys: ControlState,
    buttons: ControlState,
    drag: Vec2,
    pointer: Option<Vec2>,
}

fn set(state: &mut ControlState, control: Control, held: bool) {
    match control {
        Control::Left => state.left = held,
        Control::Right => state.right = held,
        Control::Up => state.up = held,
        Control::Down => state.down = held,
        Control::Shoot => state.shoot = held,
    }
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the key is a game control (callers suppress the default action)
    pub fn key_down(&mut self, code: &str) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                set(&mut self.keys, control, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                set(&mut self.keys, control, false);
                true
            }
            None => false,
        }
    }

    pub fn button(&mut self, control: Control, pressed: bool) {
        set(&mut self.buttons, control, pressed);
    }

    /// Pointer/touch contact began at a canvas position
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// Pointer moved; only counts while in contact
    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(last) = self.pointer {
            self.drag += pos - last;
            self.pointer = Some(pos);
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer = None;
    }

    /// Drop every held control (window blur, restart)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Current controls; consumes the accumulated drag
    pub fn snapshot(&mut self) -> ControlState {
        let k = &self.keys;
        let b = &self.buttons;
        ControlState {
            left: k.left || b.left,
            right: k.right || b.right,
            up: k.up || b.up,
            down: k.down || b.down,
            shoot: k.shoot || b.shoot,
            drag: std::mem::take(&mut self.drag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_hold_until_released() {
        let mut input = InputAdapter::new();
        assert!(input.key_down("ArrowLeft"));
        assert!(input.key_down("Space"));
        assert!(input.snapshot().left);
        assert!(input.snapshot().shoot);

        input.key_up("ArrowLeft");
        let s = input.snapshot();
        assert!(!s.left);
        assert!(s.shoot);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut input = InputAdapter::new();
        assert!(!input.key_down("KeyQ"));
        assert_eq!(input.snapshot(), ControlState::default());
    }

    #[test]
    fn test_touch_and_keyboard_share_shape() {
        let mut input = InputAdapter::new();
        input.button(Control::Up, true);
        input.key_down("KeyW");
        input.key_up("KeyW");
        // Touch button still held
        assert!(input.snapshot().up);

        input.button(Control::Up, false);
        assert!(!input.snapshot().up);
    }

    #[test]
    fn test_button_ids_round_trip() {
        for id in Control::BUTTON_IDS {
            assert!(Control::from_button_id(id).is_some());
        }
        assert_eq!(Control::from_button_id("restart"), None);
    }

    #[test]
    fn test_drag_accumulates_and_is_consumed() {
        let mut input = InputAdapter::new();
        input.pointer_move(Vec2::new(50.0, 50.0));
        assert_eq!(input.snapshot().drag, Vec2::ZERO);

        input.pointer_down(Vec2::new(10.0, 10.0));
        input.pointer_move(Vec2::new(15.0, 12.0));
        input.pointer_move(Vec2::new(20.0, 8.0));
        assert_eq!(input.snapshot().drag, Vec2::new(10.0, -2.0));
        assert_eq!(input.snapshot().drag, Vec2::ZERO);

        input.pointer_up();
        input.pointer_move(Vec2::new(100.0, 100.0));
        assert_eq!(input.snapshot().drag, Vec2::ZERO);
    }
}
