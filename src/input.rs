//! Input adapter
//!
//! Keyboard keys, the on-screen d-pad and the virtual joystick all write into
//! one small `InputSignal`. The driver reads it once per tick. Pause and
//! reset are discrete actions dispatched when they happen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Knob radius of the virtual joystick (px)
pub const JOYSTICK_KNOB_RADIUS: f32 = 20.0;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    /// Pause or resume
    TogglePause,
    /// Start a fresh session regardless of status
    Reset,
    /// Start a fresh session only when the current one is not being played
    Restart,
}

/// What a keyboard key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Move(Direction),
    Action(InputAction),
}

/// Map a DOM-style key name to its binding (case-insensitive)
pub fn key_binding(key: &str) -> Option<KeyBinding> {
    let binding = match key.to_lowercase().as_str() {
        "w" | "arrowup" => KeyBinding::Move(Direction::Up),
        "s" | "arrowdown" => KeyBinding::Move(Direction::Down),
        "a" | "arrowleft" => KeyBinding::Move(Direction::Left),
        "d" | "arrowright" => KeyBinding::Move(Direction::Right),
        " " | "space" => KeyBinding::Action(InputAction::TogglePause),
        "r" => KeyBinding::Action(InputAction::Restart),
        _ => return None,
    };
    Some(binding)
}

/// Normalize a joystick drag (px from the pad center) into the unit disc.
/// `size` is the pad diameter; the knob travels `size / 2 - knob radius`.
pub fn joystick_vector(delta: Vec2, size: f32) -> Vec2 {
    let max_distance = size / 2.0 - JOYSTICK_KNOB_RADIUS;
    if max_distance <= 0.0 || !delta.is_finite() {
        return Vec2::ZERO;
    }
    delta.clamp_length_max(max_distance) / max_distance
}

/// Held directions plus the analog stick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSignal {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Joystick vector, each component in [-1, 1]
    pub axis: Vec2,
}

impl InputSignal {
    /// Hold or release a direction (keyboard or d-pad)
    pub fn press(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    /// Set the analog stick; non-finite values count as released
    pub fn set_axis(&mut self, axis: Vec2) {
        self.axis = if axis.is_finite() {
            axis.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        };
    }

    /// Release everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Combined direction. Opposing keys cancel; keys and stick add up and
    /// each component is clamped to [-1, 1].
    pub fn direction(&self) -> Vec2 {
        let keys = Vec2::new(
            f32::from(u8::from(self.right)) - f32::from(u8::from(self.left)),
            f32::from(u8::from(self.down)) - f32::from(u8::from(self.up)),
        );
        (keys + self.axis).clamp(Vec2::NEG_ONE, Vec2::ONE)
    }

    pub fn to_tick_input(&self) -> TickInput {
        TickInput::new(self.direction())
    }
}
