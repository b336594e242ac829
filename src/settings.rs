//! Player preferences
//!
//! Persisted in LocalStorage on the web; natively the defaults are used.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::joystick_vector;

/// How movement is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// WASD / arrow keys
    #[default]
    Keyboard,
    /// On-screen d-pad
    Buttons,
    /// On-screen analog stick
    Joystick,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Keyboard => "Keyboard",
            ControlScheme::Buttons => "Buttons",
            ControlScheme::Joystick => "Joystick",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" | "keys" => Some(ControlScheme::Keyboard),
            "buttons" | "dpad" => Some(ControlScheme::Buttons),
            "joystick" | "stick" => Some(ControlScheme::Joystick),
            _ => None,
        }
    }

    /// Whether on-screen controls are drawn
    pub fn shows_touch_controls(&self) -> bool {
        !matches!(self, ControlScheme::Keyboard)
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_scheme: ControlScheme,
    /// Joystick pad diameter (px)
    pub joystick_size: f32,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::Keyboard,
            joystick_size: 120.0,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "orbit_survivor_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Joystick drag in pixels to a movement axis for this pad size
    pub fn joystick_axis(&self, delta: Vec2) -> Vec2 {
        joystick_vector(delta, self.joystick_size)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Ignoring unreadable settings: {}", err),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("Settings storage {} unavailable natively", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
