//! Orbit Survivor - A top-down survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, AI, weapons, pickups, combat)
//! - `camera`: Viewport that follows the player inside the world
//! - `snapshot`: Read-only drawable frame for a renderer
//! - `hud`: UI counters projected from the simulation
//! - `input`: Keyboard / virtual button / joystick signal
//! - `driver`: Fixed-step game loop with pause, reset and teardown
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod camera;
pub mod driver;
pub mod hud;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use camera::Camera;
pub use driver::{FrameHandle, FrameScheduler, GameLoop};
pub use settings::{ControlScheme, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per animation frame at 60 Hz)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / TICK_RATE as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame delta fed to the accumulator (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Visible window onto the world
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Scrollable world
    pub const WORLD_WIDTH: f32 = 2500.0;
    pub const WORLD_HEIGHT: f32 = 2500.0;

    /// Combatant defaults
    pub const COMBATANT_RADIUS: f32 = 20.0;
    pub const INITIAL_HEALTH: u32 = 100;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const ENEMY_MIN_SPEED: f32 = 1.5;
    pub const ENEMY_MAX_SPEED: f32 = 2.5;
    pub const ENEMY_COUNT: usize = 10;

    /// Weapons orbit their owner
    pub const WEAPON_RADIUS: f32 = 8.0;
    pub const WEAPON_BASE_RANGE: f32 = 35.0;
    pub const WEAPON_RANGE_STEP: f32 = 8.0;
    pub const WEAPON_MAX_RANGE: f32 = 60.0;
    pub const WEAPON_MAX_COUNT: u32 = 6;
    /// Weapon rotation per tick (radians)
    pub const WEAPON_SPIN: f32 = 0.05;

    /// Combat
    pub const DAMAGE_AMOUNT: u32 = 25;
    /// Per-target invulnerability window (ms)
    pub const DAMAGE_COOLDOWN_MS: u64 = 1000;
    /// Score per kill, multiplied by the attacker's level
    pub const KILL_SCORE: u64 = 100;

    /// Progression
    pub const EXP_TO_LEVEL_UP: u32 = 10;
    pub const MAX_HEALTH_BOOST: u32 = 25;
    pub const HEALTH_BOOST_EVERY: u32 = 3;

    /// Experience orbs
    pub const EXP_ORB_RADIUS: f32 = 6.0;
    pub const EXP_ORB_VALUE: u32 = 1;
    pub const INITIAL_EXP_ORBS: usize = 80;
    pub const MAX_EXP_ORBS: usize = 100;
    pub const EXP_ORB_SPAWN_ATTEMPTS: usize = 5;
    pub const EXP_ORB_SPAWN_CHANCE: f64 = 0.05;

    /// Health items
    pub const HEALTH_ITEM_RADIUS: f32 = 8.0;
    pub const HEALTH_ITEM_HEAL: u32 = 30;
    pub const MAX_HEALTH_ITEMS: usize = 3;
    /// ~30 s average respawn at 60 Hz
    pub const HEALTH_ITEM_SPAWN_CHANCE: f64 = 0.001;

    /// Pickups never spawn closer than this to a world edge
    pub const ITEM_SPAWN_MARGIN: f32 = 20.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp a circle's center so the whole circle stays inside `[0, size]`
#[inline]
pub fn clamp_inside(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    pos.clamp(Vec2::splat(radius), size - Vec2::splat(radius))
}
