//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time passed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (combatant list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{check_collision, distance, normalize};
pub use progression::apply_level_up;
pub use state::{
    ActiveWeapon, Combatant, EntityId, ExperienceOrb, GameStatus, HealthItem, Role, Wander, World,
};
pub use tick::{TickInput, tick, tick_with_rng};
