//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a session can be built
//! from a JSON table. Missing fields fall back to the built-in defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance table consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_size: Vec2,
    pub viewport_size: Vec2,

    // === Combatants ===
    pub combatant_radius: f32,
    pub initial_health: u32,
    pub player_speed: f32,
    pub enemy_count: usize,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    /// Enemies are placed inside this rectangle (world coordinates)
    pub enemy_spawn_min: Vec2,
    pub enemy_spawn_max: Vec2,
    /// Preferred minimum distance between a new enemy and the player
    pub enemy_min_separation: f32,
    pub enemy_spawn_attempts: u32,
    /// First wander deadline is `now + [min, max)` ms
    pub initial_wander_ms: (u64, u64),
    /// Later wander deadlines are `now + [min, max)` ms
    pub wander_interval_ms: (u64, u64),

    // === Weapons ===
    pub weapon_radius: f32,
    pub weapon_base_range: f32,
    pub weapon_range_step: f32,
    pub weapon_max_range: f32,
    pub weapon_max_count: u32,
    pub weapon_spin: f32,

    // === Combat ===
    pub damage: u32,
    pub damage_cooldown_ms: u64,
    pub kill_score: u64,

    // === Progression ===
    pub exp_to_level_up: u32,
    pub max_health_boost: u32,
    pub health_boost_every: u32,

    // === Pickups ===
    pub exp_orb_radius: f32,
    pub exp_orb_value: u32,
    pub initial_exp_orbs: usize,
    pub max_exp_orbs: usize,
    pub exp_orb_spawn_attempts: usize,
    pub exp_orb_spawn_chance: f64,
    pub health_item_radius: f32,
    pub health_item_heal: u32,
    pub initial_health_items: usize,
    pub max_health_items: usize,
    pub health_item_spawn_chance: f64,
    pub item_spawn_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            viewport_size: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),

            combatant_radius: COMBATANT_RADIUS,
            initial_health: INITIAL_HEALTH,
            player_speed: PLAYER_SPEED,
            enemy_count: ENEMY_COUNT,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_spawn_min: Vec2::new(50.0, 50.0),
            enemy_spawn_max: Vec2::new(VIEWPORT_WIDTH - 50.0, VIEWPORT_HEIGHT - 50.0),
            enemy_min_separation: 100.0,
            enemy_spawn_attempts: 50,
            initial_wander_ms: (2000, 5000),
            wander_interval_ms: (1000, 5000),

            weapon_radius: WEAPON_RADIUS,
            weapon_base_range: WEAPON_BASE_RANGE,
            weapon_range_step: WEAPON_RANGE_STEP,
            weapon_max_range: WEAPON_MAX_RANGE,
            weapon_max_count: WEAPON_MAX_COUNT,
            weapon_spin: WEAPON_SPIN,

            damage: DAMAGE_AMOUNT,
            damage_cooldown_ms: DAMAGE_COOLDOWN_MS,
            kill_score: KILL_SCORE,

            exp_to_level_up: EXP_TO_LEVEL_UP,
            max_health_boost: MAX_HEALTH_BOOST,
            health_boost_every: HEALTH_BOOST_EVERY,

            exp_orb_radius: EXP_ORB_RADIUS,
            exp_orb_value: EXP_ORB_VALUE,
            initial_exp_orbs: INITIAL_EXP_ORBS,
            max_exp_orbs: MAX_EXP_ORBS,
            exp_orb_spawn_attempts: EXP_ORB_SPAWN_ATTEMPTS,
            exp_orb_spawn_chance: EXP_ORB_SPAWN_CHANCE,
            health_item_radius: HEALTH_ITEM_RADIUS,
            health_item_heal: HEALTH_ITEM_HEAL,
            initial_health_items: MAX_HEALTH_ITEMS,
            max_health_items: MAX_HEALTH_ITEMS,
            health_item_spawn_chance: HEALTH_ITEM_SPAWN_CHANCE,
            item_spawn_margin: ITEM_SPAWN_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse a balance table, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a balance table, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring unreadable tuning table: {}", e);
                Self::default()
            }
        }
    }

    /// World center, where the player starts
    pub fn world_center(&self) -> Vec2 {
        self.world_size / 2.0
    }
}
