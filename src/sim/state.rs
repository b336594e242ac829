//! Game state and core simulation types
//!
//! `World` is the single owner of everything a session mutates. Presentation
//! and the HUD only ever read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::camera::Camera;
use crate::tuning::Tuning;

/// Entity identifier, unique within one session
pub type EntityId = u32;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    Playing,
    /// Simulation frozen, frames still rendered
    Paused,
    /// Every enemy defeated
    Won,
    /// Player health reached zero
    Lost,
}

/// Enemy wandering state: walk `direction` until `change_at_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wander {
    pub direction: Vec2,
    pub change_at_ms: u64,
}

/// Who controls a combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    /// Driven by the input signal
    Player,
    /// Driven by the wandering AI
    Enemy { wander: Wander },
}

/// The player or one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub radius: f32,
    pub role: Role,
    /// Units per tick
    pub speed: f32,
    /// Weapon rotation (radians, grows without wrapping)
    pub weapon_angle: f32,
    /// Simulation time of the last hit taken, `None` if never hit
    pub last_damage_ms: Option<u64>,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub weapon_count: u32,
    pub weapon_range: f32,
}

impl Combatant {
    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether the invulnerability window from the last hit has expired
    pub fn is_vulnerable(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        match self.last_damage_ms {
            Some(hit_at) => now_ms.saturating_sub(hit_at) >= cooldown_ms,
            None => true,
        }
    }

    /// Apply damage and open the invulnerability window. Returns true on death.
    pub fn take_damage(&mut self, amount: u32, now_ms: u64) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.last_damage_ms = Some(now_ms);
        self.health == 0
    }

    /// Restore health, never above the maximum
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }
}

/// Orbiting hazard derived from its owner each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveWeapon {
    pub owner: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub angle: f32,
}

/// Experience pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceOrb {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub value: u32,
    pub spawned_at_ms: u64,
}

/// Healing pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthItem {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub heal: u32,
    pub spawned_at_ms: u64,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table the session was built with
    pub tuning: Tuning,
    /// Session RNG
    pub rng: Pcg32,
    /// Player first, then enemies in spawn order
    pub combatants: Vec<Combatant>,
    /// Rebuilt every tick
    pub weapons: Vec<ActiveWeapon>,
    pub orbs: Vec<ExperienceOrb>,
    pub health_items: Vec<HealthItem>,
    pub camera: Camera,
    pub status: GameStatus,
    pub score: u64,
    /// Next entity ID
    next_id: EntityId,
}

impl World {
    /// Create a new session with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session at simulation time 0
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self::empty(seed, tuning);
        let now_ms = 0;

        let id = world.next_entity_id();
        let player = spawn::spawn_player(id, &world.tuning);
        let player_pos = player.pos;
        world.combatants.push(player);

        for _ in 0..world.tuning.enemy_count {
            let id = world.next_entity_id();
            let enemy = spawn::spawn_enemy(
                id,
                player_pos,
                world.tuning.enemy_min_separation,
                now_ms,
                &world.tuning,
                &mut world.rng,
            );
            world.combatants.push(enemy);
        }

        for _ in 0..world.tuning.initial_exp_orbs {
            let id = world.next_entity_id();
            let orb = spawn::spawn_experience_orb(id, now_ms, &world.tuning, &mut world.rng);
            world.orbs.push(orb);
        }

        for _ in 0..world.tuning.initial_health_items {
            let id = world.next_entity_id();
            let item = spawn::spawn_health_item(id, now_ms, &world.tuning, &mut world.rng);
            world.health_items.push(item);
        }

        world.camera.update(player_pos, &world.tuning);
        log::info!(
            "World created (seed {}, {} enemies, {} orbs)",
            seed,
            world.enemies_remaining(),
            world.orbs.len()
        );
        world
    }

    /// A playing session with no entities at all
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            combatants: Vec::new(),
            weapons: Vec::new(),
            orbs: Vec::new(),
            health_items: Vec::new(),
            camera: Camera::default(),
            status: GameStatus::Playing,
            score: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.is_player())
    }

    pub fn enemies_remaining(&self) -> usize {
        self.combatants.iter().filter(|c| !c.is_player()).count()
    }

    /// Whether ticks currently advance the simulation
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Flip between Playing and Paused. Finished sessions stay finished.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            finished => finished,
        };
        log::info!("Status now {:?}", self.status);
    }
}
