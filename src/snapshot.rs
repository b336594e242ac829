//! Drawable frame handed to the renderer
//!
//! A snapshot is a read-only copy of everything a renderer needs for one
//! frame. It owns its data, so nothing the renderer does can reach back into
//! the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Combatant, EntityId, GameStatus, Role, World};

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.23, 0.51, 0.96, 1.0];
    pub const ENEMY: [f32; 4] = [0.94, 0.27, 0.27, 1.0];
    pub const WEAPON: [f32; 4] = [0.96, 0.62, 0.04, 1.0];
    pub const EXP_ORB: [f32; 4] = [0.06, 0.73, 0.51, 1.0];
    pub const HEALTH_ITEM: [f32; 4] = [0.94, 0.27, 0.27, 1.0];
    pub const HEALTH_HEALTHY: [f32; 4] = [0.06, 0.73, 0.51, 1.0];
    pub const HEALTH_WOUNDED: [f32; 4] = [0.96, 0.62, 0.04, 1.0];
    pub const HEALTH_CRITICAL: [f32; 4] = [0.94, 0.27, 0.27, 1.0];
}

/// Health bar coloring band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthTier {
    Healthy,
    Wounded,
    Critical,
}

impl HealthTier {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            HealthTier::Healthy
        } else if fraction > 0.25 {
            HealthTier::Wounded
        } else {
            HealthTier::Critical
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            HealthTier::Healthy => colors::HEALTH_HEALTHY,
            HealthTier::Wounded => colors::HEALTH_WOUNDED,
            HealthTier::Critical => colors::HEALTH_CRITICAL,
        }
    }
}

/// Experience bar, shown for the player only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExperienceBar {
    pub experience: u32,
    pub experience_to_next: u32,
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub is_player: bool,
    pub color: [f32; 4],
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub health_fraction: f32,
    pub health_tier: HealthTier,
    pub health_color: [f32; 4],
    pub experience: Option<ExperienceBar>,
}

impl CombatantView {
    fn from_combatant(c: &Combatant) -> Self {
        let health_fraction = if c.max_health == 0 {
            0.0
        } else {
            c.health as f32 / c.max_health as f32
        };
        let tier = HealthTier::from_fraction(health_fraction);
        let (color, experience) = match c.role {
            Role::Player => {
                let fraction = if c.experience_to_next == 0 {
                    0.0
                } else {
                    c.experience as f32 / c.experience_to_next as f32
                };
                let bar = ExperienceBar {
                    experience: c.experience,
                    experience_to_next: c.experience_to_next,
                    fraction,
                };
                (colors::PLAYER, Some(bar))
            }
            Role::Enemy { .. } => (colors::ENEMY, None),
        };

        Self {
            id: c.id,
            pos: c.pos,
            radius: c.radius,
            is_player: c.is_player(),
            color,
            level: c.level,
            health: c.health,
            max_health: c.max_health,
            health_fraction,
            health_tier: tier,
            health_color: tier.color(),
            experience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeaponView {
    pub owner: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub color: [f32; 4],
}

/// Orb or health item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickupView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub combatants: Vec<CombatantView>,
    pub weapons: Vec<WeaponView>,
    pub orbs: Vec<PickupView>,
    pub health_items: Vec<PickupView>,
    pub camera: Vec2,
    pub viewport: Vec2,
    pub world_size: Vec2,
    pub status: GameStatus,
    pub score: u64,
    /// Draw the pause overlay
    pub paused: bool,
}

impl FrameSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            combatants: world
                .combatants
                .iter()
                .map(CombatantView::from_combatant)
                .collect(),
            weapons: world
                .weapons
                .iter()
                .map(|w| WeaponView {
                    owner: w.owner,
                    pos: w.pos,
                    radius: w.radius,
                    angle: w.angle,
                    color: colors::WEAPON,
                })
                .collect(),
            orbs: world
                .orbs
                .iter()
                .map(|o| PickupView {
                    id: o.id,
                    pos: o.pos,
                    radius: o.radius,
                    color: colors::EXP_ORB,
                })
                .collect(),
            health_items: world
                .health_items
                .iter()
                .map(|h| PickupView {
                    id: h.id,
                    pos: h.pos,
                    radius: h.radius,
                    color: colors::HEALTH_ITEM,
                })
                .collect(),
            camera: world.camera.offset,
            viewport: world.tuning.viewport_size,
            world_size: world.tuning.world_size,
            status: world.status,
            score: world.score,
            paused: world.status == GameStatus::Paused,
        }
    }

    pub fn player(&self) -> Option<&CombatantView> {
        self.combatants.iter().find(|c| c.is_player)
    }

    /// Serialize for a JS-side renderer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
