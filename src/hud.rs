//! HUD counters projected from the simulation
//!
//! The projection remembers what it last reported and only hands back
//! counters that changed, so the UI layer touches the DOM when it must.

use serde::Serialize;

use crate::sim::{GameStatus, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudCounters {
    pub score: u64,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub health: u32,
    pub max_health: u32,
    pub enemies_remaining: usize,
    pub status: GameStatus,
}

impl HudCounters {
    /// Read the counters off the world. A world without a player shows zeroed
    /// player stats.
    pub fn from_world(world: &World) -> Self {
        let (level, experience, experience_to_next, health, max_health) = world
            .player()
            .map(|p| (p.level, p.experience, p.experience_to_next, p.health, p.max_health))
            .unwrap_or_default();
        Self {
            score: world.score,
            level,
            experience,
            experience_to_next,
            health,
            max_health,
            enemies_remaining: world.enemies_remaining(),
            status: world.status,
        }
    }

    /// Status line for the overlay
    pub fn status_message(&self) -> Option<&'static str> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::Paused => Some("Paused"),
            GameStatus::Won => Some("Victory! All enemies defeated"),
            GameStatus::Lost => Some("Game Over"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HudProjection {
    last: Option<HudCounters>,
}

impl HudProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters to display, or `None` when nothing changed since last time
    pub fn update(&mut self, world: &World) -> Option<HudCounters> {
        let counters = HudCounters::from_world(world);
        if self.last == Some(counters) {
            return None;
        }
        self.last = Some(counters);
        Some(counters)
    }

    /// Forget the last report so the next update always emits
    pub fn reset(&mut self) {
        self.last = None;
    }
}
