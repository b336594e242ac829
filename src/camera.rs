//! Viewport that follows the player
//!
//! The offset is the world-space position of the viewport's top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Center the viewport on `target`, clamped so it never leaves the world
pub fn follow(target: Vec2, viewport: Vec2, world: Vec2) -> Vec2 {
    let max = (world - viewport).max(Vec2::ZERO);
    (target - viewport / 2.0).clamp(Vec2::ZERO, max)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn update(&mut self, target: Vec2, tuning: &Tuning) {
        self.offset = follow(target, tuning.viewport_size, tuning.world_size);
    }
}
