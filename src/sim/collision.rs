//! Circle geometry shared by pickups and combat
//!
//! Every entity in the game is a circle, so one overlap test covers
//! combatant/orb, combatant/health item and weapon/combatant contacts.

use glam::Vec2;

use crate::polar_to_cartesian;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector in the direction of `v`, or zero for the zero vector
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// True when two circles overlap. Touching circles do not collide.
#[inline]
pub fn check_collision(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    distance(pos_a, pos_b) < radius_a + radius_b
}

/// Positions of `count` weapons spaced evenly on a circle of `range`
/// around `center`, starting at `angle`. Yields `(position, angle)`.
pub fn orbit_positions(
    center: Vec2,
    count: u32,
    range: f32,
    angle: f32,
) -> impl Iterator<Item = (Vec2, f32)> {
    let step = if count == 0 {
        0.0
    } else {
        std::f32::consts::TAU / count as f32
    };
    (0..count).map(move |i| {
        let theta = angle + step * i as f32;
        (center + polar_to_cartesian(range, theta), theta)
    })
}
