//! Entity construction with randomized placement
//!
//! Constructors only. Population ceilings are enforced by the tick.

use glam::Vec2;
use rand::Rng;

use super::collision::distance;
use super::state::{Combatant, EntityId, ExperienceOrb, HealthItem, Role, Wander};
use crate::tuning::Tuning;

/// Uniform draw in `[lo, hi)`; degenerate ranges collapse to `lo`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniform millisecond offset in `[lo, hi)`
pub fn uniform_ms<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (u64, u64)) -> u64 {
    if hi <= lo {
        return lo;
    }
    lo + (rng.random::<f64>() * (hi - lo) as f64) as u64
}

/// Random direction of unit length (zero in the degenerate case)
pub fn random_unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let raw = Vec2::new(uniform(rng, -1.0, 1.0), uniform(rng, -1.0, 1.0));
    super::collision::normalize(raw)
}

/// Uniform point inside `[min, max)` on both axes
fn point_in<R: Rng + ?Sized>(rng: &mut R, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(uniform(rng, min.x, max.x), uniform(rng, min.y, max.y))
}

/// Uniform point over the world interior, inset by the pickup margin
fn pickup_position<R: Rng + ?Sized>(rng: &mut R, radius: f32, tuning: &Tuning) -> Vec2 {
    let inset = Vec2::splat(tuning.item_spawn_margin.max(radius));
    point_in(rng, inset, tuning.world_size - inset)
}

fn base_combatant(id: EntityId, pos: Vec2, role: Role, speed: f32, tuning: &Tuning) -> Combatant {
    Combatant {
        id,
        pos,
        health: tuning.initial_health,
        max_health: tuning.initial_health,
        radius: tuning.combatant_radius,
        role,
        speed,
        weapon_angle: 0.0,
        last_damage_ms: None,
        level: 1,
        experience: 0,
        experience_to_next: tuning.exp_to_level_up,
        weapon_count: 1,
        weapon_range: tuning.weapon_base_range,
    }
}

/// The player, at the world center with starting stats
pub fn spawn_player(id: EntityId, tuning: &Tuning) -> Combatant {
    base_combatant(id, tuning.world_center(), Role::Player, tuning.player_speed, tuning)
}

/// An enemy placed inside the spawn region, preferably `min_separation`
/// away from `avoid`. When the attempt budget runs out the last candidate
/// is kept.
pub fn spawn_enemy<R: Rng + ?Sized>(
    id: EntityId,
    avoid: Vec2,
    min_separation: f32,
    now_ms: u64,
    tuning: &Tuning,
    rng: &mut R,
) -> Combatant {
    let attempts = tuning.enemy_spawn_attempts.max(1);
    let mut pos = point_in(rng, tuning.enemy_spawn_min, tuning.enemy_spawn_max);
    for _ in 1..attempts {
        if distance(pos, avoid) >= min_separation {
            break;
        }
        pos = point_in(rng, tuning.enemy_spawn_min, tuning.enemy_spawn_max);
    }

    let radius = tuning.combatant_radius;
    let pos = crate::clamp_inside(pos, radius, tuning.world_size);
    let speed = uniform(rng, tuning.enemy_min_speed, tuning.enemy_max_speed);
    let wander = Wander {
        direction: random_unit_direction(rng),
        change_at_ms: now_ms + uniform_ms(rng, tuning.initial_wander_ms),
    };

    let mut enemy = base_combatant(id, pos, Role::Enemy { wander }, speed, tuning);
    enemy.weapon_angle = uniform(rng, 0.0, std::f32::consts::TAU);
    enemy
}

pub fn spawn_experience_orb<R: Rng + ?Sized>(
    id: EntityId,
    now_ms: u64,
    tuning: &Tuning,
    rng: &mut R,
) -> ExperienceOrb {
    ExperienceOrb {
        id,
        pos: pickup_position(rng, tuning.exp_orb_radius, tuning),
        radius: tuning.exp_orb_radius,
        value: tuning.exp_orb_value,
        spawned_at_ms: now_ms,
    }
}

pub fn spawn_health_item<R: Rng + ?Sized>(
    id: EntityId,
    now_ms: u64,
    tuning: &Tuning,
    rng: &mut R,
) -> HealthItem {
    HealthItem {
        id,
        pos: pickup_position(rng, tuning.health_item_radius, tuning),
        radius: tuning.health_item_radius,
        heal: tuning.health_item_heal,
        spawned_at_ms: now_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_player_starts_centered() {
        let tuning = Tuning::default();
        let player = spawn_player(1, &tuning);
        assert!(player.is_player());
        assert_eq!(player.pos, tuning.world_center());
        assert_eq!(player.health, tuning.initial_health);
        assert_eq!(player.level, 1);
        assert_eq!(player.weapon_count, 1);
        assert_eq!(player.weapon_range, tuning.weapon_base_range);
        assert_eq!(player.last_damage_ms, None);
    }

    #[test]
    fn test_enemy_in_region_and_separated() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        // Avoid a point inside the region so separation actually matters
        let avoid = Vec2::new(400.0, 300.0);
        for id in 0..200 {
            let enemy = spawn_enemy(id, avoid, 100.0, 0, &tuning, &mut rng);
            assert!(enemy.pos.cmpge(tuning.enemy_spawn_min).all());
            assert!(enemy.pos.cmple(tuning.enemy_spawn_max).all());
            assert!(distance(enemy.pos, avoid) >= 100.0);
            assert!(enemy.speed >= tuning.enemy_min_speed && enemy.speed <= tuning.enemy_max_speed);
            match enemy.role {
                Role::Enemy { wander } => {
                    assert!(wander.change_at_ms >= 2000 && wander.change_at_ms < 5000);
                    let len = wander.direction.length();
                    assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
                }
                Role::Player => panic!("expected an enemy"),
            }
        }
    }

    #[test]
    fn test_enemy_accepts_last_candidate_when_budget_exhausted() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        // Impossible separation: every candidate fails, no panic, still in region
        let enemy = spawn_enemy(1, Vec2::new(400.0, 300.0), 1.0e6, 0, &tuning, &mut rng);
        assert!(enemy.pos.cmpge(tuning.enemy_spawn_min).all());
        assert!(enemy.pos.cmple(tuning.enemy_spawn_max).all());
    }

    #[test]
    fn test_pickups_inside_world() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        for id in 0..500 {
            let orb = spawn_experience_orb(id, 123, &tuning, &mut rng);
            assert!(orb.pos.cmpge(Vec2::splat(orb.radius)).all());
            assert!(orb.pos.cmple(tuning.world_size - orb.radius).all());
            assert_eq!(orb.spawned_at_ms, 123);
            assert_eq!(orb.value, tuning.exp_orb_value);

            let item = spawn_health_item(id, 456, &tuning, &mut rng);
            assert!(item.pos.cmpge(Vec2::splat(item.radius)).all());
            assert!(item.pos.cmple(tuning.world_size - item.radius).all());
            assert_eq!(item.heal, tuning.health_item_heal);
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(uniform(&mut rng, 3.0, 3.0), 3.0);
        assert_eq!(uniform_ms(&mut rng, (500, 100)), 500);
    }
}
