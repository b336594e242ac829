//! Fixed timestep simulation tick
//!
//! One tick is an ordered pipeline of stages. Each stage is a public
//! function over the world so it can be exercised on its own; `tick` runs
//! them in the only order that keeps pickups and combat fair:
//!
//! 1. player movement
//! 2. camera
//! 3. weapon spin
//! 4. enemy wandering
//! 5. weapon placement
//! 6. experience pickups (with level-ups)
//! 7. health pickups
//! 8. pickup respawn
//! 9. combat
//! 10. win check

use glam::Vec2;
use rand::Rng;

use super::collision::{check_collision, orbit_positions};
use super::progression::{award_experience, settle_experience};
use super::spawn::{random_unit_direction, spawn_experience_orb, spawn_health_item, uniform_ms};
use super::state::{ActiveWeapon, GameStatus, Role, World};
use crate::clamp_inside;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Desired movement, each component in [-1, 1]
    pub direction: Vec2,
}

impl TickInput {
    pub fn new(direction: Vec2) -> Self {
        Self { direction }
    }
}

/// Advance the world by one fixed step using the world's own RNG
pub fn tick(world: &mut World, input: &TickInput, now_ms: u64) {
    let mut rng = world.rng.clone();
    tick_with_rng(world, input, now_ms, &mut rng);
    world.rng = rng;
}

/// Advance the world by one fixed step with an explicit random source
pub fn tick_with_rng<R: Rng + ?Sized>(
    world: &mut World,
    input: &TickInput,
    now_ms: u64,
    rng: &mut R,
) {
    // Don't tick if paused or finished
    if !world.is_running() {
        return;
    }
    if world.player().is_none() {
        log::warn!("Tick skipped: world has no player");
        return;
    }

    move_player(world, input);
    update_camera(world);
    spin_weapons(world);
    wander_enemies(world, now_ms, rng);
    place_weapons(world);
    collect_experience(world);
    collect_health(world);
    respawn_pickups(world, now_ms, rng);
    resolve_combat(world, now_ms);
    check_victory(world);
}

/// Stage 1: apply the input direction at the player's speed
pub fn move_player(world: &mut World, input: &TickInput) {
    let size = world.tuning.world_size;
    let direction = if input.direction.is_finite() {
        input.direction.clamp(Vec2::NEG_ONE, Vec2::ONE)
    } else {
        Vec2::ZERO
    };
    if let Some(player) = world.player_mut() {
        player.pos = clamp_inside(player.pos + direction * player.speed, player.radius, size);
    }
}

/// Stage 2: follow the player with the viewport
pub fn update_camera(world: &mut World) {
    if let Some(target) = world.player().map(|p| p.pos) {
        world.camera.update(target, &world.tuning);
    }
}

/// Stage 3: rotate every combatant's weapons
pub fn spin_weapons(world: &mut World) {
    let spin = world.tuning.weapon_spin;
    for combatant in &mut world.combatants {
        combatant.weapon_angle += spin;
    }
}

/// Stage 4: wandering AI with wall reflection
pub fn wander_enemies<R: Rng + ?Sized>(world: &mut World, now_ms: u64, rng: &mut R) {
    let size = world.tuning.world_size;
    let interval = world.tuning.wander_interval_ms;

    for enemy in &mut world.combatants {
        let Role::Enemy { mut wander } = enemy.role else {
            continue;
        };

        if now_ms > wander.change_at_ms {
            wander.direction = random_unit_direction(rng);
            wander.change_at_ms = now_ms + uniform_ms(rng, interval);
        }

        let r = enemy.radius;
        let pos = enemy.pos + wander.direction * enemy.speed;
        if pos.x <= r || pos.x >= size.x - r {
            wander.direction.x = -wander.direction.x;
        }
        if pos.y <= r || pos.y >= size.y - r {
            wander.direction.y = -wander.direction.y;
        }

        enemy.pos = clamp_inside(pos, r, size);
        enemy.role = Role::Enemy { wander };
    }
}

/// Stage 5: rebuild the active weapon list from every combatant
pub fn place_weapons(world: &mut World) {
    let radius = world.tuning.weapon_radius;
    world.weapons.clear();
    for c in &world.combatants {
        for (pos, angle) in orbit_positions(c.pos, c.weapon_count, c.weapon_range, c.weapon_angle) {
            world.weapons.push(ActiveWeapon {
                owner: c.id,
                pos,
                radius,
                angle,
            });
        }
    }
}

/// Stage 6: experience pickups. Combatants are served in list order, so the
/// first one touching an orb takes it.
pub fn collect_experience(world: &mut World) {
    let World {
        combatants,
        orbs,
        tuning,
        ..
    } = world;

    for c in combatants.iter_mut() {
        let mut leveled = false;
        orbs.retain(|orb| {
            if check_collision(c.pos, c.radius, orb.pos, orb.radius) {
                leveled |= award_experience(c, orb.value, tuning);
                false
            } else {
                true
            }
        });
        leveled |= settle_experience(c, tuning);

        if leveled && c.is_player() {
            log::info!(
                "Player reached level {} ({} weapons, range {})",
                c.level,
                c.weapon_count,
                c.weapon_range
            );
        }
    }
}

/// Stage 7: health pickups, healing clamped at max health
pub fn collect_health(world: &mut World) {
    let World {
        combatants,
        health_items,
        ..
    } = world;

    for c in combatants.iter_mut() {
        health_items.retain(|item| {
            if check_collision(c.pos, c.radius, item.pos, item.radius) {
                c.heal(item.heal);
                false
            } else {
                true
            }
        });
    }
}

/// Bernoulli draw that tolerates out-of-range probabilities
fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p >= 1.0 {
        true
    } else if p > 0.0 {
        rng.random_bool(p)
    } else {
        false
    }
}

/// Stage 8: probabilistic trickle of new pickups, never past the ceilings
pub fn respawn_pickups<R: Rng + ?Sized>(world: &mut World, now_ms: u64, rng: &mut R) {
    let missing_orbs = world.tuning.max_exp_orbs.saturating_sub(world.orbs.len());
    let attempts = missing_orbs.min(world.tuning.exp_orb_spawn_attempts);
    let mut spawned = 0;
    for _ in 0..attempts {
        if chance(rng, world.tuning.exp_orb_spawn_chance) {
            let id = world.next_entity_id();
            let orb = spawn_experience_orb(id, now_ms, &world.tuning, rng);
            world.orbs.push(orb);
            spawned += 1;
        }
    }

    let missing_items = world
        .tuning
        .max_health_items
        .saturating_sub(world.health_items.len());
    for _ in 0..missing_items {
        if chance(rng, world.tuning.health_item_spawn_chance) {
            let id = world.next_entity_id();
            let item = spawn_health_item(id, now_ms, &world.tuning, rng);
            world.health_items.push(item);
            spawned += 1;
        }
    }

    if spawned > 0 {
        log::debug!("Respawned {} pickups", spawned);
    }
}

/// Stage 9: weapon hits. Each attacker lands at most one hit per target per
/// tick, and a hit opens the target's invulnerability window against every
/// attacker.
pub fn resolve_combat(world: &mut World, now_ms: u64) {
    let cooldown = world.tuning.damage_cooldown_ms;
    let damage = world.tuning.damage;
    let kill_score = world.tuning.kill_score;
    let count = world.combatants.len();

    for a in 0..count {
        let attacker = &world.combatants[a];
        if !attacker.is_alive() {
            continue;
        }
        let (attacker_id, attacker_level) = (attacker.id, attacker.level);

        for t in 0..count {
            if t == a {
                continue;
            }
            let target = &world.combatants[t];
            if !target.is_alive() || !target.is_vulnerable(now_ms, cooldown) {
                continue;
            }

            let hit = world
                .weapons
                .iter()
                .filter(|w| w.owner == attacker_id)
                .any(|w| check_collision(w.pos, w.radius, target.pos, target.radius));
            if !hit {
                continue;
            }

            let target = &mut world.combatants[t];
            if !target.take_damage(damage, now_ms) {
                continue;
            }

            if target.is_player() {
                world.status = GameStatus::Lost;
                log::info!("Player defeated (score {})", world.score);
            } else {
                world.score += kill_score * u64::from(attacker_level);
                log::debug!(
                    "Enemy {} defeated by {} (score {})",
                    target.id,
                    attacker_id,
                    world.score
                );
            }
        }
    }

    world.combatants.retain(|c| c.is_player() || c.is_alive());
}

/// Stage 10: the session is won once no enemy remains
pub fn check_victory(world: &mut World) {
    if world.status == GameStatus::Playing && world.enemies_remaining() == 0 {
        world.status = GameStatus::Won;
        log::info!("All enemies defeated (score {})", world.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::{spawn_enemy, spawn_player};
    use crate::sim::state::{Combatant, ExperienceOrb, HealthItem, Wander};
    use crate::hud::HudProjection;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// Tuning with no random respawns so scenarios stay exact
    fn quiet_tuning() -> Tuning {
        Tuning {
            exp_orb_spawn_chance: 0.0,
            health_item_spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn arena() -> World {
        let mut world = World::empty(12345, quiet_tuning());
        let id = world.next_entity_id();
        let player = spawn_player(id, &world.tuning);
        world.combatants.push(player);
        world
    }

    /// Add a motionless enemy at `pos`
    fn add_enemy(world: &mut World, pos: Vec2) -> usize {
        let id = world.next_entity_id();
        let mut enemy = spawn_enemy(id, Vec2::ZERO, 0.0, 0, &world.tuning, &mut world.rng);
        enemy.pos = pos;
        enemy.role = Role::Enemy {
            wander: Wander {
                direction: Vec2::ZERO,
                change_at_ms: u64::MAX,
            },
        };
        world.combatants.push(enemy);
        world.combatants.len() - 1
    }

    fn add_orb(world: &mut World, pos: Vec2, value: u32) {
        let id = world.next_entity_id();
        world.orbs.push(ExperienceOrb {
            id,
            pos,
            radius: world.tuning.exp_orb_radius,
            value,
            spawned_at_ms: 0,
        });
    }

    fn player(world: &World) -> &Combatant {
        world.player().unwrap()
    }

    #[test]
    fn test_one_hit_per_attacker_per_tick() {
        let mut world = arena();
        let center = player(&world).pos;
        {
            let p = world.player_mut().unwrap();
            p.weapon_count = 6;
            p.weapon_range = 5.0;
        }
        let e = add_enemy(&mut world, center + Vec2::new(10.0, 0.0));
        world.combatants[e].last_damage_ms = Some(0);

        // Exactly one cooldown after the last hit: vulnerable again
        let now = world.tuning.damage_cooldown_ms;
        tick(&mut world, &TickInput::default(), now);

        let enemy = &world.combatants[e];
        assert_eq!(enemy.health, world.tuning.initial_health - world.tuning.damage);
        assert_eq!(enemy.last_damage_ms, Some(now));
    }

    #[test]
    fn test_invulnerability_window_blocks_hits() {
        let mut world = arena();
        let center = player(&world).pos;
        let e = add_enemy(&mut world, center + Vec2::new(10.0, 0.0));
        world.player_mut().unwrap().weapon_range = 5.0;
        world.combatants[e].last_damage_ms = Some(500);

        tick(&mut world, &TickInput::default(), 1499);
        assert_eq!(world.combatants[e].health, world.tuning.initial_health);
    }

    #[test]
    fn test_window_is_per_target() {
        let mut world = arena();
        let center = player(&world).pos;
        world.player_mut().unwrap().health = 1000;
        world.player_mut().unwrap().max_health = 1000;
        // Two enemies whose blades both overlap the player
        for offset in [Vec2::new(30.0, 0.0), Vec2::new(-30.0, 0.0)] {
            let e = add_enemy(&mut world, center + offset);
            let enemy = &mut world.combatants[e];
            enemy.weapon_range = 30.0;
            enemy.weapon_count = 6;
        }

        tick(&mut world, &TickInput::default(), 10_000);
        assert_eq!(player(&world).health, 1000 - world.tuning.damage);
    }

    #[test]
    fn test_kill_removes_enemy_scores_and_wins() {
        let mut world = arena();
        let center = player(&world).pos;
        world.player_mut().unwrap().level = 3;
        world.player_mut().unwrap().weapon_range = 5.0;
        let e = add_enemy(&mut world, center + Vec2::new(10.0, 0.0));
        world.combatants[e].health = world.tuning.damage;
        // Enemy blades sit far from the player
        world.combatants[e].weapon_range = 200.0;

        tick(&mut world, &TickInput::default(), 5000);

        assert_eq!(world.enemies_remaining(), 0);
        assert_eq!(world.combatants.len(), 1);
        assert_eq!(world.score, 100 * 3);
        assert_eq!(world.status, GameStatus::Won);
    }

    #[test]
    fn test_no_enemies_wins_immediately() {
        let mut world = arena();
        tick(&mut world, &TickInput::default(), 16);
        assert_eq!(world.status, GameStatus::Won);
    }

    #[test]
    fn test_player_death_loses_and_freezes() {
        let mut world = arena();
        let center = player(&world).pos;
        world.player_mut().unwrap().health = world.tuning.damage;
        // Keep the player's blade away from the enemy
        world.player_mut().unwrap().weapon_range = 300.0;
        let e = add_enemy(&mut world, center + Vec2::new(30.0, 0.0));
        world.combatants[e].weapon_range = 30.0;
        world.combatants[e].weapon_count = 6;

        tick(&mut world, &TickInput::default(), 5000);
        assert_eq!(world.status, GameStatus::Lost);
        assert_eq!(player(&world).health, 0);
        assert_eq!(world.combatants.len(), 2);

        let frozen = world.combatants.clone();
        for t in 0..10 {
            tick(&mut world, &TickInput::new(Vec2::ONE), 6000 + t * 16);
        }
        assert_eq!(world.combatants, frozen);
        assert_eq!(world.status, GameStatus::Lost);
    }

    #[test]
    fn test_dead_enemy_strikes_no_one() {
        let mut world = arena();
        let center = player(&world).pos;
        world.player_mut().unwrap().health = world.tuning.damage;
        world.player_mut().unwrap().weapon_range = 5.0;
        let e = add_enemy(&mut world, center + Vec2::new(10.0, 0.0));
        world.combatants[e].health = world.tuning.damage;
        world.combatants[e].weapon_range = 5.0;

        tick(&mut world, &TickInput::default(), 5000);
        // The player strikes first and kills the enemy; a dead enemy strikes no one
        assert_eq!(world.enemies_remaining(), 0);
        assert_eq!(world.status, GameStatus::Won);
        assert_eq!(player(&world).health, world.tuning.damage);
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let mut world = World::new(77);
        world.toggle_pause();
        let combatants = world.combatants.clone();
        let orbs = world.orbs.len();
        for t in 0..30 {
            tick(&mut world, &TickInput::new(Vec2::X), t * 16);
        }
        assert_eq!(world.combatants, combatants);
        assert_eq!(world.orbs.len(), orbs);
        assert_eq!(world.status, GameStatus::Paused);

        world.toggle_pause();
        let before = player(&world).pos;
        tick(&mut world, &TickInput::new(Vec2::X), 500);
        assert_eq!(player(&world).pos, before + Vec2::new(world.tuning.player_speed, 0.0));
    }

    #[test]
    fn test_orb_below_threshold() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        let center = player(&world).pos;
        add_orb(&mut world, center, 3);
        let mut hud = HudProjection::new();
        assert_eq!(hud.update(&world).unwrap().level, 1);

        tick(&mut world, &TickInput::default(), 16);
        let p = player(&world);
        assert_eq!(p.experience, 3);
        assert_eq!(p.level, 1);
        assert!(world.orbs.is_empty());

        // Only the experience counter changed
        let counters = hud.update(&world).unwrap();
        assert_eq!(counters.level, 1);
        assert_eq!(counters.experience, 3);
    }

    #[test]
    fn test_surplus_before_pickup_levels_once() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        world.player_mut().unwrap().experience = 25;

        tick(&mut world, &TickInput::default(), 16);
        let p = player(&world);
        assert_eq!(p.level, 2);
        assert!(p.experience < p.experience_to_next);
    }

    #[test]
    fn test_several_orbs_in_one_tick() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        let center = player(&world).pos;
        world.player_mut().unwrap().experience = 9;
        for _ in 0..3 {
            add_orb(&mut world, center, 1);
        }

        tick(&mut world, &TickInput::default(), 16);
        let p = player(&world);
        // The first orb crosses the threshold, the other two start the next level
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 2);
    }

    #[test]
    fn test_first_combatant_in_order_takes_contested_orb() {
        let mut world = arena();
        let center = player(&world).pos;
        let e = add_enemy(&mut world, center + Vec2::new(15.0, 0.0));
        world.combatants[e].weapon_range = 500.0;
        world.player_mut().unwrap().weapon_range = 500.0;
        add_orb(&mut world, center + Vec2::new(7.0, 0.0), 1);

        tick(&mut world, &TickInput::default(), 16);
        assert_eq!(player(&world).experience, 1);
        assert_eq!(world.combatants[e].experience, 0);
    }

    #[test]
    fn test_health_pickup_clamps() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        let center = player(&world).pos;
        world.player_mut().unwrap().health = 90;
        let id = world.next_entity_id();
        world.health_items.push(HealthItem {
            id,
            pos: center,
            radius: world.tuning.health_item_radius,
            heal: world.tuning.health_item_heal,
            spawned_at_ms: 0,
        });

        tick(&mut world, &TickInput::default(), 16);
        let p = player(&world);
        assert_eq!(p.health, p.max_health);
        assert_eq!(p.level, 1);
        assert!(world.health_items.is_empty());
    }

    #[test]
    fn test_player_movement_clamped() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        let r = player(&world).radius;
        world.player_mut().unwrap().pos = Vec2::new(r + 1.0, 1250.0);

        tick(&mut world, &TickInput::new(Vec2::new(-1.0, 0.0)), 16);
        assert_eq!(player(&world).pos, Vec2::new(r, 1250.0));

        // Oversized and non-finite inputs are tamed
        let before = player(&world).pos;
        tick(&mut world, &TickInput::new(Vec2::new(0.0, 50.0)), 32);
        assert_eq!(player(&world).pos, before + Vec2::new(0.0, world.tuning.player_speed));
        let before = player(&world).pos;
        tick(&mut world, &TickInput::new(Vec2::new(f32::NAN, 1.0)), 48);
        assert_eq!(player(&world).pos, before);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        tick(&mut world, &TickInput::new(Vec2::new(1.0, 1.0)), 16);
        let expected = crate::camera::follow(
            player(&world).pos,
            world.tuning.viewport_size,
            world.tuning.world_size,
        );
        assert_eq!(world.camera.offset, expected);
    }

    #[test]
    fn test_weapons_rebuilt_each_tick() {
        let mut world = arena();
        let e = add_enemy(&mut world, Vec2::new(100.0, 100.0));
        world.player_mut().unwrap().weapon_count = 3;
        world.combatants[e].weapon_count = 2;

        tick(&mut world, &TickInput::default(), 16);
        assert_eq!(world.weapons.len(), 5);
        tick(&mut world, &TickInput::default(), 32);
        assert_eq!(world.weapons.len(), 5);

        let p = player(&world);
        for w in world.weapons.iter().filter(|w| w.owner == p.id) {
            assert!((w.pos.distance(p.pos) - p.weapon_range).abs() < 1e-3);
        }
        assert!((p.weapon_angle - 2.0 * world.tuning.weapon_spin).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_reflects_off_wall() {
        let mut world = arena();
        let r = world.tuning.combatant_radius;
        let e = add_enemy(&mut world, Vec2::new(r + 0.5, 600.0));
        world.combatants[e].speed = 2.0;
        world.combatants[e].role = Role::Enemy {
            wander: Wander {
                direction: Vec2::new(-1.0, 0.0),
                change_at_ms: u64::MAX,
            },
        };

        tick(&mut world, &TickInput::default(), 16);
        let enemy = &world.combatants[e];
        assert_eq!(enemy.pos.x, r);
        match enemy.role {
            Role::Enemy { wander } => assert_eq!(wander.direction, Vec2::new(1.0, 0.0)),
            Role::Player => panic!("expected an enemy"),
        }
    }

    #[test]
    fn test_enemy_picks_new_direction_after_deadline() {
        let mut world = arena();
        let e = add_enemy(&mut world, Vec2::new(600.0, 600.0));
        world.combatants[e].role = Role::Enemy {
            wander: Wander {
                direction: Vec2::ZERO,
                change_at_ms: 1000,
            },
        };

        // At the deadline nothing changes yet
        tick(&mut world, &TickInput::default(), 1000);
        assert_eq!(world.combatants[e].pos, Vec2::new(600.0, 600.0));

        tick(&mut world, &TickInput::default(), 1001);
        match world.combatants[e].role {
            Role::Enemy { wander } => {
                assert!(wander.change_at_ms >= 2001 && wander.change_at_ms < 6001);
                let len = wander.direction.length();
                assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
            }
            Role::Player => panic!("expected an enemy"),
        }
    }

    #[test]
    fn test_respawn_respects_attempts_and_ceiling() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        world.tuning.exp_orb_spawn_chance = 1.0;
        world.tuning.health_item_spawn_chance = 1.0;

        tick(&mut world, &TickInput::default(), 16);
        assert_eq!(world.orbs.len(), world.tuning.exp_orb_spawn_attempts);
        assert_eq!(world.health_items.len(), world.tuning.max_health_items);

        world.orbs.clear();
        for _ in 0..world.tuning.max_exp_orbs - 2 {
            add_orb(&mut world, Vec2::new(5.0, 5.0), 1);
        }
        tick(&mut world, &TickInput::default(), 32);
        assert_eq!(world.orbs.len(), world.tuning.max_exp_orbs);
        assert!(world.orbs.iter().rev().take(2).all(|o| o.spawned_at_ms == 32));
    }

    #[test]
    fn test_orb_trickle_rate() {
        let mut world = arena();
        add_enemy(&mut world, Vec2::new(100.0, 100.0));
        world.tuning.exp_orb_spawn_chance = 0.05;
        world.tuning.max_exp_orbs = usize::MAX;

        let mut rng = rand_pcg::Pcg32::new(0xcafe_f00d_d15e_a5e5, 0x0a02_bdbf_7bb3_c0a7);
        for t in 0..1000 {
            respawn_pickups(&mut world, t, &mut rng);
        }
        // 5 attempts at 5% over 1000 ticks: expect ~250
        assert!((180..=320).contains(&world.orbs.len()), "{}", world.orbs.len());
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(99999);
        let mut b = World::new(99999);
        let inputs = [Vec2::X, Vec2::new(-1.0, 1.0), Vec2::ZERO, Vec2::Y];
        for (i, dir) in inputs.iter().cycle().take(400).enumerate() {
            let now = i as u64 * 16;
            tick(&mut a, &TickInput::new(*dir), now);
            tick(&mut b, &TickInput::new(*dir), now);
        }
        assert_eq!(a.combatants, b.combatants);
        assert_eq!(a.orbs, b.orbs);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_invariants_hold_every_tick(
            seed in any::<u64>(),
            dirs in proptest::collection::vec((-1.5f32..1.5, -1.5f32..1.5), 1..40),
        ) {
            let mut world = World::new(seed);
            let size = world.tuning.world_size;
            for (i, (x, y)) in dirs.iter().cycle().take(300).enumerate() {
                tick(&mut world, &TickInput::new(Vec2::new(*x, *y)), i as u64 * 17);

                prop_assert_eq!(world.combatants.iter().filter(|c| c.is_player()).count(), 1);
                prop_assert!(world.orbs.len() <= world.tuning.max_exp_orbs);
                prop_assert!(world.health_items.len() <= world.tuning.max_health_items);
                for c in &world.combatants {
                    prop_assert!(c.pos.x >= c.radius && c.pos.x <= size.x - c.radius);
                    prop_assert!(c.pos.y >= c.radius && c.pos.y <= size.y - c.radius);
                    prop_assert!(c.health <= c.max_health);
                    prop_assert!(c.experience < c.experience_to_next);
                    prop_assert!((1..=world.tuning.weapon_max_count).contains(&c.weapon_count));
                }
            }
        }
    }
}
