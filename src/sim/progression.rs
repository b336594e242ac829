//! Leveling policy
//!
//! A level-up resets experience to zero, so any surplus above the threshold
//! is discarded and one threshold crossing yields exactly one level.
//! Even levels add a weapon, odd levels extend the orbit, and every
//! `health_boost_every` levels the maximum health grows with a full heal.

use super::state::Combatant;
use crate::tuning::Tuning;

/// Advance one level and apply its upgrade
pub fn apply_level_up(combatant: &mut Combatant, tuning: &Tuning) {
    combatant.level += 1;
    combatant.experience = 0;
    combatant.experience_to_next = tuning.exp_to_level_up;

    if combatant.level % 2 == 0 {
        combatant.weapon_count = (combatant.weapon_count + 1).min(tuning.weapon_max_count);
    } else {
        combatant.weapon_range =
            (combatant.weapon_range + tuning.weapon_range_step).min(tuning.weapon_max_range);
    }

    if tuning.health_boost_every > 0 && combatant.level % tuning.health_boost_every == 0 {
        combatant.max_health += tuning.max_health_boost;
        combatant.health = combatant.max_health;
    }
}

/// Level up once if the threshold has been reached. Returns true on level-up.
pub fn settle_experience(combatant: &mut Combatant, tuning: &Tuning) -> bool {
    if combatant.experience >= combatant.experience_to_next {
        apply_level_up(combatant, tuning);
        true
    } else {
        false
    }
}

/// Add experience from one pickup and settle it. Returns true on level-up.
pub fn award_experience(combatant: &mut Combatant, amount: u32, tuning: &Tuning) -> bool {
    combatant.experience = combatant.experience.saturating_add(amount);
    settle_experience(combatant, tuning)
}
