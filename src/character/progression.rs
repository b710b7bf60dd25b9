//! Experience thresholds, level-ups and manual stat allocation.
//!
//! All operations take a character by reference and return an updated copy;
//! the caller decides whether to persist it.

use super::attributes::{EffectiveStats, StatType};
use super::model::Character;
use crate::core::balance::CombatTuning;
use crate::core::constants::*;
use tracing::debug;

/// Experience required to advance past `level`: `floor(100 * 1.5^(level-1))`.
pub fn experience_for_level(level: u32) -> u64 {
    let exponent = level.max(1) - 1;
    (XP_CURVE_BASE * XP_CURVE_GROWTH.powi(exponent as i32)).floor() as u64
}

/// Stat points granted on reaching `level`.
///
/// - 2..=20: 2 points
/// - 21..=50: 1 point
/// - 51+: 1 point, plus 1 on every multiple of 5
pub fn stat_points_for_level(level: u32) -> u32 {
    match level {
        0 | 1 => 0,
        2..=EARLY_LEVEL_CAP => EARLY_LEVEL_POINTS,
        l if l <= MID_LEVEL_CAP => LATE_LEVEL_POINTS,
        l if l % LATE_BONUS_INTERVAL == 0 => LATE_LEVEL_POINTS + 1,
        _ => LATE_LEVEL_POINTS,
    }
}

/// Total stat points a character earns going from level 1 to `level`.
pub fn total_stat_points_at_level(level: u32) -> u32 {
    (2..=level).map(stat_points_for_level).sum()
}

impl Character {
    /// Stats after gems and equipment, curved.
    pub fn effective_stats(&self, tuning: &CombatTuning) -> EffectiveStats {
        let mut bonus = self.gem_bonus();
        bonus.add(&self.equipment_bonus());
        EffectiveStats::compute(&self.stats, &bonus, tuning)
    }

    /// `floor(base + level * per_level + effective_con * per_con)`.
    pub fn max_health_for(&self, tuning: &CombatTuning) -> u32 {
        let constitution = self
            .effective_stats(tuning)
            .get(StatType::Constitution);
        (tuning.base_health
            + self.level as f64 * tuning.health_per_level
            + constitution * tuning.health_per_constitution)
            .floor() as u32
    }

    /// Recomputes max health under `tuning` and moves current health by the
    /// same delta, never above the new maximum and never below zero.
    pub fn refresh_max_health(&mut self, tuning: &CombatTuning) {
        let new_max = self.max_health_for(tuning);
        let delta = new_max as i64 - self.max_health as i64;
        let current = (self.current_health as i64 + delta).clamp(0, new_max as i64);
        self.max_health = new_max;
        self.current_health = current as u32;
    }
}

/// Advances one level under the standard tuning. See [`level_up_with_tuning`].
pub fn level_up_character(character: &Character) -> Character {
    level_up_with_tuning(character, &CombatTuning::STANDARD)
}

/// Advances one level if the character has enough experience; otherwise
/// returns an identical copy. Max health is recomputed under `tuning`.
pub fn level_up_with_tuning(character: &Character, tuning: &CombatTuning) -> Character {
    let needed = experience_for_level(character.level);
    if character.experience < needed {
        return character.clone();
    }

    let mut leveled = character.clone();
    leveled.experience -= needed;
    leveled.level += 1;
    let points = stat_points_for_level(leveled.level);
    leveled.unspent_stat_points += points;
    leveled.refresh_max_health(tuning);

    debug!(
        character = %leveled.name,
        new_level = leveled.level,
        points,
        max_health = leveled.max_health,
        "level up"
    );
    leveled
}

/// Adds experience and applies every level-up it pays for, under the
/// standard tuning.
pub fn apply_experience(character: &Character, experience: u64) -> Character {
    apply_experience_with_tuning(character, experience, &CombatTuning::STANDARD)
}

/// Adds experience and applies every level-up it pays for.
pub fn apply_experience_with_tuning(
    character: &Character,
    experience: u64,
    tuning: &CombatTuning,
) -> Character {
    let mut updated = character.clone();
    updated.experience += experience;
    loop {
        let next = level_up_with_tuning(&updated, tuning);
        if next.level == updated.level {
            return next;
        }
        updated = next;
    }
}

/// Spends one point under the standard tuning. See [`spend_stat_point_with_tuning`].
pub fn spend_stat_point(character: &Character, stat: StatType) -> Character {
    spend_stat_point_with_tuning(character, stat, &CombatTuning::STANDARD)
}

/// Spends one unspent point on `stat`. A no-op when no points remain or the
/// stat is already at the allocation cap.
pub fn spend_stat_point_with_tuning(
    character: &Character,
    stat: StatType,
    tuning: &CombatTuning,
) -> Character {
    if character.unspent_stat_points == 0 || character.stats.get(stat) >= MAX_SPENT_STAT_VALUE {
        return character.clone();
    }

    let mut updated = character.clone();
    updated.unspent_stat_points -= 1;
    updated.stats.increment(stat);
    if stat == StatType::Constitution {
        updated.refresh_max_health(tuning);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn hero() -> Character {
        Character::new(Uuid::nil(), "Hero")
    }

    #[test]
    fn test_experience_for_level() {
        assert_eq!(experience_for_level(1), 100);
        assert_eq!(experience_for_level(2), 150);
        assert_eq!(experience_for_level(3), 225);
        assert_eq!(experience_for_level(4), 337);
    }

    #[test]
    fn test_experience_curve_is_increasing() {
        for level in 1..60 {
            assert!(experience_for_level(level + 1) > experience_for_level(level));
        }
    }

    #[test]
    fn test_stat_points_for_level_bands() {
        assert_eq!(stat_points_for_level(2), 2);
        assert_eq!(stat_points_for_level(20), 2);
        assert_eq!(stat_points_for_level(21), 1);
        assert_eq!(stat_points_for_level(50), 1);
        assert_eq!(stat_points_for_level(51), 1);
        assert_eq!(stat_points_for_level(55), 2);
        assert_eq!(stat_points_for_level(60), 2);
        assert_eq!(stat_points_for_level(61), 1);
    }

    #[test]
    fn test_total_stat_points() {
        assert_eq!(total_stat_points_at_level(1), 0);
        assert_eq!(total_stat_points_at_level(3), 4);
        assert_eq!(total_stat_points_at_level(20), 38);
        assert_eq!(total_stat_points_at_level(22), 40);
    }

    #[test]
    fn test_level_up_without_enough_experience_is_identity() {
        let mut c = hero();
        c.experience = 99;
        assert_eq!(level_up_character(&c), c);
    }

    #[test]
    fn test_level_up_grants_points_and_health_delta() {
        let mut c = hero();
        c.experience = 130;
        c.current_health = 40;

        let leveled = level_up_character(&c);
        assert_eq!(leveled.level, 2);
        assert_eq!(leveled.experience, 30);
        assert_eq!(leveled.unspent_stat_points, 2);
        // max 53 -> 56, current moves by the same +3
        assert_eq!(leveled.max_health, 56);
        assert_eq!(leveled.current_health, 43);
        // input untouched
        assert_eq!(c.level, 1);
    }

    #[test]
    fn test_apply_experience_levels_repeatedly() {
        let c = apply_experience(&hero(), 100 + 150 + 225 + 10);
        assert_eq!(c.level, 4);
        assert_eq!(c.experience, 10);
        assert_eq!(c.unspent_stat_points, 6);
    }

    #[test]
    fn test_spend_with_no_points_is_noop() {
        let c = hero();
        let after = spend_stat_point(&c, StatType::Strength);
        assert_eq!(after.stats, c.stats);
        assert_eq!(after.unspent_stat_points, 0);
    }

    #[test]
    fn test_spend_at_cap_is_noop() {
        let mut c = hero();
        c.unspent_stat_points = 3;
        c.stats.set(StatType::Dexterity, 99);
        let after = spend_stat_point(&c, StatType::Dexterity);
        assert_eq!(after, c);
    }

    #[test]
    fn test_spend_increments_and_decrements() {
        let mut c = hero();
        c.unspent_stat_points = 2;
        let after = spend_stat_point(&c, StatType::Speed);
        assert_eq!(after.stats.get(StatType::Speed), 11);
        assert_eq!(after.unspent_stat_points, 1);
        assert_eq!(after.max_health, c.max_health);
    }

    #[test]
    fn test_spend_constitution_raises_health_by_delta() {
        let mut c = hero();
        c.unspent_stat_points = 1;
        c.current_health = 10;
        let after = spend_stat_point(&c, StatType::Constitution);
        assert_eq!(after.max_health, c.max_health + 3);
        assert_eq!(after.current_health, 13);
    }

    #[test]
    fn test_spending_never_exceeds_cap() {
        let mut c = hero();
        c.unspent_stat_points = 200;
        for _ in 0..200 {
            c = spend_stat_point(&c, StatType::Intelligence);
        }
        assert_eq!(c.stats.get(StatType::Intelligence), 99);
        assert_eq!(c.unspent_stat_points, 200 - 89);
    }

    fn heavy_tuning() -> CombatTuning {
        let mut tuning = CombatTuning::STANDARD;
        tuning.base_health = 200.0;
        tuning
    }

    #[test]
    fn test_level_up_under_custom_tuning_keeps_health_delta() {
        let tuning = heavy_tuning();
        let mut c = hero();
        c.max_health = c.max_health_for(&tuning);
        c.current_health = 51;
        c.experience = 100;

        let leveled = level_up_with_tuning(&c, &tuning);
        assert_eq!(leveled.level, 2);
        // 233 -> 236
        assert_eq!(leveled.max_health, 236);
        assert_eq!(leveled.current_health, 54);
    }

    #[test]
    fn test_apply_experience_with_tuning_never_shrinks_health() {
        let tuning = heavy_tuning();
        let mut c = hero();
        c.max_health = c.max_health_for(&tuning);
        c.current_health = 10;

        let leveled = apply_experience_with_tuning(&c, 100 + 150, &tuning);
        assert_eq!(leveled.level, 3);
        assert_eq!(leveled.max_health, c.max_health + 6);
        assert_eq!(leveled.current_health, 16);
    }

    #[test]
    fn test_spend_constitution_under_custom_tuning() {
        let tuning = heavy_tuning();
        let mut c = hero();
        c.max_health = c.max_health_for(&tuning);
        c.current_health = 100;
        c.unspent_stat_points = 1;

        let after = spend_stat_point_with_tuning(&c, StatType::Constitution, &tuning);
        assert_eq!(after.max_health, c.max_health + 3);
        assert_eq!(after.current_health, 103);
    }
}
