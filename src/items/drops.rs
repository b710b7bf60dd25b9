//! Post-battle loot rolls.
//!
//! Independent of any shop or monster tables: one Bernoulli trial per rarity
//! tier, each gated by the loser's level, all scaled by the level gap.

use super::catalog::ItemCatalog;
use super::generation::generate_item;
use super::types::Item;
use crate::core::balance::CombatTuning;
use rand::Rng;
use tracing::trace;

/// Multiplier on every tier's drop chance for a given
/// `level_difference = winner.level - loser.level`.
///
/// Fighting down shrinks chances (floor 0.5), fighting up grows them (cap 2.0).
pub fn loot_chance_multiplier(level_difference: i32, tuning: &CombatTuning) -> f64 {
    if level_difference > 0 {
        (1.0 - level_difference as f64 * tuning.loot_penalty_per_level)
            .max(tuning.min_loot_multiplier)
    } else if level_difference < 0 {
        (1.0 + level_difference.unsigned_abs() as f64 * tuning.loot_bonus_per_level)
            .min(tuning.max_loot_multiplier)
    } else {
        1.0
    }
}

/// Rolls every rarity tier independently; several tiers may hit at once.
/// Dropped items are instantiated at `max(1, loser_level + {-1, 0, 1})`.
pub fn generate_loot_drops(
    loser_level: u32,
    level_difference: i32,
    catalog: &ItemCatalog,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> Vec<Item> {
    let multiplier = loot_chance_multiplier(level_difference, tuning);
    let mut drops = Vec::new();

    for tier in &tuning.loot_tiers {
        if loser_level < tier.min_level {
            continue;
        }
        if rng.gen::<f64>() >= tier.chance * multiplier {
            continue;
        }

        let level =
            (loser_level as i64 + rng.gen_range(-1..=1)).clamp(1, u32::MAX as i64) as u32;
        match generate_item(catalog, tier.rarity, level, tuning, rng) {
            Some(item) => {
                trace!(
                    item = %item.name,
                    rarity = tier.rarity.name(),
                    item_level = level,
                    "loot dropped"
                );
                drops.push(item);
            }
            None => trace!(rarity = tier.rarity.name(), "no catalog items for rolled rarity"),
        }
    }

    drops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{ItemType, Rarity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_multiplier_even_fight() {
        assert_eq!(loot_chance_multiplier(0, &CombatTuning::STANDARD), 1.0);
    }

    #[test]
    fn test_multiplier_fighting_down_floors_at_half() {
        let t = CombatTuning::STANDARD;
        assert!((loot_chance_multiplier(2, &t) - 0.8).abs() < 1e-9);
        assert!((loot_chance_multiplier(5, &t) - 0.5).abs() < 1e-9);
        assert!((loot_chance_multiplier(30, &t) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_fighting_up_caps_at_double() {
        let t = CombatTuning::STANDARD;
        assert!((loot_chance_multiplier(-3, &t) - 1.3).abs() < 1e-9);
        assert!((loot_chance_multiplier(-10, &t) - 2.0).abs() < 1e-9);
        assert!((loot_chance_multiplier(-40, &t) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_level_loser_only_drops_common() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let drops = generate_loot_drops(
                4,
                0,
                ItemCatalog::builtin(),
                &CombatTuning::STANDARD,
                &mut rng,
            );
            assert!(drops.len() <= 1);
            assert!(drops.iter().all(|i| i.rarity == Rarity::Common));
        }
    }

    #[test]
    fn test_drop_levels_stay_near_loser_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..300 {
            for item in generate_loot_drops(
                1,
                -5,
                ItemCatalog::builtin(),
                &CombatTuning::STANDARD,
                &mut rng,
            ) {
                assert!(item.level == 1 || item.level == 2);
            }
            for item in generate_loot_drops(
                40,
                0,
                ItemCatalog::builtin(),
                &CombatTuning::STANDARD,
                &mut rng,
            ) {
                assert!((39..=41).contains(&item.level));
            }
        }
    }

    #[test]
    fn test_common_drop_rate_near_35_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let trials = 5000;
        let mut hits = 0;
        for _ in 0..trials {
            if !generate_loot_drops(
                1,
                0,
                ItemCatalog::builtin(),
                &CombatTuning::STANDARD,
                &mut rng,
            )
            .is_empty()
            {
                hits += 1;
            }
        }
        assert!(
            hits > 1500 && hits < 2000,
            "Expected ~35% drops, got {hits}/{trials}"
        );
    }

    #[test]
    fn test_high_level_can_drop_multiple_tiers() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut max_drops = 0;
        let mut saw_legendary = false;
        for _ in 0..5000 {
            let drops = generate_loot_drops(
                35,
                -10,
                ItemCatalog::builtin(),
                &CombatTuning::STANDARD,
                &mut rng,
            );
            max_drops = max_drops.max(drops.len());
            saw_legendary |= drops.iter().any(|i| i.rarity == Rarity::Legendary);
        }
        assert!(max_drops >= 2, "tiers should not be mutually exclusive");
        assert!(saw_legendary);
    }

    #[test]
    fn test_rolled_rarity_missing_from_catalog_skips() {
        let mut sword = Item::new("Sword", ItemType::Weapon, Rarity::Common);
        sword.damage = Some(5);
        let catalog = ItemCatalog::new(vec![sword]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let drops =
                generate_loot_drops(50, -10, &catalog, &CombatTuning::STANDARD, &mut rng);
            assert!(drops.iter().all(|i| i.rarity == Rarity::Common));
        }
    }
}
