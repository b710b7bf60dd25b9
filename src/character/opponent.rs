//! AI opponent generation for the arena.

use super::attributes::{StatType, Stats};
use super::model::Character;
use super::progression::total_stat_points_at_level;
use crate::core::balance::CombatTuning;
use crate::core::constants::*;
use crate::items::{generate_item_of_type, random_id, EquipmentSlot, ItemCatalog, ItemType, Rarity};
use rand::Rng;
use tracing::{debug, warn};

/// Generates a random opponent name like "Grimfang Brawler".
pub fn generate_opponent_name(rng: &mut impl Rng) -> String {
    let prefixes = [
        "Grim", "Iron", "Ash", "Storm", "Blood", "Stone", "Shadow", "Frost", "Wild", "Dire",
    ];
    let roots = [
        "fang", "hand", "brow", "jaw", "heart", "eye", "mane", "scar", "hide", "tusk",
    ];
    let titles = [
        "Brawler",
        "Duelist",
        "Gladiator",
        "Mercenary",
        "Champion",
        "Reaver",
        "Sellsword",
        "Warden",
        "Zealot",
        "Marauder",
    ];

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let root = roots[rng.gen_range(0..roots.len())];
    let title = titles[rng.gen_range(0..titles.len())];

    format!("{}{} {}", prefix, root, title)
}

/// Best rarity the loot table would let a loser of `level` drop.
pub fn rarity_for_level(level: u32, tuning: &CombatTuning) -> Rarity {
    tuning
        .loot_tiers
        .iter()
        .filter(|tier| level >= tier.min_level)
        .map(|tier| tier.rarity)
        .max()
        .unwrap_or(Rarity::Common)
}

/// Spreads `points` randomly over the five stats without passing the
/// allocation cap. Points that cannot be placed are returned.
pub fn allocate_random_stats(stats: &mut Stats, points: u32, rng: &mut impl Rng) -> u32 {
    let mut remaining = points;
    let mut attempts = 0;
    while remaining > 0 && attempts < OPPONENT_ALLOCATION_ATTEMPTS {
        attempts += 1;
        let stat = StatType::all()[rng.gen_range(0..NUM_STATS)];
        if stats.get(stat) < MAX_SPENT_STAT_VALUE {
            stats.increment(stat);
            remaining -= 1;
        }
    }
    remaining
}

/// Generates an opponent within one level of `player_level`, using the
/// standard tuning and the built-in catalog.
pub fn generate_ai_opponent(player_level: u32, rng: &mut impl Rng) -> Character {
    generate_opponent(
        player_level,
        ItemCatalog::builtin(),
        &CombatTuning::STANDARD,
        rng,
    )
}

/// Generates an opponent at `player_level` plus or minus one (minimum 1).
pub fn generate_opponent(
    player_level: u32,
    catalog: &ItemCatalog,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> Character {
    let level = opponent_level(player_level, rng);
    generate_combatant(level, catalog, tuning, rng)
}

/// Rolls `player_level` plus or minus the spread, kept inside `1..=u32::MAX`.
pub fn opponent_level(player_level: u32, rng: &mut impl Rng) -> u32 {
    let offset = rng.gen_range(-OPPONENT_LEVEL_SPREAD..=OPPONENT_LEVEL_SPREAD);
    (player_level as i64 + offset as i64).clamp(1, u32::MAX as i64) as u32
}

/// Builds a random combatant at exactly `level`.
///
/// Stats start at 10 and receive every point earned up to that level at
/// random. The combatant carries a main-hand weapon and body armor at the
/// best rarity its level unlocks, and starts at full health.
pub fn generate_combatant(
    level: u32,
    catalog: &ItemCatalog,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> Character {
    let level = level.max(1);
    let mut stats = Stats::new();
    let points = total_stat_points_at_level(level);
    let leftover = allocate_random_stats(&mut stats, points, rng);

    let id = random_id(rng);
    let name = generate_opponent_name(rng);
    let mut combatant = Character::with_stats_tuned(id, name, level, stats, tuning);
    combatant.unspent_stat_points = leftover;

    let rarity = rarity_for_level(level, tuning);
    for (slot, item_type) in [
        (EquipmentSlot::MainHand, ItemType::Weapon),
        (EquipmentSlot::Armor, ItemType::Armor),
    ] {
        let Some(item) = generate_item_of_type(catalog, item_type, rarity, level, tuning, rng)
        else {
            continue;
        };
        if let Err(err) = combatant.equipment.equip(slot, item) {
            warn!(%err, "catalog item could not be equipped");
        }
    }

    combatant.max_health = combatant.max_health_for(tuning);
    combatant.heal_full();

    debug!(
        combatant = %combatant.name,
        combatant_level = combatant.level,
        ?rarity,
        max_health = combatant.max_health,
        "combatant generated"
    );
    combatant
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_opponent_level_within_spread() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let opp = generate_ai_opponent(10, &mut rng);
            assert!((9..=11).contains(&opp.level));
        }
    }

    #[test]
    fn test_level_one_player_never_gets_level_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..50 {
            let opp = generate_ai_opponent(1, &mut rng);
            assert!(opp.level == 1 || opp.level == 2);
        }
    }

    #[test]
    fn test_opponent_level_saturates_at_max_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..50 {
            let level = opponent_level(u32::MAX, &mut rng);
            assert!(level >= u32::MAX - 1);
        }
    }

    #[test]
    fn test_generate_combatant_uses_custom_health_table() {
        let mut tuning = CombatTuning::STANDARD;
        tuning.base_health = 200.0;
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let c = generate_combatant(3, ItemCatalog::builtin(), &tuning, &mut rng);
        assert_eq!(c.max_health, c.max_health_for(&tuning));
        assert!(c.max_health > 200);
    }

    #[test]
    fn test_stat_points_fully_allocated() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let opp = generate_ai_opponent(15, &mut rng);
        let expected = 5 * BASE_STAT_VALUE + total_stat_points_at_level(opp.level);
        assert_eq!(opp.stats.total() + opp.unspent_stat_points, expected);
        assert_eq!(opp.unspent_stat_points, 0);
    }

    #[test]
    fn test_allocation_respects_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut stats = Stats::uniform(98);
        let leftover = allocate_random_stats(&mut stats, 20, &mut rng);
        assert_eq!(leftover, 15);
        for stat in StatType::all() {
            assert_eq!(stats.get(stat), 99);
        }
    }

    #[test]
    fn test_opponent_is_equipped_and_healthy() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let opp = generate_ai_opponent(12, &mut rng);
        assert!(opp.equipment.main_hand.is_some());
        assert!(opp.equipment.armor.is_some());
        assert_eq!(opp.current_health, opp.max_health);
        assert_eq!(
            opp.max_health,
            opp.max_health_for(&CombatTuning::STANDARD)
        );
    }

    #[test]
    fn test_rarity_for_level() {
        let t = &CombatTuning::STANDARD;
        assert_eq!(rarity_for_level(1, t), Rarity::Common);
        assert_eq!(rarity_for_level(5, t), Rarity::Uncommon);
        assert_eq!(rarity_for_level(19, t), Rarity::Rare);
        assert_eq!(rarity_for_level(45, t), Rarity::Legendary);
    }

    #[test]
    fn test_same_seed_same_opponent() {
        let a = generate_ai_opponent(7, &mut ChaCha8Rng::seed_from_u64(99));
        let b = generate_ai_opponent(7, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_combatant_exact_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let c = generate_combatant(25, ItemCatalog::builtin(), &CombatTuning::STANDARD, &mut rng);
        assert_eq!(c.level, 25);
        assert!(c.equipment.main_hand.as_ref().is_some_and(|w| w.level == 25));
    }

    #[test]
    fn test_name_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let name = generate_opponent_name(&mut rng);
        assert_eq!(name.split(' ').count(), 2);
    }
}
