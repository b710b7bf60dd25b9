//! Stat derivation: character + equipment -> [`CombatStats`].
//!
//! Pure functions of their input. Gem and equipment stat bonuses are added to
//! the base attributes before the diminishing-returns curve, then every
//! formula reads the curved values.

use super::types::{CombatStats, WeaponAttack, WeaponConfiguration};
use super::weapons::resolve_weapon_configuration;
use crate::character::attributes::{EffectiveStats, StatBonus, StatType, Stats};
use crate::character::Character;
use crate::core::balance::CombatTuning;
use crate::items::{DamageKind, Equipment, Item};
use serde::{Deserialize, Serialize};

/// Flat combat modifiers summed over active equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentModifiers {
    pub armor: u32,
    /// Listed weapon damage of every attack, off-hand penalty included.
    pub weapon_damage: f64,
    pub critical_chance: f64,
    pub dodge_chance: f64,
    pub accuracy: f64,
    pub block_chance: f64,
}

/// Display breakdown of where a character's attributes come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentBreakdown {
    pub base_stats: Stats,
    pub gem_stats: StatBonus,
    pub equipment_stats: StatBonus,
    /// Base + gems + equipment, after diminishing returns.
    pub total_stats: EffectiveStats,
    pub equipment_bonuses: EquipmentModifiers,
}

/// Sums armor, crit, dodge, accuracy and weapon damage over active items.
///
/// Crit from the hands comes from the resolved attacks (so the off-hand
/// penalty applies); a shield's own crit still counts.
pub fn equipment_modifiers(
    equipment: &Equipment,
    config: &WeaponConfiguration,
) -> EquipmentModifiers {
    let mut mods = EquipmentModifiers::default();

    for item in equipment.iter_active() {
        mods.armor += item.armor();
        mods.dodge_chance += item.dodge_chance.unwrap_or(0.0);
        mods.accuracy += item.accuracy.unwrap_or(0.0);
    }
    for item in equipment.iter_worn() {
        mods.critical_chance += item.critical_chance.unwrap_or(0.0);
    }
    if let Some(shield) = config.shield {
        mods.block_chance = shield.block_chance;
        if let Some(off) = equipment.active_off_hand() {
            mods.critical_chance += off.critical_chance.unwrap_or(0.0);
        }
    }
    for attack in &config.attacks {
        mods.weapon_damage += attack.damage;
        mods.critical_chance += attack.critical_chance;
    }
    mods
}

/// Weapon damage an attack contributes at resolution time, after the
/// two-handed penalty and the global weapon scale-down.
pub fn effective_attack_damage(
    attack: &WeaponAttack,
    config: &WeaponConfiguration,
    tuning: &CombatTuning,
) -> f64 {
    let hands = if config.is_two_handed {
        tuning.two_handed_damage_multiplier
    } else {
        1.0
    };
    attack.damage * hands * tuning.weapon_damage_scale
}

fn hand_items(equipment: &Equipment) -> impl Iterator<Item = &Item> {
    [equipment.main_hand.as_ref(), equipment.active_off_hand()]
        .into_iter()
        .flatten()
}

/// Intelligence scaling for a magic loadout, or `None` if no hand item is magic.
fn magic_scaling(equipment: &Equipment, tuning: &CombatTuning) -> Option<f64> {
    hand_items(equipment)
        .filter_map(|item| match item.damage_kind {
            DamageKind::Magic {
                intelligence_scaling,
                ..
            } => Some(intelligence_scaling.unwrap_or(tuning.intelligence_damage_scaling)),
            DamageKind::Physical => None,
        })
        .reduce(f64::max)
}

/// Magic bonus of a non-attacking off-hand focus.
fn off_hand_magic_bonus(equipment: &Equipment, config: &WeaponConfiguration) -> u32 {
    match (config.shield, equipment.active_off_hand()) {
        (Some(_), Some(off)) => off.damage_kind.bonus_damage(),
        _ => 0,
    }
}

/// Derives combat stats for one character under `tuning`.
pub fn derive_combat_stats(character: &Character, tuning: &CombatTuning) -> CombatStats {
    let eff = character.effective_stats(tuning);
    let strength = eff.get(StatType::Strength);
    let dexterity = eff.get(StatType::Dexterity);
    let intelligence = eff.get(StatType::Intelligence);
    let speed = eff.get(StatType::Speed);

    let config = resolve_weapon_configuration(&character.equipment, tuning);
    let mods = equipment_modifiers(&character.equipment, &config);

    let max_health = character.max_health_for(tuning);
    let health = character.current_health.min(max_health);

    let scaling = magic_scaling(&character.equipment, tuning);
    let is_magic_weapon = scaling.is_some();
    let magic_damage_bonus = if is_magic_weapon {
        off_hand_magic_bonus(&character.equipment, &config)
    } else {
        0
    };

    let level_damage = (character.level as f64 * tuning.level_damage_scaling).floor();
    let stat_damage = match scaling {
        Some(scaling) => (intelligence * scaling).floor() + magic_damage_bonus as f64,
        None => (strength * tuning.strength_damage_scaling).floor(),
    } + level_damage;

    // Critical: equipment + DEX, dual-wield and magic bonuses, capped
    let mut critical_chance = mods.critical_chance + (dexterity * tuning.crit_per_dexterity).floor();
    if config.is_dual_wielding() {
        critical_chance += tuning.dual_wield_crit_bonus;
    }
    if is_magic_weapon {
        critical_chance += (intelligence * tuning.magic_crit_per_intelligence).floor();
    }

    let dodge = mods.dodge_chance
        + (speed * tuning.dodge_per_speed).floor()
        + (dexterity * tuning.dodge_per_dexterity).floor();

    let mut accuracy =
        tuning.base_accuracy + (dexterity * tuning.accuracy_per_dexterity).floor() + mods.accuracy;
    if is_magic_weapon {
        accuracy += (intelligence * tuning.magic_accuracy_per_intelligence).floor();
    }

    let weapon_damage = config
        .attacks
        .iter()
        .map(|a| effective_attack_damage(a, &config, tuning))
        .sum();

    CombatStats {
        health,
        max_health,
        damage: stat_damage as u32,
        min_damage: (stat_damage * tuning.damage_band_min).floor() as u32,
        max_damage: (stat_damage * tuning.damage_band_max).floor() as u32,
        weapon_damage,
        armor: mods.armor,
        accuracy: accuracy.clamp(0.0, tuning.max_accuracy),
        dodge: dodge.clamp(0.0, tuning.max_dodge_chance),
        critical_chance: critical_chance.clamp(0.0, tuning.max_crit_chance),
        speed: speed.floor() as u32,
        is_magic_weapon,
        magic_damage_bonus,
        is_dual_wielding: config.is_dual_wielding(),
        is_two_handed: config.is_two_handed,
    }
}

/// [`derive_combat_stats`] with the standard tuning table.
pub fn calculate_combat_stats(character: &Character) -> CombatStats {
    derive_combat_stats(character, &CombatTuning::STANDARD)
}

/// Breaks a character's attributes down by source, for display.
pub fn equipment_breakdown(character: &Character, tuning: &CombatTuning) -> EquipmentBreakdown {
    let config = resolve_weapon_configuration(&character.equipment, tuning);
    EquipmentBreakdown {
        base_stats: character.stats,
        gem_stats: character.gem_bonus(),
        equipment_stats: character.equipment_bonus(),
        total_stats: character.effective_stats(tuning),
        equipment_bonuses: equipment_modifiers(&character.equipment, &config),
    }
}

/// [`equipment_breakdown`] with the standard tuning table.
pub fn calculate_equipment_bonuses(character: &Character) -> EquipmentBreakdown {
    equipment_breakdown(character, &CombatTuning::STANDARD)
}
