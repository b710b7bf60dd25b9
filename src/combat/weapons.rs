//! Weapon configuration: which attacks a loadout makes per turn and whether
//! its off-hand blocks.

use super::types::{ShieldBlock, WeaponAttack, WeaponConfiguration};
use crate::core::balance::CombatTuning;
use crate::items::{Equipment, Item, ItemType, OffHandRole};

/// Whether an off-hand item acts as a shield.
///
/// An explicit `off_hand_role` wins. Without one, shields are recognised by
/// type, by a positive block chance, or by carrying armor with little damage.
pub fn is_shield(item: &Item, tuning: &CombatTuning) -> bool {
    if let Some(role) = item.off_hand_role {
        return role == OffHandRole::Shield;
    }
    item.item_type == ItemType::Shield
        || item.block_chance.is_some_and(|b| b > 0.0)
        || (item.armor() > 0 && item.damage() < tuning.light_off_hand_damage)
}

/// Block parameters for a shield: explicit chance or `25 + armor * 2`,
/// capped, and a flat `floor(armor * 1.5)` reduction.
pub fn shield_block(item: &Item, tuning: &CombatTuning) -> ShieldBlock {
    let armor = item.armor() as f64;
    let chance = item
        .block_chance
        .unwrap_or(tuning.shield_base_block_chance + armor * tuning.shield_block_per_armor);
    ShieldBlock {
        block_chance: chance.clamp(0.0, tuning.max_block_chance),
        block_amount: (armor * tuning.block_amount_per_armor).floor() as u32,
    }
}

/// Resolves the ordered attack list and shield state for `equipment`.
///
/// Stateless; safe to call for both combatants every turn.
pub fn resolve_weapon_configuration(
    equipment: &Equipment,
    tuning: &CombatTuning,
) -> WeaponConfiguration {
    let mut attacks = Vec::new();

    if let Some(main) = &equipment.main_hand {
        attacks.push(WeaponAttack::from_item(
            main,
            1.0,
            1.0,
            tuning.unarmed_weapon_speed,
        ));
        if main.is_two_handed() {
            return WeaponConfiguration {
                attacks,
                shield: None,
                is_two_handed: true,
            };
        }
    }

    let mut shield = None;
    if let Some(off) = &equipment.off_hand {
        if is_shield(off, tuning) {
            shield = Some(shield_block(off, tuning));
        } else if !off.is_two_handed() {
            let mut attack = WeaponAttack::from_item(
                off,
                tuning.off_hand_damage_multiplier,
                tuning.off_hand_crit_multiplier,
                tuning.unarmed_weapon_speed,
            );
            attack.is_off_hand = true;
            attacks.push(attack);
        }
    }

    if attacks.is_empty() {
        attacks.push(WeaponAttack::fists(tuning.unarmed_weapon_speed));
    }

    WeaponConfiguration {
        attacks,
        shield,
        is_two_handed: false,
    }
}

/// [`resolve_weapon_configuration`] with the standard tuning table.
pub fn get_weapon_configuration(equipment: &Equipment) -> WeaponConfiguration {
    resolve_weapon_configuration(equipment, &CombatTuning::STANDARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{EquipmentSlot, Handedness, Rarity};

    fn sword(damage: u32) -> Item {
        let mut item = Item::new("Sword", ItemType::Weapon, Rarity::Common);
        item.damage = Some(damage);
        item.critical_chance = Some(10.0);
        item.handedness = Some(Handedness::OneHanded);
        item.weapon_speed = Some(8);
        item
    }

    fn greataxe() -> Item {
        let mut item = Item::new("Greataxe", ItemType::Weapon, Rarity::Common);
        item.damage = Some(20);
        item.handedness = Some(Handedness::TwoHanded);
        item
    }

    fn buckler(armor: u32, block: Option<f64>) -> Item {
        let mut item = Item::new("Buckler", ItemType::Shield, Rarity::Common);
        item.armor = Some(armor);
        item.block_chance = block;
        item
    }

    fn equip(main: Option<Item>, off: Option<Item>) -> Equipment {
        let mut eq = Equipment::new();
        if let Some(m) = main {
            eq.equip(EquipmentSlot::MainHand, m).unwrap();
        }
        if let Some(o) = off {
            eq.equip(EquipmentSlot::OffHand, o).unwrap();
        }
        eq
    }

    #[test]
    fn test_no_weapons_fights_with_fists() {
        let config = get_weapon_configuration(&Equipment::new());
        assert_eq!(config.attacks.len(), 1);
        assert_eq!(config.attacks[0].name, "Fists");
        assert_eq!(config.attacks[0].damage, 0.0);
        assert_eq!(config.attacks[0].weapon_speed, 5);
        assert!(config.shield.is_none());
    }

    #[test]
    fn test_single_main_hand() {
        let config = get_weapon_configuration(&equip(Some(sword(10)), None));
        assert_eq!(config.attacks.len(), 1);
        assert_eq!(config.attacks[0].damage, 10.0);
        assert_eq!(config.attacks[0].weapon_speed, 8);
        assert!(!config.is_dual_wielding());
    }

    #[test]
    fn test_two_handed_ignores_off_hand() {
        let config = get_weapon_configuration(&equip(Some(greataxe()), Some(sword(10))));
        assert!(config.is_two_handed);
        assert_eq!(config.attacks.len(), 1);
        assert_eq!(config.attacks[0].name, "Greataxe");
        assert!(config.shield.is_none());
    }

    #[test]
    fn test_dual_wield_off_hand_penalty() {
        let config = get_weapon_configuration(&equip(Some(sword(10)), Some(sword(8))));
        assert!(config.is_dual_wielding());
        let off = &config.attacks[1];
        assert!(off.is_off_hand);
        assert!((off.damage - 6.0).abs() < 1e-9);
        assert!((off.critical_chance - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_shield_by_type_with_fallback_block_chance() {
        let config = get_weapon_configuration(&equip(Some(sword(10)), Some(buckler(6, None))));
        let shield = config.shield.unwrap();
        assert_eq!(shield.block_chance, 37.0);
        assert_eq!(shield.block_amount, 9);
        assert_eq!(config.attacks.len(), 1);
    }

    #[test]
    fn test_shield_block_chance_capped() {
        let explicit = shield_block(&buckler(2, Some(85.0)), &CombatTuning::STANDARD);
        assert_eq!(explicit.block_chance, 60.0);
        let heavy = shield_block(&buckler(30, None), &CombatTuning::STANDARD);
        assert_eq!(heavy.block_chance, 60.0);
        assert_eq!(heavy.block_amount, 45);
    }

    #[test]
    fn test_light_armored_weapon_is_shield_by_heuristic() {
        let mut parry = sword(3);
        parry.armor = Some(2);
        assert!(is_shield(&parry, &CombatTuning::STANDARD));

        let mut spiked = sword(6);
        spiked.armor = Some(2);
        assert!(!is_shield(&spiked, &CombatTuning::STANDARD));
    }

    #[test]
    fn test_explicit_role_overrides_heuristic() {
        let mut parry = sword(3);
        parry.armor = Some(2);
        parry.off_hand_role = Some(OffHandRole::Weapon);
        assert!(!is_shield(&parry, &CombatTuning::STANDARD));

        let config = get_weapon_configuration(&equip(Some(sword(10)), Some(parry)));
        assert_eq!(config.attacks.len(), 2);
        assert!(config.shield.is_none());
    }

    #[test]
    fn test_off_hand_only_weapon_attacks_alone() {
        let config = get_weapon_configuration(&equip(None, Some(sword(8))));
        assert_eq!(config.attacks.len(), 1);
        assert!(config.attacks[0].is_off_hand);
    }

    #[test]
    fn test_shield_only_adds_fists() {
        let config = get_weapon_configuration(&equip(None, Some(buckler(4, None))));
        assert_eq!(config.attacks[0].name, "Fists");
        assert!(config.shield.is_some());
    }
}
