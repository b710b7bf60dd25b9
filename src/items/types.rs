use crate::character::attributes::StatBonus;
use crate::core::balance::CombatTuning;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Armor,
    Helmet,
    Boots,
    Accessory,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 6] {
        [
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Armor,
            EquipmentSlot::Helmet,
            EquipmentSlot::Boots,
            EquipmentSlot::Accessory,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Shield,
    Armor,
    Helmet,
    Boots,
    Accessory,
    /// Consumable that grants a temporary stat effect.
    Gem,
}

impl ItemType {
    /// Whether an item of this type may be placed in `slot`.
    pub fn fits(&self, slot: EquipmentSlot) -> bool {
        matches!(
            (self, slot),
            (ItemType::Weapon, EquipmentSlot::MainHand)
                | (ItemType::Weapon, EquipmentSlot::OffHand)
                | (ItemType::Shield, EquipmentSlot::OffHand)
                | (ItemType::Armor, EquipmentSlot::Armor)
                | (ItemType::Helmet, EquipmentSlot::Helmet)
                | (ItemType::Boots, EquipmentSlot::Boots)
                | (ItemType::Accessory, EquipmentSlot::Accessory)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    pub fn all() -> [Rarity; 5] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handedness {
    OneHanded,
    TwoHanded,
}

/// How a weapon deals its damage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DamageKind {
    #[default]
    Physical,
    Magic {
        /// Intelligence to stat damage ratio. `None` uses the tuning default.
        #[serde(default)]
        intelligence_scaling: Option<f64>,
        /// Flat damage added to this weapon's attacks.
        #[serde(default)]
        bonus_damage: u32,
    },
}

impl DamageKind {
    pub fn is_magic(&self) -> bool {
        matches!(self, DamageKind::Magic { .. })
    }

    pub fn bonus_damage(&self) -> u32 {
        match self {
            DamageKind::Physical => 0,
            DamageKind::Magic { bonus_damage, .. } => *bonus_damage,
        }
    }
}

/// Explicit classification for off-hand eligible items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffHandRole {
    Weapon,
    Shield,
}

/// Wear on an item. Tracked for the save layer; combat never consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durability {
    pub current: u32,
    pub max: u32,
}

impl Durability {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// An item template or a level-instantiated copy of one.
///
/// IMPORTANT: optional combat modifiers use `#[serde(default)]` so catalog
/// entries only need to list the fields they actually set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub name: String,
    pub item_type: ItemType,
    pub rarity: Rarity,
    #[serde(default = "default_item_level")]
    pub level: u32,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub stat_bonus: StatBonus,
    #[serde(default)]
    pub damage: Option<u32>,
    #[serde(default)]
    pub armor: Option<u32>,
    #[serde(default)]
    pub critical_chance: Option<f64>,
    #[serde(default)]
    pub dodge_chance: Option<f64>,
    #[serde(default)]
    pub block_chance: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub handedness: Option<Handedness>,
    #[serde(default)]
    pub weapon_speed: Option<u32>,
    #[serde(default)]
    pub damage_kind: DamageKind,
    #[serde(default)]
    pub off_hand_role: Option<OffHandRole>,
    #[serde(default)]
    pub durability: Option<Durability>,
    /// Battles a gem's effect lasts. Only meaningful for `ItemType::Gem`.
    #[serde(default)]
    pub gem_battles: Option<u32>,
}

fn default_item_level() -> u32 {
    1
}

impl Item {
    /// Bare item with no modifiers. Catalog code fills in the rest.
    pub fn new(name: impl Into<String>, item_type: ItemType, rarity: Rarity) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            item_type,
            rarity,
            level: 1,
            price: 0,
            stat_bonus: StatBonus::default(),
            damage: None,
            armor: None,
            critical_chance: None,
            dodge_chance: None,
            block_chance: None,
            accuracy: None,
            handedness: None,
            weapon_speed: None,
            damage_kind: DamageKind::Physical,
            off_hand_role: None,
            durability: None,
            gem_battles: None,
        }
    }

    pub fn damage(&self) -> u32 {
        self.damage.unwrap_or(0)
    }

    pub fn armor(&self) -> u32 {
        self.armor.unwrap_or(0)
    }

    pub fn is_two_handed(&self) -> bool {
        self.handedness == Some(Handedness::TwoHanded)
    }

    pub fn is_magic(&self) -> bool {
        self.damage_kind.is_magic()
    }

    /// Instantiates this template at `level`: damage and armor grow by
    /// `item_scaling_per_level` per level above 1, price scales linearly.
    /// A durable template yields a copy at full durability.
    pub fn at_level(&self, level: u32, id: Uuid, tuning: &CombatTuning) -> Item {
        let level = level.max(1);
        let growth = 1.0 + (level - 1) as f64 * tuning.item_scaling_per_level;
        let scale = |v: u32| (v as f64 * growth).floor() as u32;

        let mut item = self.clone();
        item.id = id;
        item.level = level;
        item.price = self.price.saturating_mul(level);
        item.damage = self.damage.map(scale);
        item.armor = self.armor.map(scale);
        item.durability = self.durability.map(|d| Durability::new(d.max));
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_rarity_name() {
        assert_eq!(Rarity::Uncommon.name(), "Uncommon");
        assert_eq!(Rarity::Legendary.name(), "Legendary");
    }

    #[test]
    fn test_item_type_fits_slot() {
        assert!(ItemType::Weapon.fits(EquipmentSlot::MainHand));
        assert!(ItemType::Weapon.fits(EquipmentSlot::OffHand));
        assert!(ItemType::Shield.fits(EquipmentSlot::OffHand));
        assert!(!ItemType::Shield.fits(EquipmentSlot::MainHand));
        assert!(!ItemType::Gem.fits(EquipmentSlot::Accessory));
        assert!(ItemType::Boots.fits(EquipmentSlot::Boots));
    }

    #[test]
    fn test_at_level_scales_damage_armor_and_price() {
        let mut sword = Item::new("Sword", ItemType::Weapon, Rarity::Common);
        sword.damage = Some(10);
        sword.armor = Some(3);
        sword.price = 40;

        let scaled = sword.at_level(11, Uuid::from_u128(7), &CombatTuning::STANDARD);
        assert_eq!(scaled.level, 11);
        assert_eq!(scaled.damage, Some(20));
        assert_eq!(scaled.armor, Some(6));
        assert_eq!(scaled.price, 440);
        assert_eq!(scaled.id, Uuid::from_u128(7));
        // optional fields stay unset
        assert_eq!(scaled.critical_chance, None);
    }

    #[test]
    fn test_at_level_restores_full_durability() {
        let mut mail = Item::new("Chain Mail", ItemType::Armor, Rarity::Uncommon);
        mail.armor = Some(8);
        mail.durability = Some(Durability { current: 3, max: 40 });

        let fresh = mail.at_level(4, Uuid::nil(), &CombatTuning::STANDARD);
        assert_eq!(fresh.durability, Some(Durability::new(40)));
        assert_eq!(fresh.durability.map(|d| d.current), Some(40));

        let plain = Item::new("Ring", ItemType::Accessory, Rarity::Common);
        assert_eq!(plain.at_level(4, Uuid::nil(), &CombatTuning::STANDARD).durability, None);
    }

    #[test]
    fn test_at_level_zero_treated_as_one() {
        let mut dagger = Item::new("Dagger", ItemType::Weapon, Rarity::Common);
        dagger.damage = Some(4);
        let scaled = dagger.at_level(0, Uuid::nil(), &CombatTuning::STANDARD);
        assert_eq!(scaled.level, 1);
        assert_eq!(scaled.damage, Some(4));
    }

    #[test]
    fn test_catalog_json_needs_only_set_fields() {
        let json = r#"{
            "name": "Ember Staff",
            "itemType": "weapon",
            "rarity": "rare",
            "damage": 12,
            "handedness": "two-handed",
            "damageKind": { "kind": "magic", "bonus_damage": 4 }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.level, 1);
        assert!(item.is_two_handed());
        assert!(item.is_magic());
        assert_eq!(item.damage_kind.bonus_damage(), 4);
        assert_eq!(item.armor(), 0);
    }
}
