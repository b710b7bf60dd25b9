//! Base item catalog consumed by loot drops and opponent generation.
//!
//! The shipped catalog is product data; the engine only needs lookups by
//! rarity and type. Content teams can swap in their own list via JSON.

use super::types::{DamageKind, Handedness, Item, ItemType, OffHandRole, Rarity};
use crate::character::attributes::{StatBonus, StatType};
use crate::core::error::ArenaError;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

static BUILTIN: OnceLock<ItemCatalog> = OnceLock::new();

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The built-in base catalog, built on first use.
    pub fn builtin() -> &'static ItemCatalog {
        BUILTIN.get_or_init(|| ItemCatalog::new(builtin_items()))
    }

    /// Parses a catalog from a JSON array of items.
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let items: Vec<Item> = serde_json::from_str(json).map_err(ArenaError::Catalog)?;
        Ok(Self { items })
    }

    pub fn by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.rarity == rarity)
    }

    pub fn by_type(&self, item_type: ItemType) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }

    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn weapon(name: &str, rarity: Rarity, damage: u32, speed: u32, hands: Handedness) -> Item {
    let mut item = Item::new(name, ItemType::Weapon, rarity);
    item.damage = Some(damage);
    item.weapon_speed = Some(speed);
    item.handedness = Some(hands);
    item
}

fn magic_weapon(name: &str, rarity: Rarity, damage: u32, bonus: u32, hands: Handedness) -> Item {
    let mut item = weapon(name, rarity, damage, 6, hands);
    item.damage_kind = DamageKind::Magic {
        intelligence_scaling: None,
        bonus_damage: bonus,
    };
    item
}

fn shield(name: &str, rarity: Rarity, armor: u32, block: Option<f64>) -> Item {
    let mut item = Item::new(name, ItemType::Shield, rarity);
    item.armor = Some(armor);
    item.block_chance = block;
    item.off_hand_role = Some(OffHandRole::Shield);
    item
}

fn worn(name: &str, item_type: ItemType, rarity: Rarity, armor: u32) -> Item {
    let mut item = Item::new(name, item_type, rarity);
    item.armor = Some(armor);
    item
}

fn priced(mut item: Item, price: u32) -> Item {
    item.price = price;
    item
}

fn builtin_items() -> Vec<Item> {
    use Handedness::{OneHanded, TwoHanded};
    use Rarity::*;

    let mut items = vec![
        // Common
        priced(weapon("Rusty Sword", Common, 6, 8, OneHanded), 20),
        priced(weapon("Worn Dagger", Common, 4, 12, OneHanded), 15),
        priced(weapon("Wood Axe", Common, 10, 5, TwoHanded), 25),
        priced(magic_weapon("Apprentice Wand", Common, 3, 2, OneHanded), 25),
        priced(shield("Plank Shield", Common, 3, None), 18),
        priced(worn("Padded Vest", ItemType::Armor, Common, 4), 20),
        priced(worn("Leather Cap", ItemType::Helmet, Common, 2), 10),
        priced(worn("Sandals", ItemType::Boots, Common, 1), 8),
        // Uncommon
        priced(weapon("Iron Longsword", Uncommon, 9, 8, OneHanded), 60),
        priced(weapon("Hunter's Knife", Uncommon, 7, 12, OneHanded), 55),
        priced(magic_weapon("Oak Staff", Uncommon, 8, 4, TwoHanded), 70),
        priced(shield("Iron Buckler", Uncommon, 5, Some(30.0)), 50),
        priced(worn("Chain Shirt", ItemType::Armor, Uncommon, 8), 65),
        priced(worn("Iron Helm", ItemType::Helmet, Uncommon, 4), 35),
        // Rare
        priced(weapon("Steel Warhammer", Rare, 18, 4, TwoHanded), 160),
        priced(weapon("Duelist's Rapier", Rare, 12, 11, OneHanded), 150),
        priced(magic_weapon("Ember Rod", Rare, 10, 7, OneHanded), 170),
        priced(worn("Scale Mail", ItemType::Armor, Rare, 13), 150),
        // Epic
        priced(weapon("Nightfang", Epic, 17, 13, OneHanded), 420),
        priced(magic_weapon("Stormcaller Staff", Epic, 20, 12, TwoHanded), 460),
        priced(shield("Tower Aegis", Epic, 12, Some(45.0)), 380),
        priced(worn("Warden Plate", ItemType::Armor, Epic, 20), 400),
        // Legendary
        priced(weapon("Dawnbreaker", Legendary, 30, 7, TwoHanded), 1200),
        priced(magic_weapon("Codex of Ash", Legendary, 14, 18, OneHanded), 1150),
    ];

    let mut boots = worn("Windstep Boots", ItemType::Boots, Rare, 3);
    boots.dodge_chance = Some(4.0);
    boots.stat_bonus = StatBonus::new().with(StatType::Speed, 4);
    items.push(priced(boots, 140));

    let mut ring = Item::new("Ring of Precision", ItemType::Accessory, Uncommon);
    ring.critical_chance = Some(3.0);
    ring.accuracy = Some(2.0);
    ring.stat_bonus = StatBonus::new().with(StatType::Dexterity, 2);
    items.push(priced(ring, 75));

    let mut amulet = Item::new("Berserker Torc", ItemType::Accessory, Epic);
    amulet.stat_bonus = StatBonus::new()
        .with(StatType::Strength, 8)
        .with(StatType::Constitution, -3);
    amulet.critical_chance = Some(5.0);
    items.push(priced(amulet, 390));

    let mut focus = Item::new("Runed Orb", ItemType::Weapon, Rare);
    focus.armor = Some(2);
    focus.handedness = Some(OneHanded);
    focus.off_hand_role = Some(OffHandRole::Shield);
    focus.damage_kind = DamageKind::Magic {
        intelligence_scaling: None,
        bonus_damage: 5,
    };
    focus.stat_bonus = StatBonus::new().with(StatType::Intelligence, 3);
    items.push(priced(focus, 180));

    let mut gem = Item::new("Ruby of Might", ItemType::Gem, Uncommon);
    gem.stat_bonus = StatBonus::new().with(StatType::Strength, 5);
    gem.gem_battles = Some(3);
    items.push(priced(gem, 45));

    let mut gem = Item::new("Sapphire of Haste", ItemType::Gem, Rare);
    gem.stat_bonus = StatBonus::new().with(StatType::Speed, 6);
    gem.gem_battles = Some(3);
    items.push(priced(gem, 110));

    items
}
