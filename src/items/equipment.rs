use super::types::{EquipmentSlot, Item};
use crate::core::error::ArenaError;
use serde::{Deserialize, Serialize};

/// Character equipment slots.
///
/// IMPORTANT: When adding new slots, use `#[serde(default)]` to maintain
/// backward compatibility with old save files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub main_hand: Option<Item>,
    #[serde(default)]
    pub off_hand: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
    #[serde(default)]
    pub helmet: Option<Item>,
    #[serde(default)]
    pub boots: Option<Item>,
    #[serde(default)]
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::MainHand => &self.main_hand,
            EquipmentSlot::OffHand => &self.off_hand,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::MainHand => &mut self.main_hand,
            EquipmentSlot::OffHand => &mut self.off_hand,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Puts `item` into `slot`, returning whatever was there before.
    pub fn equip(&mut self, slot: EquipmentSlot, item: Item) -> Result<Option<Item>, ArenaError> {
        if !item.item_type.fits(slot) {
            return Err(ArenaError::SlotMismatch {
                slot,
                item_type: item.item_type,
            });
        }
        Ok(self.slot_mut(slot).replace(item))
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// True when a two-handed weapon occupies the main hand.
    pub fn is_two_handed(&self) -> bool {
        self.main_hand.as_ref().is_some_and(Item::is_two_handed)
    }

    /// Off-hand item, unless a two-handed main-hand weapon disables the slot.
    pub fn active_off_hand(&self) -> Option<&Item> {
        if self.is_two_handed() {
            None
        } else {
            self.off_hand.as_ref()
        }
    }

    /// Every item that currently contributes to combat.
    pub fn iter_active(&self) -> impl Iterator<Item = &Item> {
        [
            self.main_hand.as_ref(),
            self.active_off_hand(),
            self.armor.as_ref(),
            self.helmet.as_ref(),
            self.boots.as_ref(),
            self.accessory.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Active items other than the two hands.
    pub fn iter_worn(&self) -> impl Iterator<Item = &Item> {
        [
            self.armor.as_ref(),
            self.helmet.as_ref(),
            self.boots.as_ref(),
            self.accessory.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}
