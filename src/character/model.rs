use super::attributes::{StatBonus, Stats};
use crate::core::balance::CombatTuning;
use crate::core::constants::STARTING_LEVEL;
use crate::items::{Equipment, Item};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Temporary stat modifier granted by a consumed gem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGemEffect {
    pub name: String,
    pub stat_bonus: StatBonus,
    /// Completed battles left before the effect expires.
    pub remaining_battles: u32,
}

/// A combatant as owned by the save layer.
///
/// IMPORTANT: When adding new fields, use `#[serde(default)]` to maintain
/// backward compatibility with old save files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    #[serde(default)]
    pub gold: u64,
    pub stats: Stats,
    pub current_health: u32,
    pub max_health: u32,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub unspent_stat_points: u32,
    #[serde(default)]
    pub active_gem_effects: Vec<ActiveGemEffect>,
}

impl Character {
    /// A fresh level-1 character with base stats and full health.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self::with_stats(id, name, STARTING_LEVEL, Stats::new())
    }

    /// A character at `level` with the given stats and full health.
    pub fn with_stats(id: Uuid, name: impl Into<String>, level: u32, stats: Stats) -> Self {
        Self::with_stats_tuned(id, name, level, stats, &CombatTuning::STANDARD)
    }

    /// Like [`Character::with_stats`], with max health derived from `tuning`.
    pub fn with_stats_tuned(
        id: Uuid,
        name: impl Into<String>,
        level: u32,
        stats: Stats,
        tuning: &CombatTuning,
    ) -> Self {
        let mut character = Self {
            id,
            name: name.into(),
            level: level.max(1),
            experience: 0,
            gold: 0,
            stats,
            current_health: 0,
            max_health: 0,
            equipment: Equipment::new(),
            inventory: Vec::new(),
            unspent_stat_points: 0,
            active_gem_effects: Vec::new(),
        };
        character.max_health = character.max_health_for(tuning);
        character.current_health = character.max_health;
        character
    }

    /// Sum of every active gem's stat bonus.
    pub fn gem_bonus(&self) -> StatBonus {
        let mut total = StatBonus::new();
        for effect in &self.active_gem_effects {
            total.add(&effect.stat_bonus);
        }
        total
    }

    /// Sum of every active equipped item's stat bonus.
    pub fn equipment_bonus(&self) -> StatBonus {
        let mut total = StatBonus::new();
        for item in self.equipment.iter_active() {
            total.add(&item.stat_bonus);
        }
        total
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Refills health to the stored maximum.
    pub fn heal_full(&mut self) {
        self.current_health = self.max_health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::StatType;

    #[test]
    fn test_new_character() {
        let c = Character::new(Uuid::nil(), "Aria");
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 0);
        // 20 + 1*3 + 10*3
        assert_eq!(c.max_health, 53);
        assert_eq!(c.current_health, 53);
        assert!(c.is_alive());
    }

    #[test]
    fn test_with_stats_tuned_uses_table_health() {
        let mut tuning = CombatTuning::STANDARD;
        tuning.base_health = 200.0;
        let c = Character::with_stats_tuned(Uuid::nil(), "Tank", 1, Stats::new(), &tuning);
        assert_eq!(c.max_health, 233);
        assert_eq!(c.current_health, 233);
    }

    #[test]
    fn test_with_stats_level_zero_clamped() {
        let c = Character::with_stats(Uuid::nil(), "Zed", 0, Stats::new());
        assert_eq!(c.level, 1);
    }

    #[test]
    fn test_gem_bonus_sums_effects() {
        let mut c = Character::new(Uuid::nil(), "Gem");
        c.active_gem_effects.push(ActiveGemEffect {
            name: "A".to_string(),
            stat_bonus: StatBonus::new().with(StatType::Strength, 3),
            remaining_battles: 2,
        });
        c.active_gem_effects.push(ActiveGemEffect {
            name: "B".to_string(),
            stat_bonus: StatBonus::new()
                .with(StatType::Strength, 2)
                .with(StatType::Speed, 1),
            remaining_battles: 1,
        });
        let bonus = c.gem_bonus();
        assert_eq!(bonus.get(StatType::Strength), 5);
        assert_eq!(bonus.get(StatType::Speed), 1);
    }

    #[test]
    fn test_save_roundtrip_with_missing_optional_fields() {
        let c = Character::new(Uuid::from_u128(42), "Old Save");
        let mut json: serde_json::Value = serde_json::to_value(&c).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("gold");
        obj.remove("inventory");
        obj.remove("activeGemEffects");
        let loaded: Character = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, c);
    }
}
