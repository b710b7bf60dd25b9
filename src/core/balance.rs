//! Combat tuning table.
//!
//! Every balance number the combat pipeline reads lives in [`CombatTuning`].
//! Change once, test everywhere. `CombatTuning::STANDARD` is the shipped table;
//! a custom table can be loaded from JSON and handed to
//! [`CombatEngine::with_tuning`](crate::combat::CombatEngine::with_tuning).

use crate::core::error::ArenaError;
use crate::items::types::Rarity;
use serde::{Deserialize, Serialize};

/// One rarity tier of the post-battle loot roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootTier {
    pub rarity: Rarity,
    /// Base drop chance, 0.0-1.0.
    pub chance: f64,
    /// Loser must be at least this level for the tier to roll at all.
    pub min_level: u32,
}

/// Versioned table of combat balance constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatTuning {
    pub version: u32,

    // =========================================================================
    // ATTRIBUTES
    // =========================================================================
    /// Attribute points up to this value count 1:1.
    pub diminishing_threshold: f64,
    /// Excess above the threshold contributes `sqrt(excess * scale)`.
    pub diminishing_scale: f64,

    // =========================================================================
    // HEALTH
    // =========================================================================
    pub base_health: f64,
    pub health_per_level: f64,
    pub health_per_constitution: f64,

    // =========================================================================
    // DAMAGE
    // =========================================================================
    pub strength_damage_scaling: f64,
    /// Intelligence scaling used when a magic weapon does not specify its own.
    pub intelligence_damage_scaling: f64,
    pub level_damage_scaling: f64,
    pub damage_band_min: f64,
    pub damage_band_max: f64,
    /// Global scale-down applied to all weapon damage.
    pub weapon_damage_scale: f64,
    pub two_handed_damage_multiplier: f64,
    pub off_hand_damage_multiplier: f64,
    pub off_hand_crit_multiplier: f64,
    pub dual_wield_crit_bonus: f64,
    pub critical_damage_multiplier: f64,

    // =========================================================================
    // CRITICAL / DODGE / ACCURACY (all in percent)
    // =========================================================================
    pub crit_per_dexterity: f64,
    pub magic_crit_per_intelligence: f64,
    pub max_crit_chance: f64,
    pub speed_crit_factor: f64,
    pub max_speed_crit_bonus: f64,
    pub dodge_per_speed: f64,
    pub dodge_per_dexterity: f64,
    pub max_dodge_chance: f64,
    pub base_accuracy: f64,
    pub accuracy_per_dexterity: f64,
    pub magic_accuracy_per_intelligence: f64,
    pub max_accuracy: f64,
    pub min_hit_chance: f64,

    // =========================================================================
    // ARMOR / SHIELDS
    // =========================================================================
    /// Fraction of defender armor ignored by magic attacks.
    pub magic_armor_penetration: f64,
    pub armor_reduction_divisor: f64,
    pub max_armor_reduction: f64,
    pub shield_base_block_chance: f64,
    pub shield_block_per_armor: f64,
    pub max_block_chance: f64,
    pub block_amount_per_armor: f64,
    /// Off-hand items with armor and damage below this are treated as shields.
    pub light_off_hand_damage: u32,

    // =========================================================================
    // TURN QUEUE
    // =========================================================================
    pub base_turn_delay_ms: u64,
    pub turn_delay_per_speed: u64,
    pub max_turn_delay_reduction_ms: u64,
    pub min_turn_delay_ms: u64,
    pub max_turns: u32,
    pub max_battle_ms: u64,
    pub unarmed_weapon_speed: u32,

    // =========================================================================
    // REWARDS
    // =========================================================================
    pub base_experience: f64,
    pub experience_per_loser_level: f64,
    pub base_gold: f64,
    pub gold_per_loser_level: f64,
    pub reward_penalty_per_level: f64,
    pub min_reward_multiplier: f64,

    // =========================================================================
    // LOOT
    // =========================================================================
    pub loot_tiers: [LootTier; 5],
    pub loot_penalty_per_level: f64,
    pub min_loot_multiplier: f64,
    pub loot_bonus_per_level: f64,
    pub max_loot_multiplier: f64,
    /// Item damage/armor growth per item level above 1.
    pub item_scaling_per_level: f64,
}

impl CombatTuning {
    pub const STANDARD: CombatTuning = CombatTuning {
        version: 1,

        diminishing_threshold: 50.0,
        diminishing_scale: 5.0,

        base_health: 20.0,
        health_per_level: 3.0,
        health_per_constitution: 3.0,

        strength_damage_scaling: 0.03,
        intelligence_damage_scaling: 0.05,
        level_damage_scaling: 0.2,
        damage_band_min: 0.8,
        damage_band_max: 1.2,
        weapon_damage_scale: 0.7,
        two_handed_damage_multiplier: 0.9,
        off_hand_damage_multiplier: 0.75,
        off_hand_crit_multiplier: 0.8,
        dual_wield_crit_bonus: 3.0,
        critical_damage_multiplier: 2.0,

        crit_per_dexterity: 0.2,
        magic_crit_per_intelligence: 0.15,
        max_crit_chance: 75.0,
        speed_crit_factor: 0.15,
        max_speed_crit_bonus: 8.0,
        dodge_per_speed: 0.3,
        dodge_per_dexterity: 0.2,
        max_dodge_chance: 60.0,
        base_accuracy: 85.0,
        accuracy_per_dexterity: 0.3,
        magic_accuracy_per_intelligence: 0.2,
        max_accuracy: 95.0,
        min_hit_chance: 5.0,

        magic_armor_penetration: 0.3,
        armor_reduction_divisor: 100.0,
        max_armor_reduction: 0.75,
        shield_base_block_chance: 25.0,
        shield_block_per_armor: 2.0,
        max_block_chance: 60.0,
        block_amount_per_armor: 1.5,
        light_off_hand_damage: 5,

        base_turn_delay_ms: 1000,
        turn_delay_per_speed: 8,
        max_turn_delay_reduction_ms: 800,
        min_turn_delay_ms: 200,
        max_turns: 200,
        max_battle_ms: 20_000,
        unarmed_weapon_speed: 5,

        base_experience: 50.0,
        experience_per_loser_level: 10.0,
        base_gold: 20.0,
        gold_per_loser_level: 5.0,
        reward_penalty_per_level: 0.1,
        min_reward_multiplier: 0.5,

        loot_tiers: [
            LootTier {
                rarity: Rarity::Common,
                chance: 0.35,
                min_level: 1,
            },
            LootTier {
                rarity: Rarity::Uncommon,
                chance: 0.25,
                min_level: 5,
            },
            LootTier {
                rarity: Rarity::Rare,
                chance: 0.15,
                min_level: 10,
            },
            LootTier {
                rarity: Rarity::Epic,
                chance: 0.05,
                min_level: 20,
            },
            LootTier {
                rarity: Rarity::Legendary,
                chance: 0.01,
                min_level: 30,
            },
        ],
        loot_penalty_per_level: 0.1,
        min_loot_multiplier: 0.5,
        loot_bonus_per_level: 0.1,
        max_loot_multiplier: 2.0,
        item_scaling_per_level: 0.1,
    };

    /// Parses a tuning table from JSON.
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        serde_json::from_str(json).map_err(ArenaError::Tuning)
    }

    /// Loads a tuning table from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self, ArenaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self::STANDARD
    }
}
