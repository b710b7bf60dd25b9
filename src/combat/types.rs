use crate::character::Character;
use crate::items::{DamageKind, Item};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived, per-battle combat numbers. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub health: u32,
    pub max_health: u32,
    /// Stat-derived damage, independent of the weapon being swung.
    pub damage: u32,
    pub min_damage: u32,
    pub max_damage: u32,
    /// Sum of per-attack weapon damage after hand and global scaling.
    pub weapon_damage: f64,
    pub armor: u32,
    pub accuracy: f64,
    pub dodge: f64,
    pub critical_chance: f64,
    pub speed: u32,
    pub is_magic_weapon: bool,
    /// Off-hand focus bonus already folded into `damage`.
    pub magic_damage_bonus: u32,
    pub is_dual_wielding: bool,
    pub is_two_handed: bool,
}

impl CombatStats {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// One attack a combatant makes per turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttack {
    /// `None` when fighting unarmed.
    pub item_id: Option<Uuid>,
    pub name: String,
    /// Listed damage after the off-hand penalty.
    pub damage: f64,
    pub weapon_speed: u32,
    pub critical_chance: f64,
    pub damage_kind: DamageKind,
    pub is_off_hand: bool,
}

impl WeaponAttack {
    pub fn fists(weapon_speed: u32) -> Self {
        Self {
            item_id: None,
            name: "Fists".to_string(),
            damage: 0.0,
            weapon_speed,
            critical_chance: 0.0,
            damage_kind: DamageKind::Physical,
            is_off_hand: false,
        }
    }

    pub fn from_item(item: &Item, damage_multiplier: f64, crit_multiplier: f64, default_speed: u32) -> Self {
        Self {
            item_id: Some(item.id),
            name: item.name.clone(),
            damage: item.damage() as f64 * damage_multiplier,
            weapon_speed: item.weapon_speed.unwrap_or(default_speed),
            critical_chance: item.critical_chance.unwrap_or(0.0) * crit_multiplier,
            damage_kind: item.damage_kind,
            is_off_hand: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldBlock {
    /// Percent, capped.
    pub block_chance: f64,
    /// Flat damage removed from a blocked hit.
    pub block_amount: u32,
}

/// Attacks per turn plus shield parameters for one loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponConfiguration {
    pub attacks: Vec<WeaponAttack>,
    pub shield: Option<ShieldBlock>,
    pub is_two_handed: bool,
}

impl WeaponConfiguration {
    pub fn is_dual_wielding(&self) -> bool {
        self.attacks.len() > 1
    }
}

/// Which argument of the simulation a combatant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Challenger,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Challenger => Side::Opponent,
            Side::Opponent => Side::Challenger,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Challenger => 0,
            Side::Opponent => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Critical,
    Dodge,
    Miss,
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Termination {
    Knockout,
    RoundLimit,
    TimeLimit,
}

/// Identity snapshot of a combatant, for the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantRef {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub side: Side,
}

impl CombatantRef {
    pub fn new(character: &Character, side: Side) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            level: character.level,
            side,
        }
    }
}

/// One resolved attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatRound {
    /// Turn counter, 1-based. Every attack of a dual-wield turn shares it.
    pub round: u32,
    pub actor: Side,
    pub target: Side,
    pub weapon: String,
    pub action: ActionKind,
    pub damage: u32,
    pub is_critical: bool,
    pub is_dodged: bool,
    pub is_blocked: bool,
    pub actor_health_before: u32,
    pub actor_health_after: u32,
    pub target_health_before: u32,
    pub target_health_after: u32,
    /// Virtual battle clock in milliseconds when the attack landed.
    pub time_ms: u64,
    pub description: String,
}

/// Complete, immutable outcome of one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatResult {
    pub challenger: CombatantRef,
    pub opponent: CombatantRef,
    pub winner: CombatantRef,
    pub loser: CombatantRef,
    pub termination: Termination,
    pub rounds: Vec<CombatRound>,
    pub turns: u32,
    pub experience_gained: u64,
    pub gold_gained: u64,
    pub loot_drops: Vec<Item>,
    /// Unix milliseconds when the battle was resolved.
    pub timestamp: i64,
    /// Virtual battle duration in milliseconds.
    pub duration_ms: u64,
}

impl CombatResult {
    pub fn winner_side(&self) -> Side {
        self.winner.side
    }
}

/// Result of a simulation plus updated copies of both combatants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub result: CombatResult,
    pub challenger: Character,
    pub opponent: Character,
}

impl Battle {
    pub fn winner(&self) -> &Character {
        match self.result.winner_side() {
            Side::Challenger => &self.challenger,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn loser(&self) -> &Character {
        match self.result.winner_side() {
            Side::Challenger => &self.opponent,
            Side::Opponent => &self.challenger,
        }
    }
}
