//! Turn-queue battle simulation.
//!
//! Two combatants share a virtual millisecond clock. Each turn the one with
//! the earliest scheduled time acts, makes every attack its weapon
//! configuration grants, and is rescheduled by a speed-derived delay. The
//! battle ends on a knockout or when the turn or time cap is reached.
//!
//! Inputs are never mutated; [`Battle`] carries updated copies.

use super::rewards::calculate_rewards;
use super::stats::{derive_combat_stats, effective_attack_damage};
use super::types::*;
use super::weapons::resolve_weapon_configuration;
use crate::character::gems::decay_gem_effects;
use crate::character::progression::{
    apply_experience_with_tuning, level_up_with_tuning, spend_stat_point_with_tuning,
};
use crate::character::{Character, StatType};
use crate::core::balance::CombatTuning;
use crate::items::{generate_loot_drops, ItemCatalog};
use rand::Rng;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

static STANDARD_ENGINE: OnceLock<CombatEngine> = OnceLock::new();

/// Battle simulator bound to a tuning table and a loot catalog.
#[derive(Debug, Clone)]
pub struct CombatEngine {
    tuning: CombatTuning,
    catalog: ItemCatalog,
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatTuning::STANDARD, ItemCatalog::builtin().clone())
    }
}

impl CombatEngine {
    pub fn new(tuning: CombatTuning, catalog: ItemCatalog) -> Self {
        Self { tuning, catalog }
    }

    /// Engine using `tuning` and the built-in catalog.
    pub fn with_tuning(tuning: CombatTuning) -> Self {
        Self::new(tuning, ItemCatalog::builtin().clone())
    }

    /// Engine using the standard tuning and `catalog` for loot.
    pub fn with_catalog(catalog: ItemCatalog) -> Self {
        Self::new(CombatTuning::STANDARD, catalog)
    }

    /// Shared engine with the shipped tuning table and catalog.
    pub fn standard() -> &'static CombatEngine {
        STANDARD_ENGINE.get_or_init(CombatEngine::default)
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn combat_stats(&self, character: &Character) -> CombatStats {
        derive_combat_stats(character, &self.tuning)
    }

    /// Applies a battle's rewards to one participant.
    ///
    /// The winner gains the experience (levelling up as far as it pays for),
    /// the gold and every loot drop. The loser is returned unchanged. Health
    /// on level-up is recomputed under this engine's tuning, matching the
    /// snapshots [`CombatEngine::simulate`] hands back.
    pub fn award(&self, character: &Character, result: &CombatResult) -> Character {
        if character.id != result.winner.id {
            return character.clone();
        }
        let mut updated =
            apply_experience_with_tuning(character, result.experience_gained, &self.tuning);
        updated.gold += result.gold_gained;
        updated.inventory.extend(result.loot_drops.iter().cloned());
        updated
    }

    /// Advances one level if the experience pays for it.
    pub fn level_up(&self, character: &Character) -> Character {
        level_up_with_tuning(character, &self.tuning)
    }

    /// Spends one unspent stat point on `stat`.
    pub fn spend_stat_point(&self, character: &Character, stat: StatType) -> Character {
        spend_stat_point_with_tuning(character, stat, &self.tuning)
    }

    /// Runs a full battle. The challenger acts first on time ties.
    pub fn simulate(
        &self,
        challenger: &Character,
        opponent: &Character,
        rng: &mut impl Rng,
    ) -> Battle {
        let tuning = &self.tuning;
        let fighters = [challenger, opponent];
        let mut stats = [self.combat_stats(challenger), self.combat_stats(opponent)];
        let mut next_turn_ms = [0u64; 2];
        let mut rounds = Vec::new();
        let mut turn = 1u32;
        let mut clock = 0u64;

        debug!(
            challenger = %challenger.name,
            challenger_level = challenger.level,
            challenger_health = stats[0].health,
            opponent = %opponent.name,
            opponent_level = opponent.level,
            opponent_health = stats[1].health,
            "battle start"
        );

        let termination = loop {
            if !stats[0].is_alive() || !stats[1].is_alive() {
                break Termination::Knockout;
            }
            if turn > tuning.max_turns {
                break Termination::RoundLimit;
            }
            let actor = if next_turn_ms[1] < next_turn_ms[0] {
                Side::Opponent
            } else {
                Side::Challenger
            };
            let now = next_turn_ms[actor.index()];
            if now >= tuning.max_battle_ms {
                break Termination::TimeLimit;
            }
            clock = now;

            let target = actor.other();
            let attacker_config =
                resolve_weapon_configuration(&fighters[actor.index()].equipment, tuning);
            let defender_config =
                resolve_weapon_configuration(&fighters[target.index()].equipment, tuning);
            let (attacker, defender) = split_pair(&mut stats, actor);

            for attack in &attacker_config.attacks {
                let round = self.resolve_attack(
                    AttackContext {
                        turn,
                        time_ms: clock,
                        actor,
                        actor_name: &fighters[actor.index()].name,
                        target_name: &fighters[target.index()].name,
                        attack,
                        config: &attacker_config,
                        shield: defender_config.shield,
                    },
                    attacker,
                    defender,
                    rng,
                );
                trace!(
                    turn,
                    time_ms = clock,
                    action = ?round.action,
                    damage = round.damage,
                    target_health = round.target_health_after,
                    "{}",
                    round.description
                );
                rounds.push(round);
                if !defender.is_alive() {
                    break;
                }
            }

            if defender.is_alive() {
                next_turn_ms[actor.index()] += calculate_turn_delay(attacker.speed, tuning);
            }
            turn += 1;
        };

        let turns = turn - 1;
        if termination != Termination::Knockout {
            warn!(
                ?termination,
                turns,
                duration_ms = clock,
                "battle hit its cap, deciding by remaining health"
            );
        }

        let winner_side = decide_winner(&stats);
        let loser_side = winner_side.other();
        let winner = fighters[winner_side.index()];
        let loser = fighters[loser_side.index()];

        let rewards = calculate_rewards(winner.level, loser.level, tuning);
        let level_difference = winner.level as i32 - loser.level as i32;
        let loot_drops =
            generate_loot_drops(loser.level, level_difference, &self.catalog, tuning, rng);

        let challenger_ref = CombatantRef::new(challenger, Side::Challenger);
        let opponent_ref = CombatantRef::new(opponent, Side::Opponent);
        let refs = [challenger_ref.clone(), opponent_ref.clone()];

        debug!(
            winner = %winner.name,
            loser = %loser.name,
            ?termination,
            turns,
            experience = rewards.experience,
            gold = rewards.gold,
            loot = loot_drops.len(),
            "battle end"
        );

        let result = CombatResult {
            challenger: challenger_ref,
            opponent: opponent_ref,
            winner: refs[winner_side.index()].clone(),
            loser: refs[loser_side.index()].clone(),
            termination,
            rounds,
            turns,
            experience_gained: rewards.experience,
            gold_gained: rewards.gold,
            loot_drops,
            timestamp: chrono::Utc::now().timestamp_millis(),
            duration_ms: clock,
        };

        Battle {
            result,
            challenger: after_battle(challenger, &stats[0]),
            opponent: after_battle(opponent, &stats[1]),
        }
    }

    /// Resolves a single attack: hit roll, crit roll, block roll, damage.
    fn resolve_attack(
        &self,
        ctx: AttackContext<'_>,
        attacker: &CombatStats,
        defender: &mut CombatStats,
        rng: &mut impl Rng,
    ) -> CombatRound {
        let tuning = &self.tuning;
        let target_health_before = defender.health;
        let mut round = CombatRound {
            round: ctx.turn,
            actor: ctx.actor,
            target: ctx.actor.other(),
            weapon: ctx.attack.name.clone(),
            action: ActionKind::Attack,
            damage: 0,
            is_critical: false,
            is_dodged: false,
            is_blocked: false,
            actor_health_before: attacker.health,
            actor_health_after: attacker.health,
            target_health_before,
            target_health_after: target_health_before,
            time_ms: ctx.time_ms,
            description: String::new(),
        };

        let hit_chance = calculate_hit_chance(attacker.accuracy, defender.dodge, tuning);
        let hit_roll = rng.gen::<f64>() * 100.0;
        if hit_roll >= hit_chance {
            // Inside the attacker's accuracy means the defender dodged
            if hit_roll < attacker.accuracy {
                round.action = ActionKind::Dodge;
                round.is_dodged = true;
            } else {
                round.action = ActionKind::Miss;
            }
            round.description = describe(&ctx, &round);
            return round;
        }

        let crit_chance =
            attacker.critical_chance + speed_crit_bonus(attacker.speed, defender.speed, tuning);
        let is_critical = rng.gen::<f64>() * 100.0 < crit_chance;

        let base = attacker.damage as f64
            + effective_attack_damage(ctx.attack, ctx.config, tuning)
            + ctx.attack.damage_kind.bonus_damage() as f64;
        let blocked_by = ctx
            .shield
            .filter(|shield| rng.gen::<f64>() * 100.0 < shield.block_chance);
        let raw = roll_damage_band(base, tuning, rng);

        let mut damage = match blocked_by {
            Some(shield) => (raw.floor() as u32).saturating_sub(shield.block_amount),
            None => mitigate_damage(raw, defender.armor, ctx.attack.damage_kind.is_magic(), tuning),
        };
        if is_critical {
            damage = (damage as f64 * tuning.critical_damage_multiplier).floor() as u32;
        }

        defender.health = defender.health.saturating_sub(damage);

        round.action = if is_critical {
            ActionKind::Critical
        } else {
            ActionKind::Attack
        };
        round.damage = damage;
        round.is_critical = is_critical;
        round.is_blocked = blocked_by.is_some();
        round.target_health_after = defender.health;
        round.description = describe(&ctx, &round);
        round
    }
}

/// Per-attack inputs that do not change across the rolls.
struct AttackContext<'a> {
    turn: u32,
    time_ms: u64,
    actor: Side,
    actor_name: &'a str,
    target_name: &'a str,
    attack: &'a WeaponAttack,
    config: &'a WeaponConfiguration,
    shield: Option<ShieldBlock>,
}

/// Simulates a battle with the standard engine.
///
/// # Arguments
/// * `challenger` - Initiating combatant; wins time ties and exact health ties
/// * `opponent` - Defending combatant
/// * `rng` - Random number generator; a seeded one makes the battle reproducible
pub fn simulate_combat(
    challenger: &Character,
    opponent: &Character,
    rng: &mut impl Rng,
) -> Battle {
    CombatEngine::standard().simulate(challenger, opponent, rng)
}

/// Delay in ms before a combatant acts again.
///
/// `max(200, 1000 - min(speed * 8, 800))`
pub fn calculate_turn_delay(speed: u32, tuning: &CombatTuning) -> u64 {
    let reduction = (speed as u64 * tuning.turn_delay_per_speed)
        .min(tuning.max_turn_delay_reduction_ms);
    tuning
        .base_turn_delay_ms
        .saturating_sub(reduction)
        .max(tuning.min_turn_delay_ms)
}

/// Chance in percent that an attack connects, floored at the minimum hit
/// chance.
///
/// # Arguments
/// * `accuracy` - Attacker accuracy percent
/// * `dodge` - Defender dodge percent
pub fn calculate_hit_chance(accuracy: f64, dodge: f64, tuning: &CombatTuning) -> f64 {
    (accuracy * (1.0 - dodge / 100.0)).max(tuning.min_hit_chance)
}

/// Extra crit chance for a faster attacker, `(atk - def) * 0.15` within 0..=8.
pub fn speed_crit_bonus(attacker_speed: u32, defender_speed: u32, tuning: &CombatTuning) -> f64 {
    ((attacker_speed as f64 - defender_speed as f64) * tuning.speed_crit_factor)
        .clamp(0.0, tuning.max_speed_crit_bonus)
}

/// Uniform roll inside the `[base * 0.8, base * 1.2)` damage band.
fn roll_damage_band(base: f64, tuning: &CombatTuning, rng: &mut impl Rng) -> f64 {
    let min = base * tuning.damage_band_min;
    let max = base * tuning.damage_band_max;
    min + rng.gen::<f64>() * (max - min)
}

/// Applies armor to raw damage.
///
/// # Arguments
/// * `raw` - Damage rolled from the band
/// * `armor` - Defender armor
/// * `is_magic` - Magic attacks ignore part of the armor
///
/// # Returns
/// Damage after reduction, never below 1
pub fn mitigate_damage(raw: f64, armor: u32, is_magic: bool, tuning: &CombatTuning) -> u32 {
    let mut effective_armor = armor as f64;
    if is_magic {
        effective_armor *= 1.0 - tuning.magic_armor_penetration;
    }
    let reduction = (effective_armor / tuning.armor_reduction_divisor).min(tuning.max_armor_reduction);
    ((raw * (1.0 - reduction)).floor() as u32).max(1)
}

/// Side that wins once the battle is over.
///
/// A lone survivor wins. Otherwise the higher remaining health fraction wins
/// and an exact tie goes to the challenger.
fn decide_winner(stats: &[CombatStats; 2]) -> Side {
    match (stats[0].is_alive(), stats[1].is_alive()) {
        (true, false) => Side::Challenger,
        (false, true) => Side::Opponent,
        _ => {
            // h0 / m0 vs h1 / m1, cross-multiplied
            let challenger = stats[0].health as u64 * stats[1].max_health.max(1) as u64;
            let opponent = stats[1].health as u64 * stats[0].max_health.max(1) as u64;
            if opponent > challenger {
                Side::Opponent
            } else {
                Side::Challenger
            }
        }
    }
}

fn split_pair<T>(pair: &mut [T; 2], first: Side) -> (&mut T, &mut T) {
    let (left, right) = pair.split_at_mut(1);
    match first {
        Side::Challenger => (&mut left[0], &mut right[0]),
        Side::Opponent => (&mut right[0], &mut left[0]),
    }
}

/// Updated snapshot of a combatant: final health, derived max, gems decayed.
fn after_battle(character: &Character, stats: &CombatStats) -> Character {
    let mut updated = decay_gem_effects(character);
    updated.current_health = stats.health;
    updated.max_health = stats.max_health;
    updated
}

fn describe(ctx: &AttackContext<'_>, round: &CombatRound) -> String {
    let magic = ctx.attack.damage_kind.is_magic();
    let (actor, target, weapon) = (ctx.actor_name, ctx.target_name, &ctx.attack.name);
    match round.action {
        ActionKind::Miss if magic => format!("{actor}'s {weapon} spell goes wide of {target}"),
        ActionKind::Miss => format!("{actor} swings {weapon} at {target} and misses"),
        ActionKind::Dodge => format!("{target} dodges {actor}'s {weapon}"),
        ActionKind::Attack | ActionKind::Critical => {
            let mut text = if magic {
                format!(
                    "{actor} blasts {target} with {weapon} for {} magic damage",
                    round.damage
                )
            } else {
                format!("{actor} hits {target} with {weapon} for {} damage", round.damage)
            };
            if round.is_critical {
                text = format!("Critical! {text}");
            }
            if round.is_blocked {
                text.push_str(&format!(" ({target} blocks with a shield)"));
            }
            text
        }
    }
}

/// Applies a battle's rewards with the standard engine.
/// See [`CombatEngine::award`].
pub fn award_battle(character: &Character, result: &CombatResult) -> Character {
    CombatEngine::standard().award(character, result)
}
