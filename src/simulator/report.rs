//! Matchup report generation.

use super::config::SimConfig;
use crate::combat::{Battle, Side, Termination};
use crate::items::Rarity;
use serde::Serialize;
use std::collections::BTreeMap;

/// What the report keeps from one simulated battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleOutcome {
    pub challenger_won: bool,
    pub opponent_level: u32,
    pub turns: u32,
    pub duration_ms: u64,
    pub termination: Termination,
    pub experience: u64,
    pub gold: u64,
    pub loot_count: u32,
    pub loot_rarities: Vec<Rarity>,
}

impl BattleOutcome {
    pub fn from_battle(battle: &Battle) -> Self {
        let result = &battle.result;
        Self {
            challenger_won: result.winner_side() == Side::Challenger,
            opponent_level: result.opponent.level,
            turns: result.turns,
            duration_ms: result.duration_ms,
            termination: result.termination,
            experience: result.experience_gained,
            gold: result.gold_gained,
            loot_count: result.loot_drops.len() as u32,
            loot_rarities: result.loot_drops.iter().map(|i| i.rarity).collect(),
        }
    }
}

/// Aggregated results from a batch of battles.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupReport {
    pub num_runs: u32,
    pub challenger_level: u32,
    pub tuning_version: u32,

    // Outcomes
    pub challenger_wins: u32,
    pub opponent_wins: u32,
    pub challenger_win_rate: f64,
    pub avg_opponent_level: f64,

    // Pacing
    pub avg_turns: f64,
    pub avg_duration_ms: f64,
    pub knockouts: u32,
    pub round_limit_endings: u32,
    pub time_limit_endings: u32,

    // Rewards
    pub avg_experience: f64,
    pub avg_gold: f64,
    pub total_loot: u32,
    pub loot_per_battle: f64,
    pub loot_by_rarity: BTreeMap<Rarity, u32>,
}

impl MatchupReport {
    /// Create a report from the outcomes of every run.
    pub fn from_outcomes(config: &SimConfig, outcomes: Vec<BattleOutcome>) -> Self {
        let num_runs = outcomes.len() as u32;
        let n = num_runs.max(1) as f64;
        let avg = |f: &dyn Fn(&BattleOutcome) -> f64| outcomes.iter().map(f).sum::<f64>() / n;

        let challenger_wins = outcomes.iter().filter(|o| o.challenger_won).count() as u32;
        let count_ending =
            |t: Termination| outcomes.iter().filter(|o| o.termination == t).count() as u32;

        let mut loot_by_rarity = BTreeMap::new();
        for rarity in outcomes.iter().flat_map(|o| o.loot_rarities.iter()) {
            *loot_by_rarity.entry(*rarity).or_insert(0) += 1;
        }
        let total_loot = outcomes.iter().map(|o| o.loot_count).sum::<u32>();

        Self {
            num_runs,
            challenger_level: config.challenger_level,
            tuning_version: config.tuning.version,
            challenger_wins,
            opponent_wins: num_runs - challenger_wins,
            challenger_win_rate: challenger_wins as f64 / n,
            avg_opponent_level: avg(&|o| o.opponent_level as f64),
            avg_turns: avg(&|o| o.turns as f64),
            avg_duration_ms: avg(&|o| o.duration_ms as f64),
            knockouts: count_ending(Termination::Knockout),
            round_limit_endings: count_ending(Termination::RoundLimit),
            time_limit_endings: count_ending(Termination::TimeLimit),
            avg_experience: avg(&|o| o.experience as f64),
            avg_gold: avg(&|o| o.gold as f64),
            total_loot,
            loot_per_battle: total_loot as f64 / n,
            loot_by_rarity,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    ARENA MATCHUP REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {}   Challenger level: {}   Avg opponent level: {:.1}   Tuning v{}\n\n",
            self.num_runs, self.challenger_level, self.avg_opponent_level, self.tuning_version
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Challenger Wins:     {} ({:.1}%)\n",
            self.challenger_wins,
            self.challenger_win_rate * 100.0
        ));
        report.push_str(&format!("  Opponent Wins:       {}\n\n", self.opponent_wins));

        report.push_str("── PACING ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Turns:           {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Avg Duration:        {:.0} ms\n",
            self.avg_duration_ms
        ));
        report.push_str(&format!("  Knockouts:           {}\n", self.knockouts));
        report.push_str(&format!(
            "  Turn Cap Endings:    {}\n",
            self.round_limit_endings
        ));
        report.push_str(&format!(
            "  Time Cap Endings:    {}\n\n",
            self.time_limit_endings
        ));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Experience:      {:.1}\n", self.avg_experience));
        report.push_str(&format!("  Avg Gold:            {:.1}\n", self.avg_gold));
        report.push_str(&format!(
            "  Loot per Battle:     {:.3}\n",
            self.loot_per_battle
        ));
        for rarity in Rarity::all() {
            let count = self.loot_by_rarity.get(&rarity).copied().unwrap_or(0);
            let pct = if self.total_loot > 0 {
                count as f64 / self.total_loot as f64 * 100.0
            } else {
                0.0
            };
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:<10} {:>5} {:>5.1}% {}\n",
                rarity.name(),
                count,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let capped = self.round_limit_endings + self.time_limit_endings;
        let cap_rate = capped as f64 / self.num_runs.max(1) as f64;
        if cap_rate > 0.25 {
            report.push_str(&format!(
                "  ⚠️  {:.0}% of battles hit a cap - damage too low for health pools?\n",
                cap_rate * 100.0
            ));
        }
        if self.avg_turns < 4.0 && self.num_runs > 0 {
            report.push_str("  ⚠️  Battles end very fast - damage too high?\n");
        }
        let same_level = self.avg_opponent_level == self.challenger_level as f64;
        if same_level && (self.challenger_win_rate - 0.5).abs() > 0.1 {
            report.push_str("  ⚠️  Same-level fights are lopsided - check first-turn advantage\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
