//! Simulation configuration.

use crate::core::balance::CombatTuning;

/// Configuration for a batch of simulated matchups.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level of the generated challenger
    pub challenger_level: u32,

    /// Fixed opponent level (None = AI opponent within one level of the challenger)
    pub opponent_level: Option<u32>,

    /// Balance table every battle runs under
    pub tuning: CombatTuning,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per battle)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            challenger_level: 10,
            opponent_level: None,
            tuning: CombatTuning::STANDARD,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Same-level fights, for checking that the challenger advantage stays small
    pub fn mirror_match(level: u32) -> Self {
        Self {
            num_runs: 500,
            challenger_level: level,
            opponent_level: Some(level),
            ..Default::default()
        }
    }

    /// Challenger against AI opponents, the way the arena pairs players
    pub fn arena_ladder(level: u32) -> Self {
        Self {
            num_runs: 500,
            challenger_level: level,
            opponent_level: None,
            ..Default::default()
        }
    }

    /// Quick config for loot analysis against a fixed loser level
    pub fn loot_analysis(num_runs: u32, opponent_level: u32) -> Self {
        Self {
            num_runs,
            challenger_level: opponent_level,
            opponent_level: Some(opponent_level),
            ..Default::default()
        }
    }
}
