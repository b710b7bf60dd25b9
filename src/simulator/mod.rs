//! Arena balance simulator for Monte Carlo analysis.
//!
//! Run thousands of seeded battles to analyze:
//! - Win rates between levels and loadouts
//! - Battle pacing and how often the turn/time caps decide a fight
//! - Experience, gold and loot paid per battle
//!
//! Battles go through `CombatEngine` (src/combat/logic.rs), so results match
//! what the arena resolves.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleOutcome, MatchupReport};
pub use runner::{run_simulation, simulate_single_battle};
