//! Matchup runner. Every battle goes through [`CombatEngine`], the same
//! code path the arena uses.

use super::config::SimConfig;
use super::report::{BattleOutcome, MatchupReport};
use crate::character::{generate_combatant, generate_opponent};
use crate::combat::CombatEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run every configured battle and return the aggregated report.
pub fn run_simulation(config: &SimConfig) -> MatchupReport {
    let engine = CombatEngine::with_tuning(config.tuning.clone());
    let mut outcomes = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let outcome = simulate_single_battle(&engine, config, &mut rng);
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                challenger_won = outcome.challenger_won,
                opponent_level = outcome.opponent_level,
                turns = outcome.turns,
                termination = ?outcome.termination,
                loot = outcome.loot_count,
                "battle simulated"
            );
        }
        outcomes.push(outcome);
    }

    MatchupReport::from_outcomes(config, outcomes)
}

/// Generate both sides and fight one battle.
pub fn simulate_single_battle(
    engine: &CombatEngine,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> BattleOutcome {
    let catalog = engine.catalog();
    let tuning = engine.tuning();

    let challenger = generate_combatant(config.challenger_level, catalog, tuning, rng);
    let opponent = match config.opponent_level {
        Some(level) => generate_combatant(level, catalog, tuning, rng),
        None => generate_opponent(config.challenger_level, catalog, tuning, rng),
    };

    let battle = engine.simulate(&challenger, &opponent, rng);
    BattleOutcome::from_battle(&battle)
}
