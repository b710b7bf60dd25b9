//! Experience and gold paid to the winner of a battle.

use crate::core::balance::CombatTuning;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewards {
    pub experience: u64,
    pub gold: u64,
}

/// Scales rewards down when the winner out-levels the loser.
///
/// `max(0.5, 1 - diff * 0.1)`. Underdog wins (negative difference) pay
/// above base.
pub fn reward_multiplier(level_difference: i32, tuning: &CombatTuning) -> f64 {
    (1.0 - level_difference as f64 * tuning.reward_penalty_per_level)
        .max(tuning.min_reward_multiplier)
}

/// Rewards for a winner at `winner_level` beating a loser at `loser_level`.
pub fn calculate_rewards(winner_level: u32, loser_level: u32, tuning: &CombatTuning) -> Rewards {
    let diff = winner_level as i32 - loser_level as i32;
    let multiplier = reward_multiplier(diff, tuning);
    let loser = loser_level as f64;

    let experience =
        (tuning.base_experience + loser * tuning.experience_per_loser_level) * multiplier;
    let gold = (tuning.base_gold + loser * tuning.gold_per_loser_level) * multiplier;

    Rewards {
        experience: experience.floor() as u64,
        gold: gold.floor() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: &CombatTuning = &CombatTuning::STANDARD;

    #[test]
    fn test_even_fight_at_level_one() {
        let rewards = calculate_rewards(1, 1, T);
        assert_eq!(rewards.experience, 60);
        assert_eq!(rewards.gold, 25);
    }

    #[test]
    fn test_multiplier_floor() {
        assert_eq!(reward_multiplier(5, T), 0.5);
        assert_eq!(reward_multiplier(20, T), 0.5);
        assert!((reward_multiplier(3, T) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_out_levelled_winner_earns_less() {
        let even = calculate_rewards(10, 10, T);
        let stomp = calculate_rewards(15, 10, T);
        // (50 + 100) * 0.5, (20 + 50) * 0.5
        assert_eq!(stomp.experience, 75);
        assert_eq!(stomp.gold, 35);
        assert!(stomp.experience < even.experience);
    }

    #[test]
    fn test_underdog_win_pays_above_base() {
        let rewards = calculate_rewards(5, 10, T);
        // (50 + 100) * 1.5
        assert_eq!(rewards.experience, 225);
        assert_eq!(rewards.gold, 105);
    }
}
