use crate::core::balance::CombatTuning;
use crate::core::constants::{BASE_STAT_VALUE, NUM_STATS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Speed,
}

impl StatType {
    pub fn all() -> [StatType; NUM_STATS] {
        [
            StatType::Strength,
            StatType::Dexterity,
            StatType::Constitution,
            StatType::Intelligence,
            StatType::Speed,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            StatType::Strength => "STR",
            StatType::Dexterity => "DEX",
            StatType::Constitution => "CON",
            StatType::Intelligence => "INT",
            StatType::Speed => "SPD",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatType::Strength => 0,
            StatType::Dexterity => 1,
            StatType::Constitution => 2,
            StatType::Intelligence => 3,
            StatType::Speed => 4,
        }
    }
}

/// A character's stored base attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    values: [u32; NUM_STATS],
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            values: [BASE_STAT_VALUE; NUM_STATS],
        }
    }

    pub fn uniform(value: u32) -> Self {
        Self {
            values: [value; NUM_STATS],
        }
    }

    pub fn get(&self, stat: StatType) -> u32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: StatType, value: u32) {
        self.values[stat.index()] = value;
    }

    pub fn increment(&mut self, stat: StatType) {
        self.values[stat.index()] = self.values[stat.index()].saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }
}

/// Partial, possibly negative, per-stat modifier carried by items and gems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub speed: i32,
}

impl StatBonus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: StatType) -> i32 {
        match stat {
            StatType::Strength => self.strength,
            StatType::Dexterity => self.dexterity,
            StatType::Constitution => self.constitution,
            StatType::Intelligence => self.intelligence,
            StatType::Speed => self.speed,
        }
    }

    pub fn with(mut self, stat: StatType, value: i32) -> Self {
        let slot = match stat {
            StatType::Strength => &mut self.strength,
            StatType::Dexterity => &mut self.dexterity,
            StatType::Constitution => &mut self.constitution,
            StatType::Intelligence => &mut self.intelligence,
            StatType::Speed => &mut self.speed,
        };
        *slot = value;
        self
    }

    pub fn add(&mut self, other: &StatBonus) {
        self.strength += other.strength;
        self.dexterity += other.dexterity;
        self.constitution += other.constitution;
        self.intelligence += other.intelligence;
        self.speed += other.speed;
    }

    pub fn is_empty(&self) -> bool {
        *self == StatBonus::default()
    }
}

/// Applies the soft cap: the first `threshold` points count fully, every point
/// beyond contributes `sqrt(excess * scale)` in total.
pub fn diminishing_returns(value: f64, threshold: f64, scale: f64) -> f64 {
    if value <= threshold {
        value.max(0.0)
    } else {
        threshold + ((value - threshold) * scale).sqrt()
    }
}

/// Attribute values after gems, equipment and diminishing returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStats {
    values: [f64; NUM_STATS],
}

impl EffectiveStats {
    /// Combines base stats and bonuses, then applies the diminishing-returns
    /// curve once per attribute. Negative totals clamp to zero.
    pub fn compute(base: &Stats, bonus: &StatBonus, tuning: &CombatTuning) -> Self {
        let mut values = [0.0; NUM_STATS];
        for stat in StatType::all() {
            let raw = (base.get(stat) as i64 + bonus.get(stat) as i64).max(0) as f64;
            values[stat.index()] = diminishing_returns(
                raw,
                tuning.diminishing_threshold,
                tuning.diminishing_scale,
            );
        }
        Self { values }
    }

    pub fn get(&self, stat: StatType) -> f64 {
        self.values[stat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = Stats::new();
        for stat in StatType::all() {
            assert_eq!(stats.get(stat), 10);
        }
        assert_eq!(stats.total(), 50);
    }

    #[test]
    fn test_get_set_increment() {
        let mut stats = Stats::new();
        stats.set(StatType::Speed, 16);
        stats.increment(StatType::Speed);
        assert_eq!(stats.get(StatType::Speed), 17);
        assert_eq!(stats.get(StatType::Strength), 10);
    }

    #[test]
    fn test_stat_type_abbrev() {
        assert_eq!(StatType::Strength.abbrev(), "STR");
        assert_eq!(StatType::Speed.abbrev(), "SPD");
    }

    #[test]
    fn test_diminishing_returns_below_threshold_is_identity() {
        for v in 0..=50 {
            assert_eq!(diminishing_returns(v as f64, 50.0, 5.0), v as f64);
        }
    }

    #[test]
    fn test_diminishing_returns_above_threshold() {
        // 70 -> 50 + sqrt(20 * 5) = 60
        assert!((diminishing_returns(70.0, 50.0, 5.0) - 60.0).abs() < 1e-9);
        // 100 -> 50 + sqrt(250)
        assert!((diminishing_returns(100.0, 50.0, 5.0) - (50.0 + 250f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_diminishing_returns_monotonic_with_sub_unit_marginal_gain() {
        let mut previous = diminishing_returns(0.0, 50.0, 5.0);
        for v in 1..=500 {
            let current = diminishing_returns(v as f64, 50.0, 5.0);
            assert!(current >= previous, "not monotonic at {v}");
            if v > 51 {
                assert!(current - previous < 1.0, "marginal gain >= 1 at {v}");
            }
            previous = current;
        }
    }

    #[test]
    fn test_effective_stats_adds_bonus_before_curve() {
        let base = Stats::uniform(50);
        let bonus = StatBonus::new().with(StatType::Strength, 20);
        let eff = EffectiveStats::compute(&base, &bonus, &CombatTuning::STANDARD);
        // (50 + 20) is curved as a whole, not 50 + 20 on top of a curved 50
        assert!((eff.get(StatType::Strength) - 60.0).abs() < 1e-9);
        assert_eq!(eff.get(StatType::Dexterity), 50.0);
    }

    #[test]
    fn test_effective_stats_negative_bonus_clamps_to_zero() {
        let base = Stats::uniform(3);
        let bonus = StatBonus::new().with(StatType::Speed, -10);
        let eff = EffectiveStats::compute(&base, &bonus, &CombatTuning::STANDARD);
        assert_eq!(eff.get(StatType::Speed), 0.0);
    }

    #[test]
    fn test_stat_bonus_add() {
        let mut a = StatBonus::new().with(StatType::Strength, 3);
        let b = StatBonus::new()
            .with(StatType::Strength, -1)
            .with(StatType::Intelligence, 4);
        a.add(&b);
        assert_eq!(a.get(StatType::Strength), 2);
        assert_eq!(a.get(StatType::Intelligence), 4);
        assert!(!a.is_empty());
        assert!(StatBonus::new().is_empty());
    }
}
