// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_GROWTH: f64 = 1.5;
pub const STARTING_LEVEL: u32 = 1;

// Character attributes
pub const NUM_STATS: usize = 5;
pub const BASE_STAT_VALUE: u32 = 10;
pub const MAX_SPENT_STAT_VALUE: u32 = 99;

// Stat points granted per level-up, by level band
pub const EARLY_LEVEL_CAP: u32 = 20;
pub const EARLY_LEVEL_POINTS: u32 = 2;
pub const MID_LEVEL_CAP: u32 = 50;
pub const LATE_LEVEL_POINTS: u32 = 1;
pub const LATE_BONUS_INTERVAL: u32 = 5;

// AI opponents
pub const OPPONENT_LEVEL_SPREAD: i32 = 1;
pub const OPPONENT_ALLOCATION_ATTEMPTS: u32 = 1000;
