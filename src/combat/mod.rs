//! Combat system: stat derivation, weapon configuration, battle simulation
//! and rewards.

#![allow(unused_imports)]

pub mod logic;
pub mod rewards;
pub mod stats;
pub mod types;
pub mod weapons;

pub use logic::*;
pub use rewards::*;
pub use stats::*;
pub use types::*;
pub use weapons::*;
