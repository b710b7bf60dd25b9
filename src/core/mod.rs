//! Balance tables, constants and the crate error type.

pub mod balance;
pub mod constants;
pub mod error;

pub use balance::*;
pub use constants::*;
pub use error::*;
