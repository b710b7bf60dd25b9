//! Characters: attributes, progression, gems, and AI opponents.

#![allow(unused_imports)]

pub mod attributes;
pub mod gems;
pub mod model;
pub mod opponent;
pub mod progression;

pub use attributes::*;
pub use gems::*;
pub use model::*;
pub use opponent::*;
pub use progression::*;
