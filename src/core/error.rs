use crate::items::types::{EquipmentSlot, ItemType};
use thiserror::Error;

/// Errors raised for caller bugs. Foreseeable game-state conditions
/// (no stat points left, not enough experience) are silent no-ops instead.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// An argument the caller should never have passed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Item cannot go into the requested equipment slot.
    #[error("{item_type:?} cannot be equipped in {slot:?}")]
    SlotMismatch {
        slot: EquipmentSlot,
        item_type: ItemType,
    },

    #[error("invalid item catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("invalid tuning table: {0}")]
    Tuning(#[source] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
