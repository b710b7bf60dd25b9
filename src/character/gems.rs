use super::model::{ActiveGemEffect, Character};
use crate::core::error::ArenaError;
use crate::items::{Item, ItemType};
use tracing::debug;

/// Battles a gem lasts when its catalog entry does not say.
pub const DEFAULT_GEM_BATTLES: u32 = 3;

/// Consumes `gem`, layering its stat bonus onto the character for a number
/// of battles. Passing anything other than a gem is a caller bug.
pub fn consume_gem(character: &Character, gem: &Item) -> Result<Character, ArenaError> {
    if gem.item_type != ItemType::Gem {
        return Err(ArenaError::InvalidArgument(format!(
            "{} is a {:?}, not a gem",
            gem.name, gem.item_type
        )));
    }

    let mut updated = character.clone();
    let battles = gem.gem_battles.unwrap_or(DEFAULT_GEM_BATTLES);
    if battles > 0 {
        updated.active_gem_effects.push(ActiveGemEffect {
            name: gem.name.clone(),
            stat_bonus: gem.stat_bonus,
            remaining_battles: battles,
        });
    }
    if let Some(pos) = updated.inventory.iter().position(|i| i.id == gem.id) {
        updated.inventory.remove(pos);
    }
    debug!(character = %updated.name, gem = %gem.name, battles, "gem consumed");
    Ok(updated)
}

/// Counts one completed battle against every gem effect, dropping expired ones.
pub fn decay_gem_effects(character: &Character) -> Character {
    let mut updated = character.clone();
    updated.active_gem_effects = character
        .active_gem_effects
        .iter()
        .filter(|e| e.remaining_battles > 1)
        .map(|e| ActiveGemEffect {
            remaining_battles: e.remaining_battles - 1,
            ..e.clone()
        })
        .collect();
    updated
}
