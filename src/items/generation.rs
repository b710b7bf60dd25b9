use super::catalog::ItemCatalog;
use super::types::{Item, ItemType, Rarity};
use crate::core::balance::CombatTuning;
use rand::Rng;
use uuid::Uuid;

/// Mints a v4 id from the injected RNG so seeded runs stay reproducible.
pub fn random_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Picks a catalog template uniformly among those matching `filter`.
pub fn pick_template<'a>(
    catalog: &'a ItemCatalog,
    filter: impl Fn(&Item) -> bool,
    rng: &mut impl Rng,
) -> Option<&'a Item> {
    let candidates: Vec<&Item> = catalog.items.iter().filter(|i| filter(i)).collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Generate an item of the given rarity at `level`, drawn from the catalog.
pub fn generate_item(
    catalog: &ItemCatalog,
    rarity: Rarity,
    level: u32,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> Option<Item> {
    let template = pick_template(catalog, |i| i.rarity == rarity, rng)?;
    Some(template.at_level(level, random_id(rng), tuning))
}

/// Generate an item of a specific type, using the best rarity at or below
/// `max_rarity` the catalog can supply.
pub fn generate_item_of_type(
    catalog: &ItemCatalog,
    item_type: ItemType,
    max_rarity: Rarity,
    level: u32,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> Option<Item> {
    for rarity in Rarity::all().into_iter().rev() {
        if rarity > max_rarity {
            continue;
        }
        if let Some(template) = pick_template(
            catalog,
            |i| i.rarity == rarity && i.item_type == item_type,
            rng,
        ) {
            return Some(template.at_level(level, random_id(rng), tuning));
        }
    }
    None
}
