//! Arena - PvP combat engine for a character-driven RPG
//!
//! Derives combat stats from a character and its equipment, resolves which
//! attacks a loadout makes, simulates turn-queue battles, and pays out
//! experience, gold and loot. Everything random takes an injected
//! [`rand::Rng`], so seeded runs are reproducible.
//!
//! ```no_run
//! use arena::character::{generate_ai_opponent, Character};
//! use arena::combat::{award_battle, simulate_combat};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use uuid::Uuid;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let hero = Character::new(Uuid::new_v4(), "Aria");
//! let rival = generate_ai_opponent(hero.level, &mut rng);
//! let battle = simulate_combat(&hero, &rival, &mut rng);
//! let hero = award_battle(&battle.challenger, &battle.result);
//! ```

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;

pub use character::Character;
pub use combat::{simulate_combat, Battle, CombatEngine, CombatResult};
pub use crate::core::balance::CombatTuning;
pub use crate::core::error::ArenaError;
