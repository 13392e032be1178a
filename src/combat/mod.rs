//! Combat: dice battles and their estimated odds
//!
//! - `dice` holds the round rules and the full-battle simulation
//! - `odds` is the write-once probability cache
//! - `resolver` ties them together behind `CombatResolver`

pub mod dice;
pub mod odds;
pub mod resolver;

pub use dice::{simulate_battle, BattleResult, MAX_ATTACK_DICE, MAX_DEFENSE_DICE};
pub use odds::{OddsCache, OddsKey};
pub use resolver::CombatResolver;
