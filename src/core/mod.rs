pub mod config;
pub mod error;
pub mod types;

pub use config::{CombatConfig, ConquestConfig, GameConfig, StrategyConfig};
pub use error::{ConquestError, Result};
pub use types::{GameId, PlayerId, RegionId, TerritoryId, TurnNumber};
