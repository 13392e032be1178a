use thiserror::Error;

use crate::core::types::{PlayerId, RegionId, TerritoryId};

#[derive(Error, Debug)]
pub enum ConquestError {
    #[error("Territory not found: {0}")]
    TerritoryNotFound(TerritoryId),

    #[error("Region not found: {0}")]
    RegionNotFound(RegionId),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Invalid map: {0}")]
    InvalidMap(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ConquestError>;
