//! Serializable view of a game for publishing state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{GameId, PlayerId, TurnNumber};
use crate::game::session::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    /// Controller kind ("ai" or "human")
    pub kind: String,
    /// Territory name to troop count
    pub territories: BTreeMap<String, u32>,
    pub total_troops: u32,
    pub eliminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub turn: TurnNumber,
    pub status: GameStatus,
    pub current_player: Option<PlayerId>,
    /// Draft the current player will receive
    pub draft: u32,
    pub players: Vec<PlayerSnapshot>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }
}
