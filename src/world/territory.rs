//! Territory - the atomic ownable unit of the map

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, RegionId, TerritoryId};

/// A territory on the world map
///
/// `owner` is `None` only before the initial deal, and then `troops` is 0.
/// Once owned a territory always holds at least one troop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub region: RegionId,
    pub neighbors: Vec<TerritoryId>,
    pub owner: Option<PlayerId>,
    pub troops: u32,
}

impl Territory {
    pub fn new(id: TerritoryId, name: impl Into<String>, region: RegionId) -> Self {
        Self {
            id,
            name: name.into(),
            region,
            neighbors: Vec::new(),
            owner: None,
            troops: 0,
        }
    }

    /// Check if owned by a specific player
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Owned by someone other than `player`
    pub fn is_hostile_to(&self, player: PlayerId) -> bool {
        matches!(self.owner, Some(owner) if owner != player)
    }

    pub fn is_adjacent(&self, other: TerritoryId) -> bool {
        self.neighbors.contains(&other)
    }
}
