//! Region - a fixed group of territories worth a troop bonus

use serde::{Deserialize, Serialize};

use crate::core::types::{RegionId, TerritoryId};

/// A region (continent). Membership and bonus never change during a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub bonus: u32,
    pub members: Vec<TerritoryId>,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>, bonus: u32) -> Self {
        Self {
            id,
            name: name.into(),
            bonus,
            members: Vec::new(),
        }
    }

    pub fn contains(&self, territory: TerritoryId) -> bool {
        self.members.contains(&territory)
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
