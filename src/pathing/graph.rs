//! Rival-only subgraph around a source territory

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::types::{PlayerId, TerritoryId};
use crate::world::WorldModel;

/// The source plus everything reachable from it without entering a
/// territory owned by the source's owner
#[derive(Debug, Clone)]
pub struct RivalGraph {
    source: TerritoryId,
    player: PlayerId,
    members: AHashSet<TerritoryId>,
}

impl RivalGraph {
    /// Walk outward from `source`; `None` if the source is unknown or unowned
    pub fn build(world: &WorldModel, source: TerritoryId) -> Option<Self> {
        let player = world.get(source)?.owner?;

        let mut members = AHashSet::new();
        let mut queue = VecDeque::from([source]);
        members.insert(source);

        while let Some(current) = queue.pop_front() {
            let Some(territory) = world.get(current) else {
                continue;
            };
            for &next in &territory.neighbors {
                let rival = world.get(next).is_some_and(|t| !t.is_owned_by(player));
                if rival && members.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Some(Self {
            source,
            player,
            members,
        })
    }

    pub fn source(&self) -> TerritoryId {
        self.source
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn contains(&self, id: TerritoryId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
