//! Dijkstra over a rival subgraph
//!
//! Entering a territory costs its troop count. Frontier ties are broken by
//! insertion order so searches are reproducible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::core::types::TerritoryId;
use crate::pathing::graph::RivalGraph;
use crate::pathing::Route;
use crate::world::WorldModel;

/// Settled costs and predecessors of one search
#[derive(Debug, Clone)]
pub struct SearchTree {
    source: TerritoryId,
    cost: AHashMap<TerritoryId, u32>,
    came_from: AHashMap<TerritoryId, TerritoryId>,
    settled: AHashSet<TerritoryId>,
}

impl SearchTree {
    /// Run the search; stops early once `target` is settled
    pub fn run(world: &WorldModel, graph: &RivalGraph, target: Option<TerritoryId>) -> Self {
        let source = graph.source();
        let mut tree = Self {
            source,
            cost: AHashMap::new(),
            came_from: AHashMap::new(),
            settled: AHashSet::new(),
        };

        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;
        tree.cost.insert(source, 0);
        frontier.push(Reverse((0u32, seq, source)));

        while let Some(Reverse((cost, _, current))) = frontier.pop() {
            if !tree.settled.insert(current) {
                continue;
            }
            if Some(current) == target {
                break;
            }

            let Some(territory) = world.get(current) else {
                continue;
            };
            for &next in &territory.neighbors {
                if !graph.contains(next) || tree.settled.contains(&next) {
                    continue;
                }
                let candidate = cost.saturating_add(world.troops(next));
                let better = tree.cost.get(&next).map_or(true, |&known| candidate < known);
                if better {
                    tree.cost.insert(next, candidate);
                    tree.came_from.insert(next, current);
                    seq += 1;
                    frontier.push(Reverse((candidate, seq, next)));
                }
            }
        }

        tree
    }

    /// Final cost to a settled territory
    pub fn cost_to(&self, target: TerritoryId) -> Option<u32> {
        if self.settled.contains(&target) {
            self.cost.get(&target).copied()
        } else {
            None
        }
    }

    /// Attack order from the source to `target`, source excluded
    pub fn route_to(&self, target: TerritoryId) -> Option<Route> {
        let cost = self.cost_to(target)?;

        let mut steps = Vec::new();
        let mut current = target;
        while current != self.source {
            steps.push(current);
            current = *self.came_from.get(&current)?;
        }
        steps.reverse();

        Some(Route { steps, cost })
    }

    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }
}
