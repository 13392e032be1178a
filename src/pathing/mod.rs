//! Attack route planning through hostile territory
//!
//! Routes never pass through the planning player's own territories. The
//! cost of a route is the number of defending troops along it.

pub mod graph;
pub mod search;

use serde::{Deserialize, Serialize};

use crate::core::types::{RegionId, TerritoryId};
use crate::world::WorldModel;

pub use graph::RivalGraph;
pub use search::SearchTree;

/// Ordered attack sequence; the first step is the first territory to attack
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    pub steps: Vec<TerritoryId>,
    /// Sum of troops on every step
    pub cost: u32,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn hops(&self) -> usize {
        self.steps.len()
    }

    /// Final territory of the route, if it goes anywhere
    pub fn destination(&self) -> Option<TerritoryId> {
        self.steps.last().copied()
    }
}

/// Cheapest route from `source` to `target` through rival territory
///
/// `None` when the target is owned by the source's owner or cannot be
/// reached without crossing the player's own territory.
pub fn path_through_rivals(
    world: &WorldModel,
    source: TerritoryId,
    target: TerritoryId,
) -> Option<Route> {
    if source == target {
        world.get(source)?;
        return Some(Route::default());
    }
    let graph = RivalGraph::build(world, source)?;
    if !graph.contains(target) {
        return None;
    }
    SearchTree::run(world, &graph, Some(target)).route_to(target)
}

/// Border of `region` cheapest to reach from `source`, with its route
///
/// Ties go to the border listed first in the region.
pub fn nearest_region_border(
    world: &WorldModel,
    source: TerritoryId,
    region: RegionId,
) -> Option<(TerritoryId, Route)> {
    let borders = world.region_borders(region);
    if borders.is_empty() {
        return None;
    }

    if borders.contains(&source) {
        return Some((source, Route::default()));
    }

    let graph = RivalGraph::build(world, source)?;
    let tree = SearchTree::run(world, &graph, None);

    let mut best: Option<(TerritoryId, Route)> = None;
    for border in borders {
        let Some(route) = tree.route_to(border) else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, b)| route.cost < b.cost) {
            best = Some((border, route));
        }
    }
    best
}

/// Cost to the nearest border of `region`; `None` if no border is reachable
pub fn distance_to_region(world: &WorldModel, source: TerritoryId, region: RegionId) -> Option<u32> {
    nearest_region_border(world, source, region).map(|(_, route)| route.cost)
}
