//! Launch selection and multi-step attack journeys

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::combat::CombatResolver;
use crate::core::error::Result;
use crate::core::types::{PlayerId, RegionId, TerritoryId};
use crate::pathing::{nearest_region_border, Route};
use crate::world::{Advance, WorldModel};

use super::TurnContext;

/// Where an offensive against a region starts and how it gets there
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub from: TerritoryId,
    /// Region border the route ends on (`from` itself when already inside)
    pub border: TerritoryId,
    pub route: Route,
    pub probability: f64,
}

/// How far a journey got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyOutcome {
    /// Territory holding the advancing force when the journey stopped
    pub position: TerritoryId,
    pub conquests: u32,
    pub completed: bool,
}

/// Chance that `launcher_troops` fight through every step of `route`
///
/// Each intermediate conquest leaves one troop behind, and the whole toll
/// is paid by what is left.
pub fn journey_probability(combat: &CombatResolver, launcher_troops: u32, route: &Route) -> f64 {
    if route.is_empty() {
        return 1.0;
    }
    let left_behind = route.hops().saturating_sub(1) as u32;
    combat.win_probability(launcher_troops.saturating_sub(left_behind), route.cost)
}

/// Pick the territory to attack `region` from
///
/// A territory already inside the region wins if there is one (most enemy
/// neighbors first). Otherwise every owned territory is scored by the odds
/// of its route to the nearest border of the region.
pub fn choose_launch(
    world: &WorldModel,
    combat: &CombatResolver,
    player: PlayerId,
    region: RegionId,
) -> Option<Launch> {
    let members = &world.region(region).ok()?.members;

    let inside = members
        .iter()
        .copied()
        .filter(|&m| world.get(m).is_some_and(|t| t.is_owned_by(player)))
        .enumerate()
        .max_by_key(|&(order, m)| (world.enemy_neighbors(m).len(), Reverse(order)))
        .map(|(_, m)| m);

    if let Some(from) = inside {
        return Some(Launch {
            from,
            border: from,
            route: Route::default(),
            probability: 1.0,
        });
    }

    world
        .territories_of(player)
        .into_iter()
        .filter_map(|from| {
            let (border, route) = nearest_region_border(world, from, region)?;
            let probability = journey_probability(combat, world.troops(from), &route);
            Some(Launch {
                from,
                border,
                route,
                probability,
            })
        })
        .enumerate()
        .max_by_key(|(order, launch)| (OrderedFloat(launch.probability), Reverse(*order)))
        .map(|(_, launch)| launch)
}

/// Attack along `route` from `from`, advancing everything each time
///
/// Stops at the first failed attack and leaves whatever was taken.
pub fn execute_journey(ctx: &mut TurnContext<'_>, from: TerritoryId, route: &Route) -> Result<JourneyOutcome> {
    let mut outcome = JourneyOutcome {
        position: from,
        conquests: 0,
        completed: true,
    };

    for &step in &route.steps {
        let hostile = ctx.world.get(step).is_some_and(|t| t.is_hostile_to(ctx.player));
        if ctx.world.troops(outcome.position) < 2 || !hostile {
            outcome.completed = false;
            break;
        }

        let attack = ctx.attack(outcome.position, step, Advance::AllButOne)?;
        if !attack.conquered {
            outcome.completed = false;
            break;
        }
        outcome.position = step;
        outcome.conquests += 1;
    }

    tracing::debug!(
        player = %ctx.player,
        from = %from,
        conquests = outcome.conquests,
        completed = outcome.completed,
        "journey finished"
    );
    Ok(outcome)
}
