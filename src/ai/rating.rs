//! Region value scoring for conquest targets

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::core::config::StrategyConfig;
use crate::core::types::{PlayerId, RegionId};
use crate::world::WorldModel;

/// Static worth of a region: bonus against the number of fronts to hold,
/// spread over its size
pub fn basic_rating(world: &WorldModel, region: RegionId, config: &StrategyConfig) -> f64 {
    let Ok(r) = world.region(region) else {
        return 0.0;
    };
    if r.is_empty() {
        return 0.0;
    }
    let borders = world.region_borders(region).len() as f64;
    (config.rating_base + f64::from(r.bonus) - config.rating_border_penalty * borders) / r.size() as f64
}

/// Basic rating scaled by how much of the region `player` already holds
pub fn region_rating(world: &WorldModel, region: RegionId, player: PlayerId, config: &StrategyConfig) -> f64 {
    let Ok(r) = world.region(region) else {
        return 0.0;
    };
    if r.is_empty() {
        return 0.0;
    }

    let mut total_troops = 0u32;
    let mut player_troops = 0u32;
    let mut player_territories = 0usize;
    for territory in r.members.iter().filter_map(|&m| world.get(m)) {
        total_troops += territory.troops;
        if territory.is_owned_by(player) {
            player_troops += territory.troops;
            player_territories += 1;
        }
    }

    let army_share = if total_troops == 0 {
        0.0
    } else {
        f64::from(player_troops) / f64::from(total_troops)
    };
    let territory_share = player_territories as f64 / r.size() as f64;

    (army_share + territory_share) / 2.0 * basic_rating(world, region, config)
}

/// Highest-rated region `player` does not fully own; ties go to the lowest id
pub fn best_conquest_target(world: &WorldModel, player: PlayerId, config: &StrategyConfig) -> Option<RegionId> {
    world
        .regions()
        .iter()
        .filter(|r| !r.is_empty() && world.region_owner(r.id) != Some(player))
        .map(|r| (r.id, region_rating(world, r.id, player, config)))
        .max_by_key(|&(id, rating)| (OrderedFloat(rating), Reverse(id)))
        .map(|(id, rating)| {
            tracing::debug!(player = %player, region = %id, rating, "conquest target");
            id
        })
}
