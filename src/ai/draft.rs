//! Draft allocation at the start of a turn

use crate::core::config::StrategyConfig;
use crate::core::types::PlayerId;
use crate::world::WorldModel;

/// New troops for `player`: one per `territories_per_troop` owned territories
/// plus every fully-owned region's bonus, never less than `min_draft`
pub fn draft_allowance(world: &WorldModel, player: PlayerId, config: &StrategyConfig) -> u32 {
    let owned = world.territory_count(player) as u32;
    let per_territory = owned / config.territories_per_troop.max(1);
    let bonus = world.region_bonus_total(player);
    (per_territory + bonus).max(config.min_draft)
}
