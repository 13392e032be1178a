//! Breaking opponents' region bonuses

use std::cmp::Reverse;

use crate::core::config::StrategyConfig;
use crate::core::error::Result;
use crate::core::types::RegionId;

use super::journey::{choose_launch, execute_journey, journey_probability};
use super::TurnContext;

/// Attack into every region an opponent holds outright, richest first
///
/// When the odds are short of `break_in_threshold`, draft troops are
/// placed on the launcher one at a time until they are not. Troops placed
/// this way stay on the launcher even if the threshold is never reached.
pub fn break_into_regions(ctx: &mut TurnContext<'_>, config: &StrategyConfig) -> Result<()> {
    let mut targets: Vec<(u32, RegionId)> = ctx
        .world
        .regions()
        .iter()
        .filter(|r| matches!(ctx.world.region_owner(r.id), Some(owner) if owner != ctx.player))
        .map(|r| (r.bonus, r.id))
        .collect();
    targets.sort_by_key(|&(bonus, id)| (Reverse(bonus), id));

    for (_, region) in targets {
        // An earlier journey may already have broken this one
        if !matches!(ctx.world.region_owner(region), Some(owner) if owner != ctx.player) {
            continue;
        }
        let Some(launch) = choose_launch(ctx.world, ctx.combat, ctx.player, region) else {
            continue;
        };

        let mut probability = launch.probability;
        while probability < config.break_in_threshold && ctx.draft_remaining() > 0 {
            ctx.place(launch.from, 1)?;
            probability = journey_probability(ctx.combat, ctx.world.troops(launch.from), &launch.route);
        }

        if probability < config.break_in_threshold {
            tracing::debug!(
                player = %ctx.player,
                region = %region,
                probability,
                "break-in odds too low"
            );
            continue;
        }

        tracing::debug!(player = %ctx.player, region = %region, from = %launch.from, probability, "breaking into region");
        execute_journey(ctx, launch.from, &launch.route)?;
    }

    Ok(())
}
