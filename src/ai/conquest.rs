//! Region conquest: commit the draft and sweep the best-rated region

use std::cmp::Reverse;

use crate::core::config::StrategyConfig;
use crate::core::error::Result;
use crate::core::types::{RegionId, TerritoryId};
use crate::world::Advance;

use super::journey::{choose_launch, execute_journey};
use super::rating::best_conquest_target;
use super::TurnContext;

/// Push into the highest-rated region the player does not yet own
///
/// The whole remaining draft goes onto the launcher. After reaching the
/// region the force keeps attacking inside it until it runs out of targets,
/// troops, or luck.
pub fn conquer_region(ctx: &mut TurnContext<'_>, config: &StrategyConfig) -> Result<()> {
    let Some(region) = best_conquest_target(ctx.world, ctx.player, config) else {
        return Ok(());
    };
    let Some(launch) = choose_launch(ctx.world, ctx.combat, ctx.player, region) else {
        return Ok(());
    };

    let pool = ctx.draft_remaining();
    if pool > 0 {
        ctx.place(launch.from, pool)?;
    }

    let journey = execute_journey(ctx, launch.from, &launch.route)?;
    if !journey.completed {
        return Ok(());
    }

    let mut current = journey.position;
    while ctx.world.troops(current) > 1 {
        let Some(target) = next_target(ctx, current, region) else {
            break;
        };
        let outcome = ctx.attack(current, target, Advance::AllButOne)?;
        if !outcome.conquered {
            break;
        }
        current = target;
    }

    tracing::debug!(player = %ctx.player, region = %region, "conquest phase done");
    Ok(())
}

/// Enemy neighbor inside `region` with the most enemy neighbors of its own
fn next_target(ctx: &TurnContext<'_>, from: TerritoryId, region: RegionId) -> Option<TerritoryId> {
    let world = &*ctx.world;
    world
        .enemy_neighbors(from)
        .into_iter()
        .filter(|&n| world.get(n).is_some_and(|t| t.region == region))
        .enumerate()
        .max_by_key(|&(order, n)| {
            let enemy_adjacency = world
                .get(n)
                .map_or(0, |t| {
                    t.neighbors
                        .iter()
                        .filter(|&&m| world.get(m).is_some_and(|o| o.is_hostile_to(ctx.player)))
                        .count()
                });
            (enemy_adjacency, Reverse(order))
        })
        .map(|(_, n)| n)
}

/// Put any draft still unplaced onto the most threatened territory
///
/// Only matters when no conquest launch exists; ties go to the lowest id.
pub fn place_leftover_draft(ctx: &mut TurnContext<'_>) -> Result<()> {
    let pool = ctx.draft_remaining();
    if pool == 0 {
        return Ok(());
    }
    let target = ctx
        .world
        .territories_of(ctx.player)
        .into_iter()
        .max_by_key(|&t| (ctx.world.enemy_strength(t), Reverse(t)));
    if let Some(target) = target {
        ctx.place(target, pool)?;
    }
    Ok(())
}
