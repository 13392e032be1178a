//! Border reinforcement of fully-owned regions

use crate::core::error::Result;
use crate::core::types::RegionId;

use super::TurnContext;

/// Top up under-defended borders of the player's regions from the draft
///
/// Regions with the fewest borders go first. Each border is raised to the
/// total troops of its enemy neighbors, as far as the pool allows.
pub fn reinforce_borders(ctx: &mut TurnContext<'_>) -> Result<()> {
    let mut regions: Vec<(usize, RegionId)> = ctx
        .world
        .regions_owned_by(ctx.player)
        .into_iter()
        .map(|r| (ctx.world.region_borders(r).len(), r))
        .collect();
    regions.sort_by_key(|&(borders, id)| (borders, id));

    for (_, region) in regions {
        for border in ctx.world.region_borders(region) {
            if ctx.draft_remaining() == 0 {
                return Ok(());
            }
            let strength = ctx.world.enemy_strength(border);
            let troops = ctx.world.troops(border);
            if troops < strength {
                let added = (strength - troops).min(ctx.draft_remaining());
                ctx.place(border, added)?;
                tracing::debug!(player = %ctx.player, border = %border, added, strength, "reinforced border");
            }
        }
    }

    Ok(())
}
