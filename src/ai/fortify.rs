//! End-of-turn fortification

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::core::error::Result;

use super::TurnContext;

/// Move the largest idle inner garrison to its region's weakest border
///
/// Inner territories are owned, inside a fully-owned region and not on its
/// border. The weakest border is the one least likely to win against all
/// of its enemy neighbors combined. Does nothing when there is no inner
/// garrison to spare or no connected border faces an enemy.
pub fn fortify(ctx: &mut TurnContext<'_>) -> Result<()> {
    let world = &*ctx.world;
    let player = ctx.player;

    let Some(source) = world
        .territories_of(player)
        .into_iter()
        .filter(|&t| world.in_owned_region(t, player) && !world.is_border(t))
        .max_by_key(|&t| (world.troops(t), Reverse(t)))
    else {
        return Ok(());
    };

    let troops = world.troops(source);
    if troops < 2 {
        return Ok(());
    }
    let region = world.territory(source)?.region;

    let weakest = world
        .region_borders(region)
        .into_iter()
        .filter(|&b| world.enemy_strength(b) > 0 && world.connected_through(source, b, player))
        .min_by_key(|&b| {
            let odds = ctx.combat.win_probability(world.troops(b), world.enemy_strength(b));
            (OrderedFloat(odds), b)
        });

    let Some(border) = weakest else {
        tracing::debug!(player = %player, "nothing to fortify");
        return Ok(());
    };

    ctx.fortify(source, border, troops - 1)?;
    tracing::debug!(player = %player, from = %source, to = %border, moved = troops - 1, "fortified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatResolver;
    use crate::core::types::{PlayerId, TerritoryId};
    use crate::game::events::EventLog;
    use crate::world::{WorldBuilder, WorldModel};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Region Home {inner, b0, b1}; b0 faces x (P2), b1 faces y (P2)
    fn world(x: u32, y: u32) -> WorldModel {
        let mut builder = WorldBuilder::new();
        let home = builder.region("Home", 3);
        let wild = builder.region("Wild", 1);
        for name in ["inner", "b0", "b1"] {
            builder.territory(name, home).unwrap();
        }
        builder.territory("x", wild).unwrap();
        builder.territory("y", wild).unwrap();
        builder.link("inner", "b0").unwrap();
        builder.link("inner", "b1").unwrap();
        builder.link("b0", "x").unwrap();
        builder.link("b1", "y").unwrap();
        let mut world = builder.build().unwrap();
        for (name, player, troops) in [
            ("inner", 1, 9),
            ("b0", 1, 3),
            ("b1", 1, 3),
            ("x", 2, x),
            ("y", 2, y),
        ] {
            let id = world.territory_by_name(name).unwrap().id;
            world.occupy(id, PlayerId(player), troops).unwrap();
        }
        world
    }

    fn id(world: &WorldModel, name: &str) -> TerritoryId {
        world.territory_by_name(name).unwrap().id
    }

    #[test]
    fn test_moves_to_most_threatened_border() {
        let mut world = world(1, 12);
        let combat = CombatResolver::with_trials(1000, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        fortify(&mut ctx).unwrap();
        drop(ctx);

        assert_eq!(world.troops(id(&world, "inner")), 1);
        assert_eq!(world.troops(id(&world, "b1")), 11);
        assert_eq!(world.troops(id(&world, "b0")), 3);
    }

    #[test]
    fn test_no_region_means_no_op() {
        let mut world = world(1, 12);
        let b0 = id(&world, "b0");
        world.occupy(b0, PlayerId(2), 1).unwrap();
        let combat = CombatResolver::with_trials(100, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        fortify(&mut ctx).unwrap();
        assert_eq!(ctx.summary().fortify, None);
    }
}
