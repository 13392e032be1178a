//! Opportunistic attacks on weak neighbors

use crate::core::config::StrategyConfig;
use crate::core::error::Result;
use crate::core::types::TerritoryId;
use crate::world::Advance;

use super::TurnContext;

/// From every territory outside the player's regions, keep hitting the
/// weakest enemy neighbor while the odds exceed `opportunistic_threshold`,
/// following each conquest forward
pub fn attack_opportunities(ctx: &mut TurnContext<'_>, config: &StrategyConfig) -> Result<()> {
    let starts: Vec<TerritoryId> = ctx
        .world
        .territories_of(ctx.player)
        .into_iter()
        .filter(|&t| !ctx.world.in_owned_region(t, ctx.player))
        .collect();

    let attacks_before = ctx.summary().attacks;
    for start in starts {
        let mut current = start;
        loop {
            let troops = ctx.world.troops(current);
            if troops < 2 {
                break;
            }
            let Some(target) = ctx
                .world
                .enemy_neighbors(current)
                .into_iter()
                .min_by_key(|&n| (ctx.world.troops(n), n))
            else {
                break;
            };

            let probability = ctx.combat.win_probability(troops, ctx.world.troops(target));
            if probability <= config.opportunistic_threshold {
                break;
            }

            let outcome = ctx.attack(current, target, Advance::AllButOne)?;
            if !outcome.conquered {
                break;
            }
            current = target;
        }
    }

    tracing::debug!(
        player = %ctx.player,
        attacks = ctx.summary().attacks - attacks_before,
        "opportunistic phase done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatResolver;
    use crate::core::types::PlayerId;
    use crate::game::events::EventLog;
    use crate::world::{WorldBuilder, WorldModel};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world(home: u32, weak: u32, strong: u32) -> WorldModel {
        let mut builder = WorldBuilder::new();
        let land = builder.region("Land", 2);
        for name in ["home", "weak", "strong"] {
            builder.territory(name, land).unwrap();
        }
        builder.link("home", "weak").unwrap();
        builder.link("home", "strong").unwrap();
        let mut world = builder.build().unwrap();
        for (name, player, troops) in [("home", 1, home), ("weak", 2, weak), ("strong", 3, strong)] {
            let id = world.territory_by_name(name).unwrap().id;
            world.occupy(id, PlayerId(player), troops).unwrap();
        }
        world
    }

    #[test]
    fn test_attacks_weakest_neighbor_first() {
        let mut world = world(20, 1, 8);
        let combat = CombatResolver::with_trials(1000, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        attack_opportunities(&mut ctx, &StrategyConfig::default()).unwrap();
        let summary = ctx.summary();
        let weak = ctx.world.territory_by_name("weak").unwrap().id;
        assert_eq!(summary.conquered.first(), Some(&weak));
    }

    #[test]
    fn test_poor_odds_do_not_attack() {
        let mut world = world(3, 5, 8);
        let combat = CombatResolver::with_trials(1000, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        attack_opportunities(&mut ctx, &StrategyConfig::default()).unwrap();
        assert_eq!(ctx.summary().attacks, 0);
    }

    /// Region Own {a, b} held by P1; a also borders x (P2) in Wild
    fn own_region_world(b_owner: u32) -> WorldModel {
        let mut builder = WorldBuilder::new();
        let own = builder.region("Own", 2);
        let wild = builder.region("Wild", 1);
        builder.territory("a", own).unwrap();
        builder.territory("b", own).unwrap();
        builder.territory("x", wild).unwrap();
        builder.link("a", "b").unwrap();
        builder.link("a", "x").unwrap();
        let mut world = builder.build().unwrap();
        for (name, player, troops) in [("a", 1, 30), ("b", b_owner, 40), ("x", 2, 1)] {
            let id = world.territory_by_name(name).unwrap().id;
            world.occupy(id, PlayerId(player), troops).unwrap();
        }
        world
    }

    #[test]
    fn test_owned_region_stays_put() {
        let mut world = own_region_world(1);
        let combat = CombatResolver::with_trials(1000, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        attack_opportunities(&mut ctx, &StrategyConfig::default()).unwrap();
        assert_eq!(ctx.summary().attacks, 0);
    }

    #[test]
    fn test_unfinished_region_still_attacks() {
        // Same board with b lost: a is no longer in an owned region
        let mut world = own_region_world(3);
        let combat = CombatResolver::with_trials(1000, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        attack_opportunities(&mut ctx, &StrategyConfig::default()).unwrap();
        let x = ctx.world.territory_by_name("x").unwrap().id;
        assert_eq!(ctx.summary().conquered.first(), Some(&x));
    }
}
