//! The autonomous player

use crate::core::config::StrategyConfig;
use crate::core::error::Result;

use super::{break_in, conquest, fortify, opportunistic, reinforce};
use super::{PlayerController, TurnContext, TurnSummary};

/// Plays a full turn without input
///
/// Phases run once each, in order: reinforce borders, break into enemy
/// regions, conquer a region, opportunistic attacks, fortify. The draft is
/// whatever the context was created with, normally [`draft_allowance`].
///
/// [`draft_allowance`]: super::draft_allowance
#[derive(Debug, Clone, Default)]
pub struct AiStrategy {
    config: StrategyConfig,
}

impl AiStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }
}

impl PlayerController for AiStrategy {
    fn kind(&self) -> &'static str {
        "ai"
    }

    fn take_turn(&mut self, ctx: &mut TurnContext<'_>) -> Result<TurnSummary> {
        if ctx.world.territory_count(ctx.player) == 0 {
            return Ok(ctx.summary());
        }

        tracing::debug!(player = %ctx.player, turn = ctx.turn, draft = ctx.draft_remaining(), "ai turn");

        reinforce::reinforce_borders(ctx)?;
        break_in::break_into_regions(ctx, &self.config)?;
        conquest::conquer_region(ctx, &self.config)?;
        conquest::place_leftover_draft(ctx)?;
        opportunistic::attack_opportunities(ctx, &self.config)?;
        fortify::fortify(ctx)?;

        let summary = ctx.summary();
        tracing::debug!(
            player = %ctx.player,
            attacks = summary.attacks,
            conquered = summary.conquered.len(),
            "ai turn done"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::draft_allowance;
    use crate::combat::CombatResolver;
    use crate::core::types::PlayerId;
    use crate::game::events::EventLog;
    use crate::world::classic_world;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_player_without_territory_does_nothing() {
        let mut world = classic_world().unwrap();
        let ids: Vec<_> = world.territories().iter().map(|t| t.id).collect();
        for id in ids {
            world.occupy(id, PlayerId(2), 1).unwrap();
        }
        let combat = CombatResolver::with_trials(100, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 3, &mut world, &combat, &mut rng, &mut events);

        let summary = AiStrategy::default().take_turn(&mut ctx).unwrap();
        assert_eq!(summary.attacks, 0);
        assert_eq!(summary.placed, 0);
    }

    #[test]
    fn test_turn_spends_whole_draft() {
        let mut world = classic_world().unwrap();
        let ids: Vec<_> = world.territories().iter().map(|t| t.id).collect();
        for (i, id) in ids.into_iter().enumerate() {
            world.occupy(id, PlayerId(1 + (i % 2) as u32), 2).unwrap();
        }
        let config = StrategyConfig::default();
        let draft = draft_allowance(&world, PlayerId(1), &config);
        let combat = CombatResolver::with_trials(300, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, draft, &mut world, &combat, &mut rng, &mut events);

        let summary = AiStrategy::new(config).take_turn(&mut ctx).unwrap();
        assert_eq!(summary.placed, draft);
        assert_eq!(ctx.draft_remaining(), 0);
    }

    #[test]
    fn test_draft_comes_from_the_context() {
        let mut world = classic_world().unwrap();
        let ids: Vec<_> = world.territories().iter().map(|t| t.id).collect();
        for (i, id) in ids.into_iter().enumerate() {
            world.occupy(id, PlayerId(1 + (i % 2) as u32), 2).unwrap();
        }
        assert!(draft_allowance(&world, PlayerId(1), &StrategyConfig::default()) > 0);
        let combat = CombatResolver::with_trials(300, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut events = EventLog::new();
        let mut ctx = TurnContext::new(PlayerId(1), 1, 0, &mut world, &combat, &mut rng, &mut events);

        let summary = AiStrategy::default().take_turn(&mut ctx).unwrap();
        assert_eq!(summary.draft, 0);
        assert_eq!(summary.placed, 0);
    }
}
