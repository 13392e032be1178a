//! Player controllers: the autonomous strategy and queued human commands
//!
//! A controller plays one whole turn against a [`TurnContext`]. Every world
//! mutation goes through the context so it is validated, counted and logged
//! the same way for every kind of player.

pub mod break_in;
pub mod conquest;
pub mod draft;
pub mod fortify;
pub mod human;
pub mod journey;
pub mod opportunistic;
pub mod rating;
pub mod reinforce;
pub mod strategy;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::combat::CombatResolver;
use crate::core::error::{ConquestError, Result};
use crate::core::types::{PlayerId, TerritoryId, TurnNumber};
use crate::game::events::{EventLog, EventType};
use crate::world::{Advance, AttackOutcome, WorldModel};

pub use draft::draft_allowance;
pub use human::{HumanController, PlayerCommand};
pub use strategy::AiStrategy;

/// Anything that can play a turn
///
/// Controllers spend the draft they are handed and never compute it.
/// `GameSession` grants [`draft_allowance`] through the context; callers
/// driving a controller directly pass it to [`TurnContext::new`] themselves.
pub trait PlayerController: Send {
    /// Short label for logs ("ai", "human")
    fn kind(&self) -> &'static str;

    /// Play one complete turn. Returns once the turn is over.
    fn take_turn(&mut self, ctx: &mut TurnContext<'_>) -> Result<TurnSummary>;
}

/// The single fortify move of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortifyMove {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub troops: u32,
}

/// What a player did during one turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub player: PlayerId,
    pub turn: TurnNumber,
    /// Draft granted at the start of the turn
    pub draft: u32,
    /// Draft actually placed on the map
    pub placed: u32,
    pub attacks: u32,
    pub conquered: Vec<TerritoryId>,
    pub fortify: Option<FortifyMove>,
    pub eliminated: Vec<PlayerId>,
    /// Commands refused as illegal (human players only)
    pub rejected: u32,
}

/// Everything a controller may read or change during its turn
pub struct TurnContext<'a> {
    pub player: PlayerId,
    pub turn: TurnNumber,
    pub world: &'a mut WorldModel,
    pub combat: &'a CombatResolver,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventLog,
    draft_remaining: u32,
    summary: TurnSummary,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        player: PlayerId,
        turn: TurnNumber,
        draft: u32,
        world: &'a mut WorldModel,
        combat: &'a CombatResolver,
        rng: &'a mut dyn RngCore,
        events: &'a mut EventLog,
    ) -> Self {
        Self {
            player,
            turn,
            world,
            combat,
            rng,
            events,
            draft_remaining: draft,
            summary: TurnSummary {
                player,
                turn,
                draft,
                ..TurnSummary::default()
            },
        }
    }

    /// Draft troops not yet placed
    pub fn draft_remaining(&self) -> u32 {
        self.draft_remaining
    }

    /// Current summary of the turn so far
    pub fn summary(&self) -> TurnSummary {
        self.summary.clone()
    }

    pub(crate) fn record_rejection(&mut self) {
        self.summary.rejected += 1;
    }

    fn require_owned(&self, id: TerritoryId) -> Result<()> {
        let territory = self.world.territory(id)?;
        if territory.is_owned_by(self.player) {
            Ok(())
        } else {
            Err(ConquestError::IllegalMove(format!(
                "{} does not own '{}'",
                self.player, territory.name
            )))
        }
    }

    /// Place draft troops on one of the player's territories
    pub fn place(&mut self, territory: TerritoryId, troops: u32) -> Result<u32> {
        self.require_owned(territory)?;
        if troops == 0 || troops > self.draft_remaining {
            return Err(ConquestError::IllegalMove(format!(
                "cannot place {} troops with {} left in the draft",
                troops, self.draft_remaining
            )));
        }

        let total = self.world.add_troops(territory, i64::from(troops))?;
        self.draft_remaining -= troops;
        self.summary.placed += troops;
        self.events.add_event(
            EventType::TroopsPlaced {
                player: self.player,
                territory,
                troops,
            },
            self.turn,
        );
        Ok(total)
    }

    /// Attack from one of the player's territories
    pub fn attack(&mut self, from: TerritoryId, to: TerritoryId, advance: Advance) -> Result<AttackOutcome> {
        self.require_owned(from)?;
        let defender = self
            .world
            .owner(to)
            .ok_or_else(|| ConquestError::IllegalMove(format!("{} is unowned", to)))?;

        let outcome = self.world.attack(from, to, advance, self.combat, &mut *self.rng)?;
        self.summary.attacks += 1;
        self.events.add_event(
            EventType::Battle {
                attacker: self.player,
                defender,
                from,
                to,
                attacker_losses: outcome.attacker_losses,
                defender_losses: outcome.defender_losses,
            },
            self.turn,
        );

        if outcome.conquered {
            self.summary.conquered.push(to);
            self.events.add_event(
                EventType::TerritoryConquered {
                    player: self.player,
                    from: defender,
                    territory: to,
                    troops: outcome.advanced,
                },
                self.turn,
            );

            if self.world.territory_count(defender) == 0 {
                tracing::info!(player = %defender, by = %self.player, "player eliminated");
                self.summary.eliminated.push(defender);
                self.events.add_event(
                    EventType::PlayerEliminated {
                        player: defender,
                        by: self.player,
                    },
                    self.turn,
                );
            }
        }

        Ok(outcome)
    }

    /// Move troops along a chain of the player's own territories
    pub fn fortify(&mut self, from: TerritoryId, to: TerritoryId, troops: u32) -> Result<()> {
        if self.summary.fortify.is_some() {
            return Err(ConquestError::IllegalMove(
                "only one fortify move per turn".to_string(),
            ));
        }
        self.require_owned(from)?;
        self.require_owned(to)?;
        if from == to || !self.world.connected_through(from, to, self.player) {
            return Err(ConquestError::IllegalMove(format!(
                "{} and {} are not linked through {}'s territory",
                from, to, self.player
            )));
        }

        self.world.transfer_troops(from, to, troops)?;
        self.summary.fortify = Some(FortifyMove { from, to, troops });
        self.events.add_event(
            EventType::Fortified {
                player: self.player,
                from,
                to,
                troops,
            },
            self.turn,
        );
        Ok(())
    }
}
