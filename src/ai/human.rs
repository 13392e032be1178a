//! Human player driven by queued commands
//!
//! Commands arrive from whatever transport the caller uses. A turn first
//! places the whole draft, then attacks, then optionally makes one fortify
//! move, which ends the turn. Illegal commands are logged and dropped.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};
use crate::core::types::TerritoryId;
use crate::world::Advance;

use super::{PlayerController, TurnContext, TurnSummary};

/// One player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Draft { territory: TerritoryId, troops: u32 },
    Attack { from: TerritoryId, to: TerritoryId, advance: Advance },
    Fortify { from: TerritoryId, to: TerritoryId, troops: u32 },
    EndTurn,
}

/// Plays the commands queued for it; the turn ends at `EndTurn`, after a
/// fortify, or when the queue runs dry
#[derive(Debug, Default)]
pub struct HumanController {
    queue: VecDeque<PlayerCommand>,
}

impl HumanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PlayerCommand) {
        self.queue.push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply one command. `Ok(true)` means the turn is over.
    fn apply(&mut self, ctx: &mut TurnContext<'_>, command: PlayerCommand) -> Result<bool> {
        match command {
            PlayerCommand::Draft { territory, troops } => {
                ctx.place(territory, troops)?;
                Ok(false)
            }
            PlayerCommand::Attack { from, to, advance } => {
                require_draft_spent(ctx)?;
                ctx.attack(from, to, advance)?;
                Ok(ctx.world.sole_owner() == Some(ctx.player))
            }
            PlayerCommand::Fortify { from, to, troops } => {
                require_draft_spent(ctx)?;
                ctx.fortify(from, to, troops)?;
                Ok(true)
            }
            PlayerCommand::EndTurn => {
                require_draft_spent(ctx)?;
                Ok(true)
            }
        }
    }
}

fn require_draft_spent(ctx: &TurnContext<'_>) -> Result<()> {
    if ctx.draft_remaining() > 0 {
        return Err(ConquestError::IllegalMove(format!(
            "{} troops still to draft",
            ctx.draft_remaining()
        )));
    }
    Ok(())
}

impl PlayerController for HumanController {
    fn kind(&self) -> &'static str {
        "human"
    }

    fn take_turn(&mut self, ctx: &mut TurnContext<'_>) -> Result<TurnSummary> {
        while let Some(command) = self.queue.pop_front() {
            match self.apply(ctx, command) {
                Ok(true) => break,
                Ok(false) => {}
                Err(err @ (ConquestError::IllegalMove(_)
                | ConquestError::TerritoryNotFound(_)
                | ConquestError::RegionNotFound(_))) => {
                    tracing::warn!(player = %ctx.player, ?command, error = %err, "command rejected");
                    ctx.record_rejection();
                }
                Err(err) => return Err(err),
            }
        }

        if ctx.draft_remaining() > 0 {
            tracing::warn!(
                player = %ctx.player,
                unplaced = ctx.draft_remaining(),
                "turn ended with troops still to draft"
            );
        }
        Ok(ctx.summary())
    }
}
