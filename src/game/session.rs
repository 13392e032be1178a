//! GameSession - seats players and runs the turn loop

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{draft_allowance, PlayerController, TurnContext, TurnSummary};
use crate::combat::CombatResolver;
use crate::core::config::ConquestConfig;
use crate::core::error::{ConquestError, Result};
use crate::core::types::{GameId, PlayerId, TurnNumber};
use crate::game::deal::{assign_colors, deal_territories, PLAYER_COLORS};
use crate::game::events::{EventLog, EventType};
use crate::game::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::world::WorldModel;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Players seated, territories not dealt yet
    Setup,
    InProgress,
    Won(PlayerId),
    /// Stopped after `max_turns` player turns without a winner
    TurnLimit,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::TurnLimit)
    }
}

/// A seated player
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub controller: Box<dyn PlayerController>,
}

/// Called after every finished turn
pub type TurnCallback = Box<dyn FnMut(&TurnSummary) + Send>;

/// Final result of a game, for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    pub game_id: GameId,
    pub status: GameStatus,
    pub winner: Option<String>,
    pub turns: TurnNumber,
    pub battles: usize,
    /// Territories held per player at the end, in seat order
    pub territories: Vec<(String, usize)>,
}

/// One game: the world, its players and its history
pub struct GameSession {
    id: GameId,
    config: ConquestConfig,
    world: WorldModel,
    seats: Vec<Seat>,
    palette: Vec<String>,
    combat: Arc<CombatResolver>,
    rng: ChaCha8Rng,
    events: EventLog,
    turn: TurnNumber,
    next_seat: usize,
    status: GameStatus,
    on_turn_finished: Option<TurnCallback>,
}

impl GameSession {
    /// New game on `world` (expected unowned) sharing `combat` with other games
    pub fn new(world: WorldModel, config: ConquestConfig, combat: Arc<CombatResolver>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.game.seed);
        let palette = assign_colors(PLAYER_COLORS.len(), &mut rng);
        Self {
            id: GameId::new(),
            config,
            world,
            seats: Vec::new(),
            palette,
            combat,
            rng,
            events: EventLog::new(),
            turn: 0,
            next_seat: 0,
            status: GameStatus::Setup,
            on_turn_finished: None,
        }
    }

    /// Seat a player; only possible before the deal
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        controller: Box<dyn PlayerController>,
    ) -> Result<PlayerId> {
        if self.status != GameStatus::Setup {
            return Err(ConquestError::IllegalMove(
                "players can only join before the game starts".to_string(),
            ));
        }
        let id = PlayerId::new(self.seats.len() as u32);
        let color = self.palette[self.seats.len() % self.palette.len()].clone();
        self.seats.push(Seat {
            id,
            name: name.into(),
            color,
            controller,
        });
        Ok(id)
    }

    pub fn on_turn_finished(&mut self, callback: impl FnMut(&TurnSummary) + Send + 'static) {
        self.on_turn_finished = Some(Box::new(callback));
    }

    /// Deal the map and open the first turn
    pub fn start(&mut self) -> Result<()> {
        if self.status != GameStatus::Setup {
            return Err(ConquestError::IllegalMove("game already started".to_string()));
        }
        if self.seats.len() < 2 {
            return Err(ConquestError::InvalidConfig(format!(
                "need at least two players, have {}",
                self.seats.len()
            )));
        }

        let players: Vec<PlayerId> = self.seats.iter().map(|s| s.id).collect();
        let slices = deal_territories(
            &mut self.world,
            &players,
            self.config.game.initial_troops,
            &mut self.rng,
        )?;
        for (player, slice) in players.iter().zip(&slices) {
            for &territory in slice {
                self.events.add_event(
                    EventType::TerritoryDealt {
                        player: *player,
                        territory,
                        troops: self.world.troops(territory),
                    },
                    0,
                );
            }
        }

        self.status = GameStatus::InProgress;
        tracing::info!(game = %self.id, players = players.len(), "game started");
        Ok(())
    }

    /// Play the next player's turn. `None` once the game is over.
    pub fn play_turn(&mut self) -> Result<Option<TurnSummary>> {
        if self.status != GameStatus::InProgress {
            return Ok(None);
        }
        if self.turn >= self.config.game.max_turns {
            self.status = GameStatus::TurnLimit;
            self.events.add_event(EventType::TurnLimitReached, self.turn);
            tracing::info!(game = %self.id, turns = self.turn, "turn limit reached");
            return Ok(None);
        }

        let Some(index) = self.next_active_seat() else {
            return Ok(None);
        };

        self.turn += 1;
        let turn = self.turn;
        let player = self.seats[index].id;
        let draft = draft_allowance(&self.world, player, &self.config.strategy);
        self.events.add_event(EventType::TurnStarted { player, draft }, turn);

        let seat = &mut self.seats[index];
        let mut ctx = TurnContext::new(
            player,
            turn,
            draft,
            &mut self.world,
            &self.combat,
            &mut self.rng,
            &mut self.events,
        );
        let summary = seat.controller.take_turn(&mut ctx)?;

        self.events.add_event(EventType::TurnEnded { player }, turn);
        tracing::debug!(
            game = %self.id,
            turn,
            player = %player,
            attacks = summary.attacks,
            conquered = summary.conquered.len(),
            "turn finished"
        );
        if let Some(callback) = self.on_turn_finished.as_mut() {
            callback(&summary);
        }

        if let Some(winner) = self.world.sole_owner() {
            self.status = GameStatus::Won(winner);
            self.events.add_event(EventType::Victory { player: winner }, turn);
            tracing::info!(game = %self.id, winner = %self.seat_name(winner), turn, "game won");
        }

        self.next_seat = (index + 1) % self.seats.len();
        Ok(Some(summary))
    }

    /// Play turns until the game is over
    pub fn run(&mut self) -> Result<GameStatus> {
        if self.status == GameStatus::Setup {
            self.start()?;
        }
        while self.play_turn()?.is_some() {}
        Ok(self.status)
    }

    /// First seat from `next_seat` whose player still holds territory
    fn next_active_seat(&self) -> Option<usize> {
        let count = self.seats.len();
        (0..count)
            .map(|offset| (self.next_seat + offset) % count)
            .find(|&i| self.world.territory_count(self.seats[i].id) > 0)
    }

    /// The seat of `player`
    pub fn seat(&self, player: PlayerId) -> Result<&Seat> {
        self.seats
            .iter()
            .find(|s| s.id == player)
            .ok_or(ConquestError::PlayerNotFound(player))
    }

    fn seat_name(&self, player: PlayerId) -> &str {
        self.seat(player).map_or("?", |s| s.name.as_str())
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Player turns played so far
    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn combat(&self) -> &Arc<CombatResolver> {
        &self.combat
    }

    pub fn config(&self) -> &ConquestConfig {
        &self.config
    }

    /// Player who acts next, if the game is running
    pub fn current_player(&self) -> Option<PlayerId> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        self.next_active_seat().map(|i| self.seats[i].id)
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let current_player = self.current_player();
        let draft = current_player.map_or(0, |p| draft_allowance(&self.world, p, &self.config.strategy));

        let players = self
            .seats
            .iter()
            .map(|seat| PlayerSnapshot {
                id: seat.id,
                name: seat.name.clone(),
                color: seat.color.clone(),
                kind: seat.controller.kind().to_string(),
                territories: self
                    .world
                    .territories_of(seat.id)
                    .into_iter()
                    .filter_map(|t| self.world.get(t))
                    .map(|t| (t.name.clone(), t.troops))
                    .collect(),
                total_troops: self.world.total_troops(seat.id),
                eliminated: self.status != GameStatus::Setup
                    && self.world.territory_count(seat.id) == 0,
            })
            .collect();

        GameSnapshot {
            game_id: self.id,
            turn: self.turn,
            status: self.status,
            current_player,
            draft,
            players,
        }
    }

    pub fn report(&self) -> GameReport {
        let winner = match self.status {
            GameStatus::Won(player) => Some(self.seat_name(player).to_string()),
            _ => None,
        };
        GameReport {
            game_id: self.id,
            status: self.status,
            winner,
            turns: self.turn,
            battles: self.events.battle_count(),
            territories: self
                .seats
                .iter()
                .map(|s| (s.name.clone(), self.world.territory_count(s.id)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiStrategy, HumanController};
    use crate::world::classic_world;

    fn session(seed: u64, max_turns: u32) -> GameSession {
        let mut config = ConquestConfig::default();
        config.game.seed = seed;
        config.game.max_turns = max_turns;
        let combat = Arc::new(CombatResolver::with_trials(200, seed));
        let mut session = GameSession::new(classic_world().unwrap(), config, combat);
        for name in ["North", "East", "South"] {
            session
                .add_player(name, Box::new(AiStrategy::default()))
                .unwrap();
        }
        session
    }

    #[test]
    fn test_start_requires_two_players() {
        let combat = Arc::new(CombatResolver::with_trials(10, 0));
        let mut session = GameSession::new(classic_world().unwrap(), ConquestConfig::default(), combat);
        session.add_player("Solo", Box::new(HumanController::new())).unwrap();
        assert!(matches!(session.start(), Err(ConquestError::InvalidConfig(_))));
    }

    #[test]
    fn test_seat_lookup() {
        let session = session(1, 10);
        assert_eq!(session.seat(PlayerId(1)).unwrap().name, "East");
        assert!(matches!(
            session.seat(PlayerId(7)),
            Err(ConquestError::PlayerNotFound(PlayerId(7)))
        ));
    }

    #[test]
    fn test_cannot_join_after_start() {
        let mut session = session(1, 10);
        session.start().unwrap();
        assert!(session.add_player("Late", Box::new(HumanController::new())).is_err());
    }

    #[test]
    fn test_turns_rotate_between_players() {
        let mut session = session(2, 3);
        session.start().unwrap();
        let players: Vec<PlayerId> = (0..3)
            .map(|_| session.play_turn().unwrap().unwrap().player)
            .collect();
        assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
        assert!(session.play_turn().unwrap().is_none());
        assert_eq!(session.status(), GameStatus::TurnLimit);
    }

    #[test]
    fn test_callback_sees_every_turn() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let counter = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&counter);
        let mut session = session(3, 6);
        session.on_turn_finished(move |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        });
        session.run().unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), session.turn());
    }

    #[test]
    fn test_colors_unique_per_seat() {
        let session = session(4, 1);
        let mut colors: Vec<_> = session.seats().iter().map(|s| s.color.clone()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn test_snapshot_lists_every_territory() {
        let mut session = session(5, 10);
        session.start().unwrap();
        let snapshot = session.snapshot();
        let held: usize = snapshot.players.iter().map(|p| p.territories.len()).sum();
        assert_eq!(held, 42);
        assert_eq!(snapshot.current_player, Some(PlayerId(0)));
        assert!(snapshot.draft >= 3);
    }
}
