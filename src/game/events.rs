//! Events and game history logging

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, TerritoryId, TurnNumber};

/// Something that happened during a game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub turn: TurnNumber,
    pub event_type: EventType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    // Setup
    TerritoryDealt { player: PlayerId, territory: TerritoryId, troops: u32 },

    // Turn flow
    TurnStarted { player: PlayerId, draft: u32 },
    TroopsPlaced { player: PlayerId, territory: TerritoryId, troops: u32 },
    TurnEnded { player: PlayerId },

    // Combat
    Battle {
        attacker: PlayerId,
        defender: PlayerId,
        from: TerritoryId,
        to: TerritoryId,
        attacker_losses: u32,
        defender_losses: u32,
    },
    TerritoryConquered { player: PlayerId, from: PlayerId, territory: TerritoryId, troops: u32 },

    // Movement
    Fortified { player: PlayerId, from: TerritoryId, to: TerritoryId, troops: u32 },

    // Outcome
    PlayerEliminated { player: PlayerId, by: PlayerId },
    Victory { player: PlayerId },
    TurnLimitReached,
}

impl EventType {
    /// Whether `player` took part in this event
    pub fn involves(&self, player: PlayerId) -> bool {
        match *self {
            EventType::TerritoryDealt { player: p, .. }
            | EventType::TurnStarted { player: p, .. }
            | EventType::TroopsPlaced { player: p, .. }
            | EventType::TurnEnded { player: p }
            | EventType::Fortified { player: p, .. }
            | EventType::Victory { player: p } => p == player,
            EventType::Battle { attacker, defender, .. } => attacker == player || defender == player,
            EventType::TerritoryConquered { player: p, from, .. } => p == player || from == player,
            EventType::PlayerEliminated { player: p, by } => p == player || by == player,
            EventType::TurnLimitReached => false,
        }
    }
}

/// The complete history of one game
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event_type: EventType, turn: TurnNumber) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.events.push(Event { id, turn, event_type });
        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for_turn(&self, turn: TurnNumber) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.turn == turn)
    }

    pub fn events_for_player(&self, player: PlayerId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.event_type.involves(player))
    }

    /// Number of battles fought so far
    pub fn battle_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.event_type, EventType::Battle { .. }))
            .count()
    }
}
