//! Game orchestration: sessions, the initial deal, history and pacing

pub mod deal;
pub mod events;
pub mod pacing;
pub mod session;
pub mod snapshot;

pub use deal::{assign_colors, deal_territories, PLAYER_COLORS};
pub use events::{Event, EventLog, EventType};
pub use pacing::{run_many, run_paced};
pub use session::{GameReport, GameSession, GameStatus, Seat, TurnCallback};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
