//! Paced, non-blocking game runner
//!
//! Turns are CPU-bound, so each one runs on tokio's blocking pool. The
//! optional pause between turns is an async sleep and never holds a worker
//! thread, so many games can share a runtime and one combat resolver.

use std::time::Duration;

use tokio::task::JoinSet;

use crate::core::error::{ConquestError, Result};
use crate::game::session::{GameReport, GameSession, GameStatus};

/// Run one game to completion, pausing `delay` after every turn
pub async fn run_paced(mut session: GameSession, delay: Duration) -> Result<GameSession> {
    if session.status() == GameStatus::Setup {
        session.start()?;
    }

    loop {
        let (returned, played) = tokio::task::spawn_blocking(move || {
            let played = session.play_turn();
            (session, played)
        })
        .await
        .map_err(|e| ConquestError::Task(e.to_string()))?;
        session = returned;

        if played?.is_none() {
            break;
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(session)
}

/// Run several games concurrently; reports come back in completion order
pub async fn run_many(sessions: Vec<GameSession>, delay: Duration) -> Result<Vec<GameReport>> {
    let mut games = JoinSet::new();
    for session in sessions {
        games.spawn(run_paced(session, delay));
    }

    let mut reports = Vec::new();
    while let Some(joined) = games.join_next().await {
        let session = joined.map_err(|e| ConquestError::Task(e.to_string()))??;
        tracing::info!(game = %session.id(), status = ?session.status(), turns = session.turn(), "game finished");
        reports.push(session.report());
    }
    Ok(reports)
}
