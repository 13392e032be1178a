//! Conquest - Entry Point
//!
//! Runs AI-only games on the classic map (or a map loaded from TOML) and
//! prints how each one ended. All games share one combat resolver.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use conquest::ai::AiStrategy;
use conquest::combat::CombatResolver;
use conquest::core::config::{load_config, ConquestConfig};
use conquest::core::error::{ConquestError, Result};
use conquest::game::{run_many, GameReport, GameSession, GameStatus};
use conquest::world::{classic_world, MapDefinition, WorldModel};
use tokio::runtime::Runtime;

/// Conquest - AI players fight for the world
#[derive(Parser, Debug)]
#[command(name = "conquest")]
#[command(about = "Run territory-conquest games between AI players")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML map definition (defaults to the classic map)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Random seed for reproducible runs (game N uses seed + N)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of AI players per game
    #[arg(long, default_value_t = 3)]
    players: u32,

    /// Number of games to run concurrently
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Player turns before a game is called off
    #[arg(long)]
    max_turns: Option<u32>,

    /// Monte Carlo trials per win-probability estimate
    #[arg(long)]
    trials: Option<u32>,

    /// Pause between turns in milliseconds
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ConquestConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ConquestConfig::new(),
        };
        if let Some(seed) = self.seed {
            config.game.seed = seed;
        }
        if let Some(max_turns) = self.max_turns {
            config.game.max_turns = max_turns;
        }
        if let Some(trials) = self.trials {
            config.combat.trials = trials;
        }
        if let Some(pace_ms) = self.pace_ms {
            config.game.turn_delay_ms = pace_ms;
        }
        config.validate()?;
        Ok(config)
    }

    fn load_world(&self) -> Result<WorldModel> {
        match &self.map {
            Some(path) => MapDefinition::load_from_toml(path)?.build(),
            None => classic_world(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("conquest=info")),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    if args.players < 2 {
        return Err(ConquestError::InvalidConfig(format!(
            "need at least two players, got {}",
            args.players
        )));
    }

    let combat = Arc::new(CombatResolver::new(&config.combat));
    let mut sessions = Vec::with_capacity(args.games as usize);
    for game in 0..args.games {
        let mut game_config = config.clone();
        game_config.game.seed = config.game.seed.wrapping_add(u64::from(game));

        let mut session = GameSession::new(args.load_world()?, game_config, Arc::clone(&combat));
        for seat in 0..args.players {
            session.add_player(
                format!("Player{}", seat + 1),
                Box::new(AiStrategy::new(config.strategy.clone())),
            )?;
        }
        sessions.push(session);
    }

    tracing::info!(
        games = args.games,
        players = args.players,
        seed = config.game.seed,
        "starting games"
    );

    let rt = Runtime::new()?;
    let delay = Duration::from_millis(config.game.turn_delay_ms);
    let reports = rt.block_on(run_many(sessions, delay))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    tracing::info!(
        simulations = combat.simulations_run(),
        cached = combat.cached_entries(),
        "combat resolver stats"
    );
    Ok(())
}

fn print_report(report: &GameReport) {
    println!("\n=== GAME {} ===", report.game_id);
    match (&report.status, &report.winner) {
        (GameStatus::Won(_), Some(winner)) => {
            println!("{} conquered the world in {} turns", winner, report.turns)
        }
        _ => println!("No winner after {} turns", report.turns),
    }
    println!("Battles fought: {}", report.battles);
    for (name, territories) in &report.territories {
        println!("  {:<10} {:>3} territories", name, territories);
    }
}
