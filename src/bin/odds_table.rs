//! Odds Table
//! Prints estimated attacker win probabilities for small battles

use clap::Parser;
use conquest::combat::CombatResolver;

/// Odds Table - attacker win chance by attacking and defending troops
#[derive(Parser, Debug)]
#[command(name = "odds_table")]
#[command(about = "Print a table of estimated battle win probabilities")]
struct Args {
    /// Largest attacking troop count (rows)
    #[arg(long, default_value_t = 10)]
    max_attackers: u32,

    /// Largest defending troop count (columns)
    #[arg(long, default_value_t = 10)]
    max_defenders: u32,

    /// Simulated battles per cell
    #[arg(long, default_value_t = 10_000)]
    trials: u32,

    /// Seed for the estimator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("conquest=warn")
        .init();

    let args = Args::parse();
    let resolver = CombatResolver::with_trials(args.trials, args.seed);

    print!("{:>5}", "A\\D");
    for defenders in 1..=args.max_defenders {
        print!("{:>7}", defenders);
    }
    println!();

    for attackers in 2..=args.max_attackers.max(2) {
        print!("{:>5}", attackers);
        for defenders in 1..=args.max_defenders {
            let p = resolver.win_probability(attackers, defenders);
            print!("{:>6.1}%", p * 100.0);
        }
        println!();
    }

    println!(
        "\n{} battles simulated, {} trials per cell",
        resolver.simulations_run(),
        resolver.trials()
    );
}
