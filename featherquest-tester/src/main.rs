use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use featherquest_game::Difficulty;

use featherquest_tester::{SimConfig, build_report, render_console, render_json, run_game};

#[derive(Debug, Parser)]
#[command(name = "featherquest-tester", version = "0.1.0")]
#[command(about = "Automated QA for the Featherquest game core - plays seeded bot games")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of games per seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Players per game (2-4)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Game difficulty
    #[arg(long, default_value = "medium")]
    #[arg(value_parser = ["easy", "medium", "hard"])]
    difficulty: String,

    /// Bot answer accuracy (0.0 - 1.0)
    #[arg(long, default_value_t = 0.6)]
    accuracy: f64,

    /// Action cap per game before it counts as unfinished
    #[arg(long, default_value_t = 20_000)]
    max_actions: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn split_seeds(input: &str) -> Result<Vec<u64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("invalid seed '{part}'"))
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seeds = split_seeds(&args.seeds)?;
    let difficulty =
        Difficulty::from_str(&args.difficulty).expect("clap restricts the value set");
    let players = args.players.clamp(2, 4);

    let mut outcomes = Vec::new();
    for &seed in &seeds {
        for iteration in 0..args.iterations.max(1) {
            let cfg = SimConfig {
                seed,
                players,
                difficulty,
                max_actions: args.max_actions,
                accuracy: args.accuracy.clamp(0.0, 1.0),
            };
            // Distinct game seed per iteration, reported under the base seed.
            let game_cfg = SimConfig {
                seed: seed.wrapping_add(iteration as u64),
                ..cfg
            };
            let mut outcome =
                run_game(&game_cfg).with_context(|| format!("seed {seed} iteration {iteration}"))?;
            outcome.seed = seed;
            outcomes.push(outcome);
        }
    }

    let reports = build_report(&outcomes);
    match args.report.as_str() {
        "json" => println!("{}", render_json(&reports)?),
        _ => render_console(&reports, args.verbose),
    }
    Ok(())
}
