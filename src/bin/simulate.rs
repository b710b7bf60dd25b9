//! Arena balance simulator CLI.
//!
//! Run Monte Carlo matchups to analyze combat balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # Default: 1000 ladder battles at level 10
//!   cargo run --bin simulate -- -n 200 -l 25          # 200 battles at level 25
//!   cargo run --bin simulate -- --mirror 5 --seed 42  # Reproducible same-level fights
//!   cargo run --bin simulate -- -n 5000 --loot 30     # Loot rates for level 30 losers
//!   RUST_LOG=arena=debug cargo run --bin simulate -- -n 1   # Log one battle

use arena::core::balance::CombatTuning;
use arena::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arena=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            std::process::exit(2);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ARENA BALANCE SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Battles:          {}", config.num_runs);
    println!("  Challenger Level: {}", config.challenger_level);
    match config.opponent_level {
        Some(level) => println!("  Opponent Level:   {}", level),
        None => println!("  Opponent Level:   AI (within one level)"),
    }
    println!("  Tuning Version:   {}", config.tuning.version);
    if let Some(seed) = config.seed {
        println!("  Seed:             {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "arena_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(err) => {
                eprintln!("error: failed to write {}: {}", filename, err);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.challenger_level = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-o" | "--opponent-level" => {
                if i + 1 < args.len() {
                    config.opponent_level = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--tuning" => {
                if i + 1 < args.len() {
                    let path = Path::new(&args[i + 1]);
                    config.tuning = CombatTuning::load(path)
                        .map_err(|err| format!("{}: {}", path.display(), err))?;
                    i += 1;
                }
            }
            "--mirror" => {
                let level = args.get(i + 1).and_then(|a| a.parse::<u32>().ok());
                let runs = config.num_runs;
                config = SimConfig {
                    num_runs: runs,
                    tuning: config.tuning.clone(),
                    seed: config.seed,
                    ..SimConfig::mirror_match(level.unwrap_or(config.challenger_level))
                };
                if level.is_some() {
                    i += 1;
                }
            }
            "--loot" => {
                let level = args.get(i + 1).and_then(|a| a.parse::<u32>().ok());
                config = SimConfig {
                    tuning: config.tuning.clone(),
                    seed: config.seed,
                    ..SimConfig::loot_analysis(
                        config.num_runs,
                        level.unwrap_or(config.challenger_level),
                    )
                };
                if level.is_some() {
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Arena Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>            Number of battles (default: 1000)");
    println!("    -l, --level <L>           Challenger level (default: 10)");
    println!("    -o, --opponent-level <L>  Fixed opponent level (default: AI opponent)");
    println!("    -s, --seed <S>            Random seed for reproducibility");
    println!("    -t, --tuning <FILE>       Load a tuning table from JSON");
    println!("    --mirror [L]              Same-level fights at level L");
    println!("    --loot [L]                Loot analysis against level-L losers");
    println!("    -v, --verbose             Log every battle");
    println!("    --json                    Save JSON report");
    println!("    -h, --help                Show this help");
    println!();
    println!("Set RUST_LOG (e.g. arena=debug, arena=trace) for battle logs.");
}
