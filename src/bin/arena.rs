use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect_four_rl::ai::agent_by_name;
use connect_four_rl::config::AppConfig;
use connect_four_rl::env::Connect4Env;
use connect_four_rl::logging;
use connect_four_rl::training::Arena;

/// Pit two built-in agents against each other.
#[derive(Parser)]
#[command(name = "arena", about = "Run Connect Four agents head to head")]
struct Cli {
    /// Agent playing first: rules or random
    #[arg(long, default_value = "rules")]
    first: String,

    /// Agent playing second: rules or random
    #[arg(long, default_value = "random")]
    second: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    logging::init("info");
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.arena.games = games;
    }
    if let Some(seed) = cli.seed {
        config.arena.seed = Some(seed);
    }
    config.validate().context("validating config")?;

    let seed = config.arena.seed;
    let Some(mut first) = agent_by_name(&cli.first, seed) else {
        bail!("unknown agent '{}' (expected 'rules' or 'random')", cli.first);
    };
    let Some(mut second) = agent_by_name(&cli.second, seed.map(|s| s.wrapping_add(1))) else {
        bail!("unknown agent '{}' (expected 'rules' or 'random')", cli.second);
    };

    let mut env = Connect4Env::new(config.rewards);
    let arena = Arena::new(config.arena.clone());
    let report = arena
        .run(&mut env, &mut first, &mut second)
        .context("running arena")?;

    println!("-------------------------------------------");
    println!("{} vs {}: {} games", cli.first, cli.second, report.episodes);
    println!(
        "P1 wins: {:.1}% | P2 wins: {:.1}% | draws: {:.1}% | invalid: {:.1}% | avg_len: {:.1}",
        report.first_win_rate * 100.0,
        report.second_win_rate * 100.0,
        report.draw_rate * 100.0,
        report.invalid_rate * 100.0,
        report.average_game_length,
    );
    println!(
        "Eval ({} games, alternating sides): {} wins {:.1}% | draws {:.1}% | losses {:.1}%",
        report.eval.games(),
        cli.first,
        report.eval.win_rate() * 100.0,
        report.eval.draw_rate() * 100.0,
        report.eval.loss_rate() * 100.0,
    );
    Ok(())
}
