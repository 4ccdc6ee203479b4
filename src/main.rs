use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect_four_rl::ai::{agent_by_name, Agent, RuleBasedAgent};
use connect_four_rl::config::AppConfig;
use connect_four_rl::error::SessionError;
use connect_four_rl::game::{Board, Connect4Engine, Player, Winner};
use connect_four_rl::logging;
use connect_four_rl::session::{GameSnapshot, SessionStore};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect Four against an AI opponent")]
struct Cli {
    /// Opponent: rules or random
    #[arg(long, default_value = "rules")]
    opponent: String,

    /// Let the rule-based agent play the opponent instead of a human
    #[arg(long)]
    auto_play: bool,

    /// Side the AI plays (1 or 2); random when omitted
    #[arg(long)]
    ai_side: Option<u8>,

    /// Seed for the AI's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Print each session snapshot as JSON instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    logging::init("warn");
    let cli = Cli::parse();

    if agent_by_name(&cli.opponent, None).is_none() {
        bail!("unknown opponent '{}' (expected 'rules' or 'random')", cli.opponent);
    }
    let ai_side = match cli.ai_side {
        None => None,
        Some(1) => Some(Player::One),
        Some(2) => Some(Player::Two),
        Some(other) => bail!("--ai-side must be 1 or 2, got {other}"),
    };

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if cli.auto_play {
        auto_play(&cli.opponent, cli.seed)
    } else {
        play_human(config, &cli.opponent, cli.seed, ai_side, cli.json)
    }
}

fn play_human(
    config: AppConfig,
    opponent: &str,
    seed: Option<u64>,
    ai_side: Option<Player>,
    json: bool,
) -> Result<()> {
    let name = opponent.to_string();
    let store = SessionStore::new(config.session, move || {
        agent_by_name(&name, seed).unwrap_or_else(|| Box::new(RuleBasedAgent::new()))
    });

    let mut snapshot = store.create(ai_side);
    let human = if snapshot.human_player == 1 {
        Player::One
    } else {
        Player::Two
    };
    println!("You are {} ({}).", human.name(), human.mark());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !snapshot.game_over {
        print_snapshot(&snapshot, json)?;
        let valid = Board::try_from_rows(snapshot.board)?.valid_actions();
        print!("Enter your move {valid:?}: ");
        io::stdout().flush().context("flushing stdout")?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("reading move")?;
        let Ok(column) = line.trim().parse::<i64>() else {
            println!("Invalid input. Please enter a number.");
            continue;
        };

        match store.play(&snapshot.session_id, column) {
            Ok(next) => snapshot = next,
            Err(SessionError::InvalidMove(_)) => {
                println!("Invalid move. Please choose a valid column.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_snapshot(&snapshot, json)?;
    match snapshot.winner {
        Some(3) => println!("It's a draw!"),
        Some(w) if w == snapshot.human_player => println!("Congratulations! You won!"),
        _ => println!("The AI won!"),
    }
    Ok(())
}

fn print_snapshot(snapshot: &GameSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot).context("encoding snapshot")?);
    } else {
        println!("{}", Board::try_from_rows(snapshot.board)?);
    }
    Ok(())
}

fn auto_play(opponent: &str, seed: Option<u64>) -> Result<()> {
    let mut rules = match seed {
        Some(seed) => RuleBasedAgent::with_seed(seed),
        None => RuleBasedAgent::new(),
    };
    let mut other = agent_by_name(opponent, seed.map(|s| s.wrapping_add(1)))
        .context("building opponent")?;

    let mut engine = Connect4Engine::new();
    while !engine.is_game_over() {
        println!("{}", engine.board());
        let mover: &mut dyn Agent = match engine.current_player() {
            Player::One => &mut rules,
            Player::Two => &mut other,
        };
        let action = mover.select_action(&engine, 0.0);
        println!("{} plays column {action}", mover.name());
        if !engine.step(action).valid {
            bail!("{} chose illegal column {action}", mover.name());
        }
    }

    println!("{}", engine.board());
    match engine.winner() {
        Some(Winner::Player(Player::One)) => println!("RuleBased ({}) won!", Player::One.mark()),
        Some(Winner::Player(Player::Two)) => {
            println!("{} ({}) won!", other.name(), Player::Two.mark())
        }
        _ => println!("It's a draw!"),
    }
    Ok(())
}
