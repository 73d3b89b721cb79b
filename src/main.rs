//! # Mirchi Ludo Main Entry Point
//!
//! Parses the command line, sets up logging and simulates an all-AI game.

use clap::Parser;
use log::{error, info};
use mirchi_ludo::{
    GameConfig, GameMode, GameSession, GameSummary, LudoResult, PlayerColor, StrategyKind,
};
use std::path::PathBuf;

/// Command line arguments for the Mirchi Ludo simulator.
#[derive(Parser, Debug)]
#[command(name = "mirchi-ludo")]
#[command(about = "Simulates four-player Ludo games between AI strategies")]
#[command(version)]
struct Args {
    /// Random seed for dice and AI choices
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rule set
    #[arg(short, long, value_enum)]
    mode: Option<GameMode>,

    /// Strategy for every seat without an override
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Strategy for red
    #[arg(long, value_enum)]
    red: Option<StrategyKind>,

    /// Strategy for green
    #[arg(long, value_enum)]
    green: Option<StrategyKind>,

    /// Strategy for yellow
    #[arg(long, value_enum)]
    yellow: Option<StrategyKind>,

    /// Strategy for blue
    #[arg(long, value_enum)]
    blue: Option<StrategyKind>,

    /// JSON game configuration to start from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Turn steps before the game is abandoned
    #[arg(long)]
    max_turns: Option<u32>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> LudoResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Mirchi Ludo v{}", mirchi_ludo::VERSION);

    let config = build_config(&args)?;
    let mut session = GameSession::new(config)?;
    let summary = match session.run_to_completion() {
        Ok(summary) => summary,
        Err(e) => {
            error!("Simulation failed: {}", e);
            return Err(e);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> LudoResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }

    Ok(())
}

/// Layers command line overrides on top of the configuration file or defaults.
fn build_config(args: &Args) -> LudoResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load_from_file(path)?
        }
        None => GameConfig::for_testing(GameConfig::default().seed),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(kind) = args.strategy {
        config.default_strategy = kind;
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }

    let overrides = [
        (PlayerColor::Red, args.red),
        (PlayerColor::Green, args.green),
        (PlayerColor::Yellow, args.yellow),
        (PlayerColor::Blue, args.blue),
    ];
    for (color, kind) in overrides {
        if let Some(kind) = kind {
            config.strategies.insert(color, kind);
        }
    }

    // The simulator has nobody to ask, so every seated color is played by AI
    config.ai_players = config.players.clone();
    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &GameSummary) {
    println!(
        "{:?} game, seed {}, {} steps{}",
        summary.mode,
        summary.seed,
        summary.steps,
        if summary.completed { "" } else { " (turn limit reached)" }
    );
    for (place, color) in summary.rankings.iter().enumerate() {
        let score = summary.scores.get(color).copied().unwrap_or(0);
        println!(
            "{}. {:<7} {:>4} pts  {} kills  {} sixes",
            place + 1,
            color.to_string(),
            score,
            summary.statistics.kills(*color),
            summary.statistics.sixes_rolled(*color)
        );
    }
    if let Some(first) = summary.statistics.first_kill_player {
        println!("First blood: {}", first);
    }
    for (color, count) in &summary.statistics.backward_captures {
        println!("{} captured {} pawn(s) moving backward", color, count);
    }
}
