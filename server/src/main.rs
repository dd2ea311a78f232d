mod broadcaster;
mod input;
mod server_config;

use std::io::BufRead;

use clap::{Parser, ValueEnum};
use common::engine::session::{SessionCommand, SnakeSession, SnakeSessionConfig};
use common::games::SessionRng;
use common::games::snake::{AutopilotKind, SnakeGameState};
use common::{log, logger};
use tokio::sync::mpsc;

use broadcaster::TerminalBroadcaster;
use server_config::{default_config_path, get_config_manager};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AutopilotArg {
    Efficient,
    Random,
}

impl From<AutopilotArg> for AutopilotKind {
    fn from(arg: AutopilotArg) -> Self {
        match arg {
            AutopilotArg::Efficient => AutopilotKind::Efficient,
            AutopilotArg::Random => AutopilotKind::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "snake_game_server")]
struct Args {
    /// YAML config file; defaults to one next to the executable
    #[arg(long)]
    config: Option<String>,
    #[arg(long, value_enum)]
    autopilot: Option<AutopilotArg>,
    #[arg(long)]
    auto_restart: bool,
    #[arg(long)]
    seed: Option<u64>,
    /// Prefix log lines with "Snake" when the config file sets no prefix.
    /// A prefix from the config file applies with or without this flag.
    #[arg(long)]
    use_log_prefix: bool,
    #[arg(long)]
    verbose: bool,
    /// Print the board whenever the snake moves
    #[arg(long)]
    ascii: bool,
    /// Write the default config file if it does not exist yet, then exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config_manager = get_config_manager(&config_path);

    if args.init_config {
        if config_manager.save_default_if_missing()? {
            println!("Wrote default config to {}", config_path);
        } else {
            println!("Config already exists at {}", config_path);
        }
        return Ok(());
    }

    let config = config_manager.get_config()?;

    let prefix = if args.use_log_prefix {
        Some(config.logging.prefix.clone().unwrap_or_else(|| "Snake".to_string()))
    } else {
        config.logging.prefix.clone()
    };
    logger::init_logger(prefix, args.verbose || config.logging.verbose);

    let session_config = SnakeSessionConfig {
        timing: config.timing.clone(),
        autopilot: args
            .autopilot
            .map(AutopilotKind::from)
            .or(config.session.autopilot),
        auto_restart: args.auto_restart || config.session.auto_restart,
    };

    let mut rng = match args.seed.or(config.session.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let game_state = SnakeGameState::new(config.snake.clone(), &mut rng)?;

    let (command_tx, command_rx) = mpsc::unbounded_channel();

    // stdin blocks, so it gets its own thread instead of a runtime task
    let input_tx = command_tx.clone();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if let Some(command) = input::parse_command(&line)
                && input_tx.send(command).is_err()
            {
                break;
            }
        }
    });

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log!("Shutdown signal received");
                let _ = command_tx.send(SessionCommand::Shutdown);
            }
            Err(e) => log!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    log!(
        "Controls: w/a/s/d or arrow key codes to turn, r/space to restart, q to quit (config: {})",
        config_path
    );

    let summary = SnakeSession::run(
        session_config,
        game_state,
        rng,
        command_rx,
        TerminalBroadcaster::new(args.ascii),
    )
    .await;

    log!(
        "Played {} games, best score {}, final score {}",
        summary.games_played,
        summary.best_score,
        summary.final_snapshot.score
    );

    Ok(())
}
