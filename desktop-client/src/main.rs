mod config;
mod offline;
mod ui;

use std::time::Instant;

use clap::Parser;
use eframe::egui;
use tictactoe_common::{MinimaxBot, SessionRng, log, logger};

use config::{DesktopConfig, get_config_manager};
use offline::LocalGame;
use ui::TicTacToeApp;

#[derive(Parser)]
#[command(name = "tictactoe_desktop")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config file; defaults to one next to the executable.
    #[arg(long)]
    config: Option<String>,

    /// Seed for the engine's opening choice.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Desktop".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(args.config.as_deref())
        .get_config()
        .unwrap_or_else(|e| {
            log!("Failed to load config, using defaults: {}", e);
            DesktopConfig::default()
        });

    let bot_mark = config
        .human_mark
        .opponent()
        .ok_or("human_mark must be X or O")?;
    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Engine plays {} with seed {}", bot_mark, rng.seed());

    let bot = MinimaxBot::new(bot_mark, rng)?.with_randomized_opening(config.randomize_opening);
    let local_game = LocalGame::new(config.human_mark, bot, config.ai_delay(), Instant::now());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_resizable(false)
            .with_title("Tic Tac Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic Tac Toe",
        options,
        Box::new(|_cc| Ok(Box::new(TicTacToeApp::new(local_game)))),
    )?;

    Ok(())
}
