mod config;
mod session;

use clap::Parser;
use tictactoe_common::{Board, Mark, MinimaxBot, SessionRng, log, logger};

use config::{ConsoleConfig, get_config_manager};
use session::ConsoleSession;

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config file; defaults to one next to the executable.
    #[arg(long)]
    config: Option<String>,

    /// Mark played by the human (X always moves first).
    #[arg(long)]
    human_mark: Option<Mark>,

    /// Seed for the engine's opening choice.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    no_random_opening: bool,

    /// Start the first round from a position, e.g. "XX. OO. ...".
    #[arg(long)]
    position: Option<String>,
}

fn resolve_config(args: &Args) -> ConsoleConfig {
    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config().unwrap_or_else(|e| {
        log!("Failed to load config, using defaults: {}", e);
        ConsoleConfig::default()
    });

    if let Some(mark) = args.human_mark {
        config.human_mark = mark;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_random_opening {
        config.randomize_opening = false;
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = resolve_config(&args);
    let bot_mark = config
        .human_mark
        .opponent()
        .ok_or("human_mark must be X or O")?;

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Engine plays {} with seed {}", bot_mark, rng.seed());

    let bot = MinimaxBot::new(bot_mark, rng)?.with_randomized_opening(config.randomize_opening);

    let stdin = std::io::stdin();
    let mut session = ConsoleSession::new(stdin.lock(), std::io::stdout(), config.human_mark, bot);
    if let Some(layout) = args.position.as_deref() {
        session = session.with_starting_position(Board::parse(layout)?);
    }

    session.run()?;
    Ok(())
}
