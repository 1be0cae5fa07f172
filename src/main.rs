use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_INITIAL_LENGTH, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_WIN_SCORE, INPUT_POLL_INTERVAL_MS, SessionConfig, THEME_CLASSIC,
};
use grid_snake::grid::Grid;
use grid_snake::input::InputHandler;
use grid_snake::logging;
use grid_snake::manager::{Control, Driver, Phase, SessionManager};
use grid_snake::renderer::{self, Overlay};
use grid_snake::score::FileScoreStore;
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use grid_snake::ui::hud::HudInfo;
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Snake length at the start of each game.
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    length: u16,

    /// Score that wins the game.
    #[arg(long = "win-score", default_value_t = DEFAULT_WIN_SCORE)]
    win_score: u32,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for reproducible goal placement.
    #[arg(long)]
    seed: Option<u64>,

    /// High-score file (defaults to the per-user data directory).
    #[arg(long = "score-file")]
    score_file: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let config = SessionConfig {
        grid: Grid::new(cli.width, cli.height),
        initial_length: cli.length,
        win_score: cli.win_score,
    };
    let store = match &cli.score_file {
        Some(path) => FileScoreStore::new(path),
        None => FileScoreStore::at_default_location(),
    };
    info!(path = %store.path().display(), "using score file");

    let manager = SessionManager::new(config, store, cli.seed)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, manager, Duration::from_millis(cli.tick_ms))
}

fn run(
    terminal: &mut TerminalSession,
    manager: SessionManager<FileScoreStore>,
    tick_interval: Duration,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let poll_interval = Duration::from_millis(INPUT_POLL_INTERVAL_MS);
    let mut driver = Driver::new(manager);
    let mut last_tick = Instant::now();

    loop {
        let snapshot = driver.manager().snapshot();
        let overlay = match driver.phase() {
            Phase::Start => Overlay::Start,
            Phase::Paused => Overlay::Paused,
            Phase::Playing => Overlay::None,
        };
        let hud_info = HudInfo {
            high_score: driver.manager().high_score(),
            reference_high_score: driver.reference_high_score(),
            theme: &THEME_CLASSIC,
        };
        terminal.draw(|frame| renderer::render(frame, &snapshot, overlay, &hud_info))?;

        if let Some(game_input) = input.poll_input(poll_interval)? {
            let control = driver
                .handle_input(game_input)
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
            match control {
                Control::Quit => break,
                Control::ResetClock => last_tick = Instant::now(),
                Control::Continue => {}
            }
        }

        if last_tick.elapsed() >= tick_interval && driver.tick().is_some() {
            last_tick = Instant::now();
        }
    }

    info!(high_score = driver.manager().high_score(), "quitting");
    Ok(())
}
