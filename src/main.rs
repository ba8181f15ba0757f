//! Car Racing entry point
//!
//! Validates the command line against the asset catalog, then hands the
//! terminal to the game loop.

use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;

use car_racing::app::{Driver, Outcome};
use car_racing::assets::AssetCatalog;
use car_racing::cli::Args;
use car_racing::persistence::{JsonFileStore, RecordStore};
use car_racing::platform::{FrameClock, TerminalGuard, TerminalInput};
use car_racing::renderer::{Palette, TerminalRenderer};
use car_racing::sim::GameState;
use car_racing::{GameConfig, Leaderboard, Tuning};

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("Logging disabled: {:#}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to a file; the terminal belongs to the game
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialized")?;
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    log::info!("Car Racing starting...");

    let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    let mut catalog = AssetCatalog::scan(&args.assets);
    let config = GameConfig::build(&args.choices(), &mut catalog, tuning)
        .context("invalid game configuration")?;

    let mut store = JsonFileStore::open(&args.records).context("cannot open leaderboard")?;
    let size = config.tuning.leaderboard_size;
    let leaderboard = Leaderboard::from_records(store.top_records(size)?, size);

    let seed = args.seed.unwrap_or_else(rand::random);
    let state = GameState::new(config.world.clone(), seed);
    log::info!("Game initialized with seed: {}", seed);

    let guard = TerminalGuard::enter().context("cannot set up the terminal")?;
    let (columns, rows) = crossterm::terminal::size()?;
    let world = Vec2::new(config.world.screen_width as f32, config.world.screen_height as f32);
    let renderer = TerminalRenderer::new(stdout(), columns, rows, world, Palette::for_config(&config));
    let input = TerminalInput::new(guard.release_events());
    let pacer = FrameClock::new(config.tuning.tick_rate);

    let mut driver = Driver::new(state, input, renderer, pacer);
    let outcome = driver.run()?;

    if let Outcome::GameOver { score } = outcome {
        let hold = Duration::from_secs(config.tuning.results_hold_secs);
        driver
            .finish_game(&mut store, &config.nickname, &leaderboard, score, hold)
            .context("cannot finish the game")?;
    }

    drop(guard);
    log::info!("Car Racing finished: {:?}", outcome);
    Ok(())
}
