//! flappy-term entry point
//!
//! Parses the command line, sets up logging to a file (the terminal belongs
//! to the game), then hands over to the frame loop.

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use flappy_term::app::{App, TerminalGuard};
use flappy_term::audio::Audio;
use flappy_term::{FileStore, Game, GameConfig, HighScore, KeyValueStore, MemoryStore};

#[derive(Debug, Parser)]
#[command(version, about = "Flappy Bird in your terminal")]
struct Cli {
    /// RON file overriding any of the gameplay constants
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for obstacle placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Where the best score is kept
    #[arg(long, conflicts_with = "no_save")]
    store: Option<PathBuf>,
    /// Keep the best score in memory only
    #[arg(long)]
    no_save: bool,
    /// Start with sound off (toggle with `m`)
    #[arg(long)]
    mute: bool,
    /// Simulation and render rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
    /// Log destination; level comes from RUST_LOG (default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("flappy-term.log"));
    let file = File::create(&path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let config = GameConfig::load(cli.config.as_deref()).context("loading config")?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("flappy-term {} starting, seed {}", env!("CARGO_PKG_VERSION"), seed);
    log::debug!("{:?}", config);

    let store: Box<dyn KeyValueStore> = if cli.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::open(cli.store.unwrap_or_else(FileStore::default_path)))
    };
    let game = Game::new(config, HighScore::load(store), Pcg32::seed_from_u64(seed));
    let audio = Audio::open(cli.mute);
    let mut app = App::new(game, audio, cli.fps);

    let _terminal = TerminalGuard::enter().context("setting up terminal")?;
    app.run(&mut stdout()).context("running game loop")?;
    Ok(())
}
