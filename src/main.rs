//! # Wanderer Main Entry Point
//!
//! Parses arguments, sets up logging, builds the world, and runs the scene
//! loop. The process exit code tells a quit apart from a defeat.

use clap::Parser;
use log::{error, info, LevelFilter};
use macroquad::prelude::{request_new_screen_size, Conf};
use std::path::PathBuf;
use wanderer::generation::utils::create_rng;
use wanderer::{
    GameConfig, GameExit, GameState, InputHandler, SceneManager, WandererError, WandererResult,
    EXIT_CODE_ERROR, SCREEN_HEIGHT, SCREEN_WIDTH,
};

/// Command line arguments for Wanderer.
#[derive(Parser, Debug)]
#[command(name = "wanderer")]
#[command(about = "Explore a scattered map, talk to villagers, and fight monsters")]
#[command(version)]
struct Args {
    /// Random seed for map and battle rolls; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Wanderer".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("{}", e);
        std::process::exit(EXIT_CODE_ERROR);
    }

    info!("Starting Wanderer v{}", wanderer::VERSION);

    let code = match run_game(&args).await {
        Ok(exit) => exit.exit_code(),
        Err(e) => {
            error!("{}", e);
            EXIT_CODE_ERROR
        }
    };
    std::process::exit(code);
}

/// Initializes env_logger at the requested level. `RUST_LOG` still applies
/// on top for per-module filters.
fn initialize_logging(log_level: &str) -> WandererResult<()> {
    let level: LevelFilter = log_level
        .parse()
        .map_err(|_| WandererError::InvalidConfig(format!("Unknown log level '{}'", log_level)))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    Ok(())
}

/// Loads the configuration and resolves the seed.
///
/// An explicit `--seed` always wins. Without it, a config file that sets a
/// seed keeps it; otherwise a random one is drawn.
fn load_config(args: &Args) -> WandererResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load_from_file(path)?
        }
        None => GameConfig::default(),
    };

    if args.seed.is_some() {
        config.generation.seed = args.seed;
    }
    config.generation.resolve_seed();

    config.validate()?;
    Ok(config)
}

/// Builds the world and runs the scene loop to completion.
async fn run_game(args: &Args) -> WandererResult<GameExit> {
    let mut config = load_config(args)?;
    info!("Using seed {}", config.generation.resolve_seed());

    if (config.screen_width, config.screen_height) != (SCREEN_WIDTH, SCREEN_HEIGHT) {
        request_new_screen_size(config.screen_width as f32, config.screen_height as f32);
    }

    let mut rng = create_rng(&config.generation);
    let game_state = GameState::generate(config, &mut rng)?;

    let mut scenes = SceneManager::new(game_state, InputHandler::new(), rng);
    let exit = scenes.run().await;
    if exit == GameExit::Defeated {
        info!("GAME OVER");
    }
    Ok(exit)
}
