//! # Wanderer
//!
//! A small real-time 2D tile game: explore a randomly scattered map, talk to
//! NPCs, and fight monsters in a turn-based battle panel.
//!
//! ## Architecture Overview
//!
//! - **Game State**: a single [`GameState`] owns the map, entities, and the
//!   current mode (exploring, dialog, battle). It is advanced one tick at a
//!   time from an [`InputSnapshot`] and a [`Dice`] source, so whole sessions
//!   can be replayed deterministically.
//! - **Generation**: seeded map scattering and monster/NPC placement.
//! - **Input / Rendering**: thin macroquad wrappers that turn key state into
//!   snapshots and draw colored rectangles and text panels.
//! - **Scenes**: the fixed-timestep frame loop tying it all together.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

pub use config::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Wanderer game.
#[derive(thiserror::Error, Debug)]
pub enum WandererError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Wanderer codebase.
pub type WandererResult<T> = Result<T, WandererError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
