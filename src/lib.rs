//! flappy-term - a Flappy Bird clone for the terminal
//!
//! Core modules:
//! - `config`: playfield geometry and tuning, optionally from RON
//! - `sim`: deterministic simulation (body, obstacles, particles, collision)
//! - `game`: menu / playing / game-over controller
//! - `store`, `highscore`: best score kept in a string key-value store
//! - `render`: half-block pixel rendering of a fixed logical playfield
//! - `input`: terminal events to commands
//! - `audio`: synthesized sound effects
//! - `app`: terminal setup and the frame loop

pub mod app;
pub mod audio;
pub mod config;
pub mod game;
pub mod highscore;
pub mod input;
pub mod render;
pub mod sim;
pub mod store;

pub use config::GameConfig;
pub use game::{Game, GameEvent};
pub use highscore::HighScore;
pub use sim::GamePhase;
pub use store::{FileStore, KeyValueStore, MemoryStore};
