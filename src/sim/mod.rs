//! Deterministic simulation
//!
//! No terminal, audio or storage dependencies live here. Randomness comes in
//! through a `rand::Rng` parameter.

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod step;

pub use collision::collides;
pub use entity::{Body, Obstacle, Particle};
pub use spawn::{should_spawn, spawn_burst, spawn_obstacle};
pub use state::{GamePhase, World};
pub use step::{StepOutcome, step};
