//! Simulation state owned by the controller and mutated once per tick.

use super::entity::{Body, Obstacle, Particle};
use crate::config::GameConfig;

/// Where the game is in its menu / play / game-over cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
}

/// Everything the simulation step reads and writes
#[derive(Debug, Clone)]
pub struct World {
    pub body: Body,
    /// Oldest first
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Ticks since the current run started
    pub ticks: u64,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            body: Body::new(config),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            ticks: 0,
        }
    }

    /// Back to the start of a run.
    pub fn reset(&mut self, config: &GameConfig) {
        self.body = Body::new(config);
        self.obstacles.clear();
        self.particles.clear();
        self.score = 0;
        self.ticks = 0;
    }
}
