//! Obstacle generation and particle bursts
//!
//! Both take the random source as a parameter so a seeded generator gives
//! reproducible layouts.

use rand::Rng;

use super::entity::{Obstacle, Particle};
use crate::config::GameConfig;

/// New obstacle at the right edge with a uniformly placed gap.
pub fn spawn_obstacle(config: &GameConfig, rng: &mut impl Rng) -> Obstacle {
    let gap_top = rng.random_range(config.min_gap_top()..=config.max_gap_top());
    Obstacle::new(config.playfield.width, gap_top, config.obstacles.gap_height)
}

/// True when the newest obstacle has moved far enough left (or there is none).
pub fn should_spawn(obstacles: &[Obstacle], config: &GameConfig) -> bool {
    match obstacles.last() {
        None => true,
        Some(newest) => newest.x < config.playfield.width - config.obstacles.spawn_interval,
    }
}

/// Append `count` particles at (x, y) with a small upward bias.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    x: f64,
    y: f64,
    count: usize,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let spread = config.particles.spread;
    let life = config.particles.lifetime;
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle {
            x,
            y,
            vx: rng.random_range(-spread..spread),
            vy: rng.random_range(-spread..spread) - config.particles.lift,
            life,
            max_life: life,
        });
    }
}
