//! One simulation tick
//!
//! Order matters: integrate, scroll, score, cull, spawn, collide, particles.
//! Scoring runs before culling so an obstacle is never discarded on the same
//! tick it would have been counted.

use rand::Rng;

use super::collision::collides;
use super::spawn::{should_spawn, spawn_burst, spawn_obstacle};
use super::state::World;
use crate::config::GameConfig;

/// What a tick did, for the controller to act on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Obstacles cleared this tick
    pub scored: u32,
    pub crashed: bool,
}

pub fn step(world: &mut World, config: &GameConfig, rng: &mut impl Rng) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    world.ticks += 1;

    // Body
    let body = &mut world.body;
    body.velocity_y += config.body.gravity;
    body.y += body.velocity_y;
    body.rotation = (body.velocity_y * config.body.rotation_gain)
        .clamp(config.body.rotation_min, config.body.rotation_max);

    // Obstacles
    let width = config.obstacles.width;
    for ob in &mut world.obstacles {
        ob.x -= config.obstacles.speed;
    }
    for ob in world.obstacles.iter_mut().filter(|ob| !ob.passed) {
        if ob.trailing_edge(width) < world.body.x {
            ob.passed = true;
            outcome.scored += 1;
        }
    }
    world.score += outcome.scored;
    world.obstacles.retain(|ob| ob.trailing_edge(width) >= 0.0);

    if should_spawn(&world.obstacles, config) {
        world.obstacles.push(spawn_obstacle(config, rng));
    }

    if collides(&world.body, &world.obstacles, config) {
        outcome.crashed = true;
        let (x, y) = (world.body.x, world.body.y);
        spawn_burst(
            &mut world.particles,
            x,
            y,
            config.particles.crash_burst,
            config,
            rng,
        );
    }

    advance_particles(world, config);
    outcome
}

fn advance_particles(world: &mut World, config: &GameConfig) {
    for p in &mut world.particles {
        p.x += p.vx;
        p.y += p.vy;
        p.vy += config.particles.gravity;
        p.life = p.life.saturating_sub(1);
    }
    world.particles.retain(|p| p.life > 0);
}
