//! Terminal-collision predicate
//!
//! Axis-aligned boxes only. Any contact counts; there is no graze tolerance.

use super::entity::{Body, Obstacle};
use crate::config::GameConfig;

/// True when the body touches the ground, the ceiling, or any obstacle
/// outside its gap.
pub fn collides(body: &Body, obstacles: &[Obstacle], config: &GameConfig) -> bool {
    let (left, top, right, bottom) = body.bounds(config.body.half_size);

    if bottom >= config.playfield.ground_line() || top <= 0.0 {
        return true;
    }

    obstacles
        .iter()
        .any(|ob| hits_obstacle(left, top, right, bottom, ob, config.obstacles.width))
}

fn hits_obstacle(left: f64, top: f64, right: f64, bottom: f64, ob: &Obstacle, width: f64) -> bool {
    let overlaps = right > ob.x && left < ob.trailing_edge(width);
    overlaps && (top < ob.gap_top || bottom > ob.gap_bottom)
}
