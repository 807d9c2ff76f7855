//! Plain data records for everything that moves.

use crate::config::GameConfig;

/// The player-controlled body. Only `y` and `velocity_y` evolve; `x` is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    /// Display tilt in degrees, derived from `velocity_y` each tick
    pub rotation: f64,
}

impl Body {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.body.x,
            y: config.body.start_y,
            velocity_y: 0.0,
            rotation: 0.0,
        }
    }

    /// Axis-aligned bounds as (left, top, right, bottom)
    pub fn bounds(&self, half_size: f64) -> (f64, f64, f64, f64) {
        (
            self.x - half_size,
            self.y - half_size,
            self.x + half_size,
            self.y + half_size,
        )
    }
}

/// A vertical barrier with a passable gap between `gap_top` and `gap_bottom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
    /// Set once, when the trailing edge passes the body
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f64, gap_top: f64, gap_height: f64) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + gap_height,
            passed: false,
        }
    }

    pub fn trailing_edge(&self, width: f64) -> f64 {
        self.x + width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining life as 0..=1, used for fade-out
    pub fn opacity(&self) -> f64 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f64 / self.max_life as f64
        }
    }
}
