//! Playfield geometry and gameplay tuning
//!
//! Every value has a compiled-in default; a RON file can override any subset
//! of fields, section by section.

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Logical drawing space. Everything simulates in these units and is only
/// scaled at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f64,
    pub height: f64,
    pub ground_height: f64,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            ground_height: 50.0,
        }
    }
}

impl PlayfieldConfig {
    /// y coordinate of the top of the ground strip
    pub fn ground_line(&self) -> f64 {
        self.height - self.ground_height
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Fixed horizontal position of the body's center
    pub x: f64,
    /// Starting height of the body's center
    pub start_y: f64,
    pub half_size: f64,
    /// Added to vertical velocity every tick (positive is down)
    pub gravity: f64,
    /// Vertical velocity set by an impulse; negative is up
    pub jump_impulse: f64,
    /// Degrees of tilt per unit of vertical velocity
    pub rotation_gain: f64,
    pub rotation_min: f64,
    pub rotation_max: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            x: 80.0,
            start_y: 300.0,
            half_size: 15.0,
            gravity: 0.5,
            jump_impulse: -8.0,
            rotation_gain: 3.0,
            rotation_min: -30.0,
            rotation_max: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f64,
    pub gap_height: f64,
    /// Horizontal distance moved per tick
    pub speed: f64,
    /// World-space distance between consecutive obstacles
    pub spawn_interval: f64,
    /// Minimum distance between the gap and the top/bottom of the playfield
    pub min_margin: f64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            gap_height: 150.0,
            speed: 3.0,
            spawn_interval: 200.0,
            min_margin: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Ticks a particle lives
    pub lifetime: u32,
    pub gravity: f64,
    /// Half-range of the uniform launch velocity on each axis
    pub spread: f64,
    /// Upward bias subtracted from the launch vertical velocity
    pub lift: f64,
    pub flap_burst: usize,
    pub crash_burst: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            lifetime: 30,
            gravity: 0.1,
            spread: 4.0,
            lift: 2.0,
            flap_burst: 5,
            crash_burst: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub body: BodyConfig,
    pub obstacles: ObstacleConfig,
    pub particles: ParticleConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Load an optional override file and reject configs the simulation
    /// cannot honor.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        let problems = config.validate();
        if problems.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Largest gap_top the obstacle generator may produce
    pub fn max_gap_top(&self) -> f64 {
        self.playfield.height - self.obstacles.gap_height - self.obstacles.min_margin
    }

    /// Smallest gap_top the obstacle generator may produce
    pub fn min_gap_top(&self) -> f64 {
        self.obstacles.min_margin
    }

    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let pf = &self.playfield;
        let ob = &self.obstacles;
        let body = &self.body;
        let pt = &self.particles;

        // Comparisons below are all false for NaN, so catch it up front.
        let fields = [
            ("playfield.width", pf.width),
            ("playfield.height", pf.height),
            ("playfield.ground_height", pf.ground_height),
            ("body.x", body.x),
            ("body.start_y", body.start_y),
            ("body.half_size", body.half_size),
            ("body.gravity", body.gravity),
            ("body.jump_impulse", body.jump_impulse),
            ("body.rotation_gain", body.rotation_gain),
            ("body.rotation_min", body.rotation_min),
            ("body.rotation_max", body.rotation_max),
            ("obstacles.width", ob.width),
            ("obstacles.gap_height", ob.gap_height),
            ("obstacles.speed", ob.speed),
            ("obstacles.spawn_interval", ob.spawn_interval),
            ("obstacles.min_margin", ob.min_margin),
            ("particles.gravity", pt.gravity),
            ("particles.spread", pt.spread),
            ("particles.lift", pt.lift),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                problems.push(format!("{name} must be finite, got {value}"));
            }
        }

        if pf.width <= 0.0 || pf.height <= 0.0 {
            problems.push("playfield must have positive width and height".into());
        }
        if pf.ground_height < 0.0 || pf.ground_height >= pf.height {
            problems.push("ground_height must lie within the playfield".into());
        }
        if ob.speed <= 0.0 {
            problems.push("obstacles.speed must be positive".into());
        }
        if ob.width <= 0.0 || ob.gap_height <= 0.0 {
            problems.push("obstacle width and gap_height must be positive".into());
        }
        if ob.spawn_interval <= 0.0 || ob.spawn_interval > pf.width {
            problems.push("obstacles.spawn_interval must be in (0, playfield.width]".into());
        }
        if ob.min_margin <= 0.0 {
            problems.push("obstacles.min_margin must be positive".into());
        }
        // The lowest possible gap must still end above the ground.
        if ob.min_margin <= pf.ground_height {
            problems.push(format!(
                "obstacles.min_margin ({}) must exceed playfield.ground_height ({})",
                ob.min_margin, pf.ground_height
            ));
        }
        if self.min_gap_top() > self.max_gap_top() {
            problems.push("gap_height plus two margins does not fit in the playfield".into());
        }
        if body.jump_impulse >= 0.0 {
            problems.push("body.jump_impulse must be negative (upward)".into());
        }
        if body.half_size <= 0.0 {
            problems.push("body.half_size must be positive".into());
        }
        if body.start_y - body.half_size <= 0.0
            || body.start_y + body.half_size >= pf.ground_line()
        {
            problems.push("body.start_y leaves the body touching the ceiling or ground".into());
        }
        if body.rotation_min > body.rotation_max {
            problems.push("body.rotation_min exceeds rotation_max".into());
        }
        if pt.lifetime == 0 {
            problems.push("particles.lifetime must be at least 1".into());
        }
        if pt.spread <= 0.0 {
            problems.push("particles.spread must be positive".into());
        }
        problems
    }
}
