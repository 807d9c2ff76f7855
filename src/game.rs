//! Menu / play / game-over controller
//!
//! The only input is `activate`. Crashing is the only transition the
//! simulation makes on its own.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::highscore::HighScore;
use crate::sim::{GamePhase, World, spawn_burst, step};

/// Things the shell may want to react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new run began from the menu or the game-over screen
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed { score: u32, new_best: bool },
}

pub struct Game<R: Rng = Pcg32> {
    config: GameConfig,
    phase: GamePhase,
    world: World,
    high_score: HighScore,
    /// Whether the last finished run raised the best score
    new_best: bool,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, high_score: HighScore, rng: R) -> Self {
        let world = World::new(&config);
        Self {
            config,
            phase: GamePhase::Menu,
            world,
            high_score,
            new_best: false,
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scripted setups.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn best(&self) -> u32 {
        self.high_score.best()
    }

    /// True on the game-over screen when that run beat the previous best.
    /// A tie does not count.
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    /// The single player input: start a run, or flap while playing.
    pub fn activate(&mut self) -> GameEvent {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                self.world.reset(&self.config);
                self.new_best = false;
                log::info!("{:?} -> Playing", self.phase);
                self.phase = GamePhase::Playing;
                GameEvent::Started
            }
            GamePhase::Playing => {
                self.flap();
                GameEvent::Flapped
            }
        }
    }

    fn flap(&mut self) {
        let body = &mut self.world.body;
        body.velocity_y = self.config.body.jump_impulse;
        let half = self.config.body.half_size;
        let (x, y) = (body.x - half, body.y + half);
        spawn_burst(
            &mut self.world.particles,
            x,
            y,
            self.config.particles.flap_burst,
            &self.config,
            &mut self.rng,
        );
    }

    /// Advance one frame. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Playing {
            return events;
        }

        let outcome = step(&mut self.world, &self.config, &mut self.rng);
        if outcome.scored > 0 {
            events.push(GameEvent::Scored {
                score: self.world.score,
            });
        }
        if outcome.crashed {
            self.phase = GamePhase::GameOver;
            let score = self.world.score;
            let new_best = self.high_score.submit(score);
            self.new_best = new_best;
            log::info!(
                "Playing -> GameOver after {} ticks, score {} (best {})",
                self.world.ticks,
                score,
                self.high_score.best()
            );
            events.push(GameEvent::Crashed { score, new_best });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};
    use rand::SeedableRng;

    fn new_game() -> Game {
        Game::new(
            GameConfig::default(),
            HighScore::load(Box::new(MemoryStore::new())),
            Pcg32::seed_from_u64(3),
        )
    }

    #[test]
    fn starts_in_menu_and_idles() {
        let mut game = new_game();
        assert_eq!(game.phase(), GamePhase::Menu);
        let y = game.world().body.y;
        assert!(game.tick().is_empty());
        assert_eq!(game.world().body.y, y);
        assert!(game.world().obstacles.is_empty());
    }

    #[test]
    fn activate_from_menu_starts_clean_run() {
        let mut game = new_game();
        assert_eq!(game.activate(), GameEvent::Started);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
        assert!(game.world().obstacles.is_empty());
        assert!(game.world().particles.is_empty());
        assert_eq!(game.world().body.velocity_y, 0.0);
    }

    #[test]
    fn tying_the_best_is_not_a_new_best() {
        let mut store = MemoryStore::new();
        store.set(crate::highscore::STORAGE_KEY, "5").unwrap();
        let mut game = Game::new(
            GameConfig::default(),
            HighScore::load(Box::new(store)),
            Pcg32::seed_from_u64(3),
        );
        game.activate();
        game.world_mut().score = 5;
        game.world_mut().body.y = game.config().playfield.ground_line();
        let events = game.tick();
        assert!(events.contains(&GameEvent::Crashed {
            score: 5,
            new_best: false
        }));
        assert!(!game.is_new_best());

        game.activate();
        assert!(!game.is_new_best());
        game.world_mut().score = 6;
        game.world_mut().body.y = game.config().playfield.ground_line();
        game.tick();
        assert!(game.is_new_best());
        assert_eq!(game.best(), 6);

        // Cleared once the next run starts.
        game.activate();
        assert!(!game.is_new_best());
    }

    #[test]
    fn flap_overwrites_velocity() {
        let mut game = new_game();
        game.activate();
        let jump = game.config().body.jump_impulse;

        for prior in [12.0, -3.0, -20.0, 0.0] {
            game.world_mut().body.velocity_y = prior;
            assert_eq!(game.activate(), GameEvent::Flapped);
            assert_eq!(game.world().body.velocity_y, jump);
            assert_eq!(game.phase(), GamePhase::Playing);
        }
    }

    #[test]
    fn flap_spawns_small_burst_at_trailing_edge() {
        let mut game = new_game();
        game.activate();
        game.activate();
        let cfg = game.config().clone();
        let body = game.world().body.clone();
        let particles = &game.world().particles;
        assert_eq!(particles.len(), cfg.particles.flap_burst);
        for p in particles {
            assert_eq!(p.x, body.x - cfg.body.half_size);
            assert_eq!(p.y, body.y + cfg.body.half_size);
        }
    }
}
