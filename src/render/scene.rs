//! Drawing the playfield
//!
//! Back to front: sky, clouds, hills, obstacles, ground, particles, body,
//! overlay. Background motion comes from wall-clock time only.

use rand::Rng;

use super::digits::draw_number;
use super::pixels::{PixelBuf, Rgb};
use super::{Frame, Viewport};
use crate::config::GameConfig;
use crate::game::Game;
use crate::sim::{Body, GamePhase, Obstacle, Particle};

// ── Colors ──────────────────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const CLOUD: Rgb = Rgb(250, 250, 255);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const SPARK: Rgb = Rgb(255, 210, 90);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);
const PANEL: Rgb = Rgb(220, 195, 120);

/// Decorative scroll rate in logical units per second
const SCROLL_PER_SEC: f64 = 180.0;
/// Obstacle cap overhang and height
const CAP_EXTRA: f64 = 5.0;
const CAP_HEIGHT: f64 = 20.0;
const PARTICLE_SIZE: f64 = 4.0;
const GRASS_HEIGHT: f64 = 8.0;

/// Paint `game` into `frame`. `time` is wall-clock seconds and only moves
/// decoration.
pub fn render<R: Rng>(game: &Game<R>, time: f64, frame: &mut Frame) {
    let config = game.config();
    let world = game.world();
    let phase = game.phase();

    let buf = frame.begin();
    let vp = Viewport::fit(buf.width(), buf.height(), &config.playfield);
    if vp.x1 <= vp.x0 || vp.y1 <= vp.y0 {
        return;
    }
    let mut painter = Painter { buf, vp };

    let scroll = time * SCROLL_PER_SEC;
    painter.sky(config);
    painter.clouds(config, scroll);
    painter.hills(config, scroll);
    for ob in &world.obstacles {
        painter.obstacle(ob, config);
    }
    painter.ground(config, scroll);
    for p in &world.particles {
        painter.particle(p);
    }

    let mut body = world.body.clone();
    if phase == GamePhase::Menu {
        body.y += (time * 5.0).sin() * 8.0;
    }
    let wing_up = (time * 8.0) as i64 % 2 == 0;
    painter.body(&body, config.body.half_size, wing_up);

    overlay(frame, &vp, game, phase);
}

fn overlay<R: Rng>(frame: &mut Frame, vp: &Viewport, game: &Game<R>, phase: GamePhase) {
    let pf = &game.config().playfield;
    let cx = vp.px(pf.width / 2.0);
    let digit_size = ((vp.scale * 10.0).round() as i32).max(1);

    match phase {
        GamePhase::Menu => {
            frame.label_centered(cx, vp.py(140.0), " F L A P P Y ", BIRD_Y, SHADOW);
            frame.label_centered(cx, vp.py(200.0), " SPACE / CLICK TO FLAP ", WHITE, SHADOW);
            if game.best() > 0 {
                frame.label_centered(cx, vp.py(420.0), &format!(" BEST {} ", game.best()), WHITE, SHADOW);
            }
            frame.label_centered(cx, vp.py(460.0), " Q QUIT  M MUTE ", WHITE, SHADOW);
        }
        GamePhase::Playing => {
            draw_number(frame.pixels_mut(), cx, vp.py(30.0), game.score(), WHITE, digit_size);
        }
        GamePhase::GameOver => {
            let buf = frame.pixels_mut();
            buf.dim_rect(vp.x0, vp.y0, vp.x1 - vp.x0, vp.y1 - vp.y0);

            let (px0, py0) = (vp.px(pf.width / 2.0 - 120.0), vp.py(200.0));
            let (px1, py1) = (vp.px(pf.width / 2.0 + 120.0), vp.py(380.0));
            buf.fill_rect(px0 - 1, py0 - 1, px1 - px0 + 2, py1 - py0 + 2, SHADOW);
            buf.fill_rect(px0, py0, px1 - px0, py1 - py0, PANEL);

            frame.label_centered(cx, vp.py(220.0), "GAME OVER", SHADOW, PANEL);
            frame.label_centered(cx, vp.py(265.0), &format!("SCORE {}", game.score()), SHADOW, PANEL);
            let best = if game.is_new_best() {
                format!("BEST {} NEW!", game.best())
            } else {
                format!("BEST {}", game.best())
            };
            frame.label_centered(cx, vp.py(300.0), &best, SHADOW, PANEL);
            frame.label_centered(cx, vp.py(345.0), "SPACE TO RETRY", SHADOW, PANEL);
        }
    }
}

/// Obstacle cross-section from its left edge (0) to its right edge (1)
const PIPE_STOPS: [(f64, Rgb); 5] = [
    (0.0, PIPE_L),
    (0.25, PIPE_M),
    (0.39, PIPE_HI),
    (0.63, PIPE_R),
    (1.0, PIPE_L),
];

fn pipe_color(frac: f64) -> Rgb {
    let frac = frac.clamp(0.0, 1.0);
    for pair in PIPE_STOPS.windows(2) {
        let ((a, from), (b, to)) = (pair[0], pair[1]);
        if frac <= b {
            let t = ((frac - a) / (b - a) * 256.0) as u16;
            return Rgb::lerp(from, to, t.min(256));
        }
    }
    PIPE_L
}

/// Pixel buffer plus the mapping into it; every fill is clipped to the
/// playfield so nothing leaks into the letterbox.
struct Painter<'a> {
    buf: &'a mut PixelBuf,
    vp: Viewport,
}

impl Painter<'_> {
    fn fill_px(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgb) {
        for y in y0.max(self.vp.y0)..y1.min(self.vp.y1) {
            for x in x0.max(self.vp.x0)..x1.min(self.vp.x1) {
                self.buf.set(x, y, c);
            }
        }
    }

    fn inside(&self, x: i32, y: i32) -> bool {
        x >= self.vp.x0 && x < self.vp.x1 && y >= self.vp.y0 && y < self.vp.y1
    }

    fn sky(&mut self, config: &GameConfig) {
        let vp = self.vp;
        let ground = vp.py(config.playfield.ground_line());
        let span = (ground - vp.y0).max(1);
        for y in vp.y0..ground.min(vp.y1) {
            let t = ((y - vp.y0) * 256 / span) as u16;
            self.fill_px(vp.x0, y, vp.x1, y + 1, Rgb::lerp(SKY_TOP, SKY_BOT, t));
        }
    }

    fn clouds(&mut self, config: &GameConfig, scroll: f64) {
        let vp = self.vp;
        let w = config.playfield.width;
        let wrap = w + 120.0;
        for i in 0..3 {
            let i = i as f64;
            let cx = w + 60.0 - (i * 170.0 + scroll * 0.1).rem_euclid(wrap);
            let cy = 70.0 + i * 55.0;
            let (rx, ry) = (34.0 - i * 4.0, 12.0);
            for y in vp.py(cy - ry)..=vp.py(cy + ry) {
                for x in vp.px(cx - rx)..=vp.px(cx + rx) {
                    let dx = (vp.world_x(x) - cx) / rx;
                    let dy = (vp.world_y(y) - cy) / ry;
                    if dx * dx + dy * dy <= 1.0 && self.inside(x, y) {
                        self.buf.blend(x, y, CLOUD, 0.8);
                    }
                }
            }
        }
    }

    fn hills(&mut self, config: &GameConfig, scroll: f64) {
        let vp = self.vp;
        let ground_y = config.playfield.ground_line();
        let base = vp.py(ground_y);
        for x in vp.x0..vp.x1 {
            let wx = vp.world_x(x);
            let fx = (wx + scroll * 0.2) * 0.02;
            let h = fx.sin() * 25.0 + (fx * 1.7).sin() * 12.0 + 45.0;
            self.fill_px(x, vp.py(ground_y - h), x + 1, base, HILL_FAR);
        }
        for x in vp.x0..vp.x1 {
            let wx = vp.world_x(x);
            let fx = (wx + scroll * 0.4) * 0.03;
            let h = fx.sin() * 16.0 + (fx * 2.3).sin() * 8.0 + 24.0;
            self.fill_px(x, vp.py(ground_y - h), x + 1, base, HILL_NEAR);
        }
    }

    fn ground(&mut self, config: &GameConfig, scroll: f64) {
        let vp = self.vp;
        let ground_y = config.playfield.ground_line();
        let top = vp.py(ground_y);
        let grass_end = vp.py(ground_y + GRASS_HEIGHT).max(top + 1);
        for x in vp.x0..vp.x1 {
            let wx = vp.world_x(x) + scroll;
            let alt = (wx / 12.0).floor() as i64 % 2 == 0;
            self.fill_px(x, top, x + 1, top + 1, if alt { GRASS } else { GRASS_LIGHT });
            self.fill_px(x, top + 1, x + 1, grass_end, GRASS);
            for y in grass_end..vp.y1 {
                let depth = vp.world_y(y) - ground_y;
                let stripe = (wx + depth * 2.0).rem_euclid(24.0) < 12.0;
                self.buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }

    fn obstacle(&mut self, ob: &Obstacle, config: &GameConfig) {
        let vp = self.vp;
        let width = config.obstacles.width;
        let ground = vp.py(config.playfield.ground_line());

        let cap_left = ob.x - CAP_EXTRA;
        let cap_width = width + 2.0 * CAP_EXTRA;
        let top_cap = vp.py(ob.gap_top - CAP_HEIGHT);
        let gap_top = vp.py(ob.gap_top);
        let gap_bottom = vp.py(ob.gap_bottom);
        let bottom_cap = vp.py(ob.gap_bottom + CAP_HEIGHT);

        self.shaded(ob.x, width, vp.y0, top_cap);
        self.cap(cap_left, cap_width, top_cap, gap_top);
        self.cap(cap_left, cap_width, gap_bottom, bottom_cap);
        self.shaded(ob.x, width, bottom_cap, ground);
    }

    /// Vertical strip `width` logical units wide starting at logical `left`,
    /// shaded across its width.
    fn shaded(&mut self, left: f64, width: f64, y0: i32, y1: i32) {
        let vp = self.vp;
        for x in vp.px(left)..vp.px(left + width) {
            let frac = (vp.world_x(x) - left) / width;
            self.fill_px(x, y0, x + 1, y1, pipe_color(frac));
        }
    }

    fn cap(&mut self, left: f64, width: f64, y0: i32, y1: i32) {
        let vp = self.vp;
        let y1 = y1.max(y0 + 1);
        self.shaded(left, width, y0, y1);
        let (x0, x1) = (vp.px(left), vp.px(left + width));
        self.fill_px(x0, y0, x1, y0 + 1, CAP_DARK);
        self.fill_px(x0, y1 - 1, x1, y1, CAP_DARK);
    }

    fn particle(&mut self, p: &Particle) {
        let vp = self.vp;
        let half = PARTICLE_SIZE / 2.0;
        let (x0, y0) = (vp.px(p.x - half), vp.py(p.y - half));
        let x1 = vp.px(p.x + half).max(x0 + 1);
        let y1 = vp.py(p.y + half).max(y0 + 1);
        let alpha = p.opacity();
        for y in y0..y1 {
            for x in x0..x1 {
                if self.inside(x, y) {
                    self.buf.blend(x, y, SPARK, alpha);
                }
            }
        }
    }

    /// The body, rotated about its center by `body.rotation` degrees.
    /// Positive rotation tips the beak down.
    fn body(&mut self, body: &Body, hs: f64, wing_up: bool) {
        let vp = self.vp;
        let (sin, cos) = body.rotation.to_radians().sin_cos();
        let reach = hs * 1.6;
        let wing_y = if wing_up { -0.1 } else { 0.2 };

        for y in vp.py(body.y - reach)..=vp.py(body.y + reach) {
            for x in vp.px(body.x - reach)..=vp.px(body.x + reach) {
                if !self.inside(x, y) {
                    continue;
                }
                let dx = vp.world_x(x) - body.x;
                let dy = vp.world_y(y) - body.y;
                // Back into the body's own frame, in half-size units
                let lx = (dx * cos + dy * sin) / hs;
                let ly = (-dx * sin + dy * cos) / hs;

                let color = if lx > 0.7 && lx < 1.45 && ly > -0.15 && ly < 0.35 {
                    Some(if ly < 0.1 { BIRD_BEAK_HI } else { BIRD_BEAK })
                } else if lx > -1.4 && lx < -1.0 && ly.abs() < 0.2 {
                    Some(BIRD_WING)
                } else if lx.abs() <= 1.0 && ly.abs() <= 1.0 {
                    Some(if lx > 0.2 && lx < 0.75 && ly > -0.75 && ly < -0.15 {
                        if lx > 0.5 && ly > -0.5 { BIRD_PUPIL } else { BIRD_EYE }
                    } else if lx > -0.85 && lx < -0.05 && ly > wing_y && ly < wing_y + 0.5 {
                        BIRD_WING
                    } else if ly < -0.7 {
                        BIRD_HI
                    } else {
                        BIRD_Y
                    })
                } else {
                    None
                };
                if let Some(c) = color {
                    self.buf.set(x, y, c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::{HighScore, STORAGE_KEY};
    use crate::render::LETTERBOX;
    use crate::store::{KeyValueStore, MemoryStore};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn game() -> Game {
        Game::new(
            GameConfig::default(),
            HighScore::load(Box::new(MemoryStore::new())),
            Pcg32::seed_from_u64(11),
        )
    }

    fn count(frame: &Frame, c: Rgb) -> usize {
        let buf = frame.pixels();
        (0..buf.height())
            .flat_map(|y| (0..buf.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.get(x, y) == c)
            .count()
    }

    #[test]
    fn any_surface_size_renders() {
        let mut g = game();
        g.activate();
        for _ in 0..30 {
            g.tick();
        }
        for (cols, rows) in [(1, 1), (2, 1), (20, 10), (80, 24), (300, 100), (13, 70)] {
            let mut frame = Frame::new(cols, rows);
            render(&g, 1.25, &mut frame);
        }
    }

    #[test]
    fn render_is_read_only() {
        let mut g = game();
        g.activate();
        for _ in 0..20 {
            g.tick();
        }
        let before = g.world().clone();
        let mut frame = Frame::new(80, 40);
        render(&g, 3.0, &mut frame);
        let after = g.world();
        assert_eq!(before.body, after.body);
        assert_eq!(before.obstacles, after.obstacles);
        assert_eq!(before.particles, after.particles);
        assert_eq!(before.score, after.score);
    }

    #[test]
    fn letterbox_stays_clear() {
        let g = game();
        let mut frame = Frame::new(120, 30);
        render(&g, 0.0, &mut frame);
        let vp = Viewport::fit(120, 60, &g.config().playfield);
        let buf = frame.pixels();
        for y in 0..buf.height() {
            for x in 0..vp.x0 as usize {
                assert_eq!(buf.get(x, y), LETTERBOX);
            }
            for x in vp.x1 as usize..buf.width() {
                assert_eq!(buf.get(x, y), LETTERBOX);
            }
        }
    }

    #[test]
    fn menu_has_instructions_and_playing_has_none() {
        let mut g = game();
        let mut frame = Frame::new(80, 40);
        render(&g, 0.0, &mut frame);
        assert!(frame.labels().iter().any(|l| l.text.contains("SPACE")));

        g.activate();
        render(&g, 0.0, &mut frame);
        assert!(frame.labels().is_empty());
    }

    #[test]
    fn game_over_shows_score_and_best() {
        let mut g = game();
        g.activate();
        g.world_mut().score = 4;
        g.world_mut().body.y = g.config().playfield.ground_line();
        g.tick();
        assert_eq!(g.phase(), GamePhase::GameOver);

        let mut frame = Frame::new(80, 40);
        render(&g, 0.0, &mut frame);
        let texts: Vec<&str> = frame.labels().iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"SCORE 4"));
        assert!(texts.contains(&"BEST 4 NEW!"));
    }

    #[test]
    fn tying_the_stored_best_is_not_labelled_new() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "5").unwrap();
        let mut g = Game::new(
            GameConfig::default(),
            HighScore::load(Box::new(store)),
            Pcg32::seed_from_u64(11),
        );
        g.activate();
        g.world_mut().score = 5;
        g.world_mut().body.y = g.config().playfield.ground_line();
        g.tick();
        assert_eq!(g.phase(), GamePhase::GameOver);

        let mut frame = Frame::new(80, 40);
        render(&g, 0.0, &mut frame);
        let texts: Vec<&str> = frame.labels().iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"BEST 5"));
        assert!(!texts.iter().any(|t| t.contains("NEW!")));
    }

    #[test]
    fn faded_particles_are_fainter() {
        let mut g = game();
        g.activate();
        let mut fresh = Frame::new(100, 50);
        let mut faded = Frame::new(100, 50);
        let spark = |life| Particle {
            x: 300.0,
            y: 250.0,
            vx: 0.0,
            vy: 0.0,
            life,
            max_life: 30,
        };

        g.world_mut().particles = vec![spark(30)];
        render(&g, 0.0, &mut fresh);
        g.world_mut().particles = vec![spark(3)];
        render(&g, 0.0, &mut faded);

        assert!(count(&fresh, SPARK) > 0);
        assert_eq!(count(&faded, SPARK), 0);
    }

    #[test]
    fn pipe_color_follows_stops() {
        assert_eq!(pipe_color(0.0), PIPE_L);
        assert_eq!(pipe_color(0.25), PIPE_M);
        assert_eq!(pipe_color(0.39), PIPE_HI);
        assert_eq!(pipe_color(1.0), PIPE_L);
        // Out of range and NaN stay on the dark edge color.
        assert_eq!(pipe_color(-3.0), PIPE_L);
        assert_eq!(pipe_color(7.0), PIPE_L);
        assert_eq!(pipe_color(f64::NAN), PIPE_L);
    }
}
