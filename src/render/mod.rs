//! Terminal rendering
//!
//! The playfield is drawn in its own fixed logical coordinates and mapped
//! onto the terminal's half-block pixel grid by a single uniform scale,
//! centered with letterbox bars. Rendering never touches game state.

pub mod digits;
pub mod pixels;
pub mod scene;

use crossterm::{cursor, queue, style};
use std::io::{self, Write};

use crate::config::PlayfieldConfig;
pub use pixels::{PixelBuf, Rgb};
pub use scene::render;

/// Smallest terminal (in cells) worth drawing into
pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

pub const LETTERBOX: Rgb = Rgb(16, 16, 24);

/// Mapping from logical playfield units to surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    ox: f64,
    oy: f64,
    /// Pixel bounds of the playfield, half-open
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Viewport {
    /// Largest uniform scale that fits the playfield, centered.
    pub fn fit(surface_w: usize, surface_h: usize, playfield: &PlayfieldConfig) -> Self {
        let scale = (surface_w as f64 / playfield.width).min(surface_h as f64 / playfield.height);
        let ox = ((surface_w as f64 - playfield.width * scale) / 2.0).floor();
        let oy = ((surface_h as f64 - playfield.height * scale) / 2.0).floor();
        let mut vp = Self {
            scale,
            ox,
            oy,
            x0: 0,
            y0: 0,
            x1: 0,
            y1: 0,
        };
        vp.x0 = vp.px(0.0);
        vp.y0 = vp.py(0.0);
        vp.x1 = vp.px(playfield.width).min(surface_w as i32);
        vp.y1 = vp.py(playfield.height).min(surface_h as i32);
        vp
    }

    pub fn px(&self, x: f64) -> i32 {
        (self.ox + x * self.scale).round() as i32
    }

    pub fn py(&self, y: f64) -> i32 {
        (self.oy + y * self.scale).round() as i32
    }

    /// Logical x at the center of pixel column `px`
    pub fn world_x(&self, px: i32) -> f64 {
        (px as f64 + 0.5 - self.ox) / self.scale
    }

    pub fn world_y(&self, py: i32) -> f64 {
        (py as f64 + 0.5 - self.oy) / self.scale
    }
}

/// Text drawn over the pixels, in terminal cells
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// One frame's worth of pixels and overlay text
pub struct Frame {
    pixels: PixelBuf,
    labels: Vec<Label>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(MIN_COLS, MIN_ROWS)
    }
}

impl Frame {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            pixels: PixelBuf::new(cols as usize, rows as usize * 2, LETTERBOX),
            labels: Vec::new(),
        }
    }

    pub fn cols(&self) -> u16 {
        self.pixels.width() as u16
    }

    pub fn rows(&self) -> u16 {
        (self.pixels.height() / 2) as u16
    }

    /// Match the terminal size; returns true if it changed.
    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        if cols == self.cols() && rows == self.rows() {
            return false;
        }
        self.pixels.resize(cols as usize, rows as usize * 2, LETTERBOX);
        true
    }

    pub fn pixels(&self) -> &PixelBuf {
        &self.pixels
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub(crate) fn begin(&mut self) -> &mut PixelBuf {
        self.labels.clear();
        self.pixels.clear(LETTERBOX);
        &mut self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut PixelBuf {
        &mut self.pixels
    }

    /// Queue text centered on pixel column `cx`, on the cell row holding
    /// pixel row `py`. Text wider than the terminal is cut.
    pub fn label_centered(&mut self, cx: i32, py: i32, text: &str, fg: Rgb, bg: Rgb) {
        let cols = self.cols() as i32;
        let row = py.div_euclid(2);
        if cols == 0 || row < 0 || row >= self.rows() as i32 {
            return;
        }
        let text: String = text.chars().take(cols as usize).collect();
        let len = text.chars().count() as i32;
        let col = (cx - len / 2).clamp(0, cols - len);
        self.labels.push(Label {
            col: col as u16,
            row: row as u16,
            text,
            fg,
            bg,
        });
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        self.pixels.render(out)?;
        for label in &self.labels {
            queue!(
                out,
                cursor::MoveTo(label.col, label.row),
                style::SetForegroundColor(style::Color::Rgb {
                    r: label.fg.0,
                    g: label.fg.1,
                    b: label.fg.2,
                }),
                style::SetBackgroundColor(style::Color::Rgb {
                    r: label.bg.0,
                    g: label.bg.1,
                    b: label.bg.2,
                }),
                style::Print(&label.text),
            )?;
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_letterboxes_wide_surfaces() {
        let pf = PlayfieldConfig::default();
        let vp = Viewport::fit(200, 60, &pf);
        assert_eq!(vp.scale, 0.1);
        assert_eq!((vp.y0, vp.y1), (0, 60));
        assert_eq!(vp.x1 - vp.x0, 40);
        assert_eq!(vp.x0, 80);
    }

    #[test]
    fn fit_letterboxes_tall_surfaces() {
        let pf = PlayfieldConfig::default();
        let vp = Viewport::fit(40, 200, &pf);
        assert_eq!(vp.scale, 0.1);
        assert_eq!((vp.x0, vp.x1), (0, 40));
        assert_eq!(vp.y1 - vp.y0, 60);
    }

    #[test]
    fn world_and_pixel_agree() {
        let pf = PlayfieldConfig::default();
        let vp = Viewport::fit(200, 60, &pf);
        for px in vp.x0..vp.x1 {
            let wx = vp.world_x(px);
            assert!((0.0..pf.width).contains(&wx));
        }
    }

    #[test]
    fn labels_are_clamped_into_the_terminal() {
        let mut frame = Frame::new(20, 10);
        frame.label_centered(0, 4, "HELLO", Rgb(255, 255, 255), LETTERBOX);
        frame.label_centered(10, 100, "OFFSCREEN", Rgb(255, 255, 255), LETTERBOX);
        frame.label_centered(10, 6, "A VERY LONG LINE OF TEXT", Rgb(255, 255, 255), LETTERBOX);
        let labels = frame.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!((labels[0].col, labels[0].row), (0, 2));
        assert_eq!(labels[1].text.len(), 20);
        assert_eq!(labels[1].col, 0);
    }

    #[test]
    fn resize_reports_change() {
        let mut frame = Frame::new(20, 10);
        assert!(!frame.resize(20, 10));
        assert!(frame.resize(30, 12));
        assert_eq!((frame.cols(), frame.rows()), (30, 12));
        assert_eq!(frame.pixels().height(), 24);
    }
}
