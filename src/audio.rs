//! Synthesized sound effects
//!
//! Each cue is rendered once with fundsp into a sample buffer and replayed
//! through a detached rodio sink. No audio device means silence, not an error.

use fundsp::prelude32::*;
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};

use crate::game::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Score,
    Crash,
}

impl Cue {
    /// Which sound, if any, a game event makes
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Started => None,
            GameEvent::Flapped => Some(Cue::Flap),
            GameEvent::Scored { .. } => Some(Cue::Score),
            GameEvent::Crashed { .. } => Some(Cue::Crash),
        }
    }
}

pub struct Audio {
    stream: Option<OutputStream>,
    muted: bool,
    flap: Vec<f32>,
    score: Vec<f32>,
    crash: Vec<f32>,
}

impl Audio {
    /// Open the default output device, or fall back to silence.
    pub fn open(muted: bool) -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                log::warn!("No audio output ({}), running silent", e);
                None
            }
        };
        Self::with_stream(stream, muted)
    }

    pub fn silent() -> Self {
        Self::with_stream(None, true)
    }

    fn with_stream(stream: Option<OutputStream>, muted: bool) -> Self {
        Self {
            stream,
            muted,
            flap: flap_clip(),
            score: score_clip(),
            crash: crash_clip(),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "muted" } else { "on" });
        self.muted
    }

    pub fn play(&self, cue: Cue) {
        if self.muted {
            return;
        }
        let Some(stream) = &self.stream else {
            return;
        };
        let clip = match cue {
            Cue::Flap => &self.flap,
            Cue::Score => &self.score,
            Cue::Crash => &self.crash,
        };
        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, clip.clone()));
        sink.detach(); // Play in background
    }
}

/// Short upward chirp
fn flap_clip() -> Vec<f32> {
    let freq = lfo(|t: f32| 300.0 + 300.0 * (t / 0.1).min(1.0));
    let gain = lfo(|t: f32| 0.1 * (1.0 - (t / 0.12).min(1.0)));
    render((freq >> sine()) * gain, 0.12)
}

/// Two-note blip
fn score_clip() -> Vec<f32> {
    let freq = lfo(|t: f32| if t < 0.06 { 880.0 } else { 1320.0 });
    let gain = lfo(|t: f32| 0.08 * (1.0 - (t / 0.15).min(1.0)));
    render((freq >> square()) * gain, 0.15)
}

/// Falling saw: 400Hz to 80Hz over 0.4s, fading out over 0.5s
fn crash_clip() -> Vec<f32> {
    let freq = lfo(|t: f32| 400.0 + (80.0 - 400.0) * (t / 0.4).min(1.0));
    let gain = lfo(|t: f32| 0.15 * (1.0 - (t / 0.5).min(1.0)));
    render((freq >> saw()) * gain, 0.5)
}

fn render(mut sound: impl AudioUnit, seconds: f32) -> Vec<f32> {
    sound.set_sample_rate(SAMPLE_RATE as f64);
    let frames = (SAMPLE_RATE as f32 * seconds) as usize;
    (0..frames).map(|_| sound.get_mono()).collect()
}
