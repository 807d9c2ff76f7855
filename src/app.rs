//! Terminal shell: setup/teardown, the frame loop and input dispatch
//!
//! Everything runs on one thread. Input is read while waiting for the next
//! frame deadline and handled immediately; a tick and a render run back to
//! back once the deadline passes.

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, queue, terminal,
};
use rand::Rng;
use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

use crate::audio::{Audio, Cue};
use crate::game::Game;
use crate::input::{Command, map_event};
use crate::render::{Frame, MIN_COLS, MIN_ROWS, render};

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        if let Err(e) = restored.and_then(|_| terminal::disable_raw_mode()) {
            log::warn!("Terminal restore failed: {}", e);
        }
    }
}

/// Self-rescheduling frame clock with a stop flag
#[derive(Debug)]
pub struct FrameScheduler {
    frame: Duration,
    next: Instant,
    stopped: bool,
}

impl FrameScheduler {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            next: now,
            stopped: false,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left before the pending frame is due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Book the next frame. After a stall the schedule restarts from `now`
    /// rather than bursting to catch up.
    pub fn reschedule(&mut self, now: Instant) {
        self.next += self.frame;
        if self.next <= now {
            self.next = now + self.frame;
        }
    }

    /// Cancel the pending frame; nothing further is scheduled.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

pub struct App<R: Rng> {
    game: Game<R>,
    audio: Audio,
    frame: Frame,
    scheduler: FrameScheduler,
    started: Instant,
}

impl<R: Rng> App<R> {
    pub fn new(game: Game<R>, audio: Audio, fps: u32) -> Self {
        let now = Instant::now();
        Self {
            game,
            audio,
            frame: Frame::default(),
            scheduler: FrameScheduler::new(fps, now),
            started: now,
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Activate => {
                let event = self.game.activate();
                if let Some(cue) = Cue::for_event(&event) {
                    self.audio.play(cue);
                }
            }
            Command::ToggleMute => {
                self.audio.toggle_mute();
            }
            Command::Quit => {
                log::info!("Quit requested");
                self.scheduler.stop();
            }
        }
    }

    /// Run until quit. Only terminal I/O errors end the loop early.
    pub fn run(&mut self, out: &mut impl Write) -> io::Result<()> {
        log::info!(
            "Frame loop started ({:?} per frame)",
            self.scheduler.frame_duration()
        );
        while !self.scheduler.is_stopped() {
            let wait = self.scheduler.remaining(Instant::now());
            if event::poll(wait)? {
                if let Some(command) = map_event(&event::read()?) {
                    self.handle(command);
                }
                // Mouse motion can arrive faster than frames; don't let it starve them.
                if self.scheduler.is_stopped() || !self.scheduler.is_due(Instant::now()) {
                    continue;
                }
            }
            self.run_frame(out)?;
            self.scheduler.reschedule(Instant::now());
        }
        log::info!("Frame loop stopped");
        Ok(())
    }

    fn run_frame(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.frame_on(terminal::size(), out).map(|_| ())
    }

    /// One tick and render onto a surface of `size` cells. Without a usable
    /// surface nothing runs and nothing is written; returns whether the
    /// frame ran.
    pub fn frame_on(
        &mut self,
        size: io::Result<(u16, u16)>,
        out: &mut impl Write,
    ) -> io::Result<bool> {
        let Some((cols, rows)) = usable_surface(size) else {
            return Ok(false);
        };
        if self.frame.resize(cols, rows) {
            queue!(out, terminal::Clear(terminal::ClearType::All))?;
        }

        for event in self.game.tick() {
            if let Some(cue) = Cue::for_event(&event) {
                self.audio.play(cue);
            }
        }
        render(&self.game, self.started.elapsed().as_secs_f64(), &mut self.frame);
        self.frame.present(out)?;
        Ok(true)
    }
}

/// The terminal size, if it is known and big enough to draw on.
pub fn usable_surface(size: io::Result<(u16, u16)>) -> Option<(u16, u16)> {
    match size {
        Ok((cols, rows)) if cols >= MIN_COLS && rows >= MIN_ROWS => Some((cols, rows)),
        Ok((cols, rows)) => {
            log::debug!("Terminal {}x{} too small, skipping frame", cols, rows);
            None
        }
        Err(e) => {
            log::debug!("No drawing surface this frame: {}", e);
            None
        }
    }
}
