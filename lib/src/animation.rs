//! Hue-rotating repaint loop.
//!
//! Glyphs are computed once; every tick redraws the cached grid in place and
//! shifts the hue of each colored cell. Grayscale cells keep their tint.

use crate::ascii::{CellGrid, LineEnding, Tint};
use crate::color::ColorMode;
use crate::error::Result;
use crate::terminal::{QuitSignal, RawModeGuard, TerminalKeys};
use crossterm::cursor::{MoveTo, MoveUp};
use crossterm::queue;
use crossterm::style::ResetColor;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Hue shift per tick, the range it wraps in, and delay between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Degrees added to every colored cell per tick
    pub hue_step: f64,
    /// Stored hues stay in `[0, hue_range)`
    pub hue_range: f64,
    pub frame_delay: Duration,
}

impl Rotation {
    /// Smooth 2° steps at 20 fps over the full wheel in truecolor; 20° once a
    /// second in retro, wrapping at 60° since only six hues are distinguishable.
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Truecolor => Self {
                hue_step: 2.0,
                hue_range: 360.0,
                frame_delay: Duration::from_millis(50),
            },
            ColorMode::Retro => Self {
                hue_step: 20.0,
                hue_range: 60.0,
                frame_delay: Duration::from_millis(1000),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    Stopped,
}

/// Animation session over a frozen glyph grid
pub struct RainbowAnimation {
    grid: CellGrid,
    mode: ColorMode,
    rotation: Rotation,
    state: AnimationState,
    ticks: u64,
}

impl RainbowAnimation {
    pub fn new(grid: CellGrid, mode: ColorMode) -> Self {
        Self {
            grid,
            mode,
            rotation: Rotation::for_mode(mode),
            state: AnimationState::Running,
            ticks: 0,
        }
    }

    /// Override the default step and delay
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Shift every colored cell's hue by one step, wrapping at the mode's range
    pub fn advance_hues(&mut self) {
        let Rotation {
            hue_step,
            hue_range,
            ..
        } = self.rotation;
        for cell in self.grid.cells_mut() {
            if let Tint::Hue(hsv) = &mut cell.tint {
                hsv.hue = (hsv.hue + hue_step).rem_euclid(hue_range);
            }
        }
    }

    /// Lines the cursor climbs after a frame: every row plus the spacer line
    fn frame_lines(&self) -> u16 {
        u16::try_from(self.grid.height() + 1).unwrap_or(u16::MAX)
    }

    /// One Running -> Running/Stopped transition
    ///
    /// Draws the current hues, advances them, returns the cursor to the top
    /// of the frame, sleeps, then polls for a quit key.
    pub fn tick<W: Write, Q: QuitSignal>(
        &mut self,
        out: &mut W,
        quit: &mut Q,
    ) -> io::Result<AnimationState> {
        if self.state == AnimationState::Stopped {
            return Ok(self.state);
        }

        self.grid.write_frame(out, self.mode, LineEnding::CrLf)?;
        out.write_all(LineEnding::CrLf.as_str().as_bytes())?;
        self.advance_hues();
        queue!(out, MoveUp(self.frame_lines()))?;
        out.flush()?;
        self.ticks += 1;
        log::trace!("rainbow tick {}", self.ticks);

        if !self.rotation.frame_delay.is_zero() {
            thread::sleep(self.rotation.frame_delay);
        }

        if quit.quit_requested()? {
            log::debug!("quit requested after {} ticks", self.ticks);
            self.state = AnimationState::Stopped;
        }
        Ok(self.state)
    }

    /// Repaint until a quit key arrives, then clear the screen
    pub fn run<W: Write, Q: QuitSignal>(&mut self, out: &mut W, quit: &mut Q) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        while self.tick(out, quit)? == AnimationState::Running {}

        queue!(out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        out.flush()
    }
}

/// Animate a grid on the real terminal
///
/// Raw mode is held by a guard for the whole session, so the terminal is
/// restored on quit, on write errors, and on panic.
pub fn animate(grid: CellGrid, mode: ColorMode) -> Result<()> {
    let mut guard = RawModeGuard::enter()?;
    log::debug!(
        "starting rainbow animation on {}x{} grid ({:?})",
        grid.width(),
        grid.height(),
        mode
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut animation = RainbowAnimation::new(grid, mode);
    let result = animation.run(&mut out, &mut TerminalKeys);

    let restored = guard.exit();
    Ok(settle(result, restored)?)
}

/// Combine the loop's outcome with the terminal restore
///
/// A failed write outranks a failed restore; the restore error is only
/// logged in that case.
fn settle(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    match (result, restored) {
        (Err(e), Err(restore)) => {
            log::warn!("failed to restore terminal mode: {restore}");
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}
