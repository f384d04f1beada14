//! Raw terminal mode with panic-safe restoration, and quit-key polling.

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Whether a guard currently holds raw mode (read by the panic hook)
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that holds the terminal in raw mode with the cursor hidden.
///
/// Dropping it restores cooked mode and the cursor, so every exit path of the
/// owning scope (return, `?`, panic) leaves the terminal usable.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Enter raw mode and return a guard that will restore it on drop.
    ///
    /// # Errors
    /// Returns an error if stdin is not a terminal or raw mode cannot be set
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        let guard = Self { active: true };

        // Dropping `guard` on failure still restores the mode
        execute!(io::stdout(), Hide)?;
        Ok(guard)
    }

    /// Restore the terminal now; the later drop becomes a no-op.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            let shown = execute!(io::stdout(), Show);
            disable_raw_mode()?;
            shown?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log::warn!("failed to restore terminal mode: {e}");
        }
    }
}

/// Install a panic hook that restores the terminal before the panic message.
fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = execute!(io::stdout(), Show);
            let _ = disable_raw_mode();
        }
        original_hook(panic_info);
    }));
}

/// Source of the animation's stop request
pub trait QuitSignal {
    /// Check for a quit request without blocking
    fn quit_requested(&mut self) -> io::Result<bool>;
}

/// `q`, `Q`, or Ctrl+C (raw mode swallows SIGINT)
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Polls the terminal's input queue with a zero timeout
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl QuitSignal for TerminalKeys {
    fn quit_requested(&mut self) -> io::Result<bool> {
        // Drain everything already queued; any quit key wins
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= is_quit_key(&key);
            }
        }
        Ok(quit)
    }
}
