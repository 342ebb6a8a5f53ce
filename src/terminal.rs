//! Raw-mode terminal setup for the assessment screens.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the alternate screen; the terminal is restored when this is dropped.
pub struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    /// Switch to raw mode and the alternate screen. If any step fails, the
    /// steps already taken are undone before the error is returned.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        match open_alternate_screen() {
            Ok(terminal) => {
                tracing::debug!("entered alternate screen");
                Ok(Self { terminal })
            }
            Err(err) => {
                if let Err(restore_err) = restore() {
                    tracing::warn!(error = %restore_err, "failed to restore terminal");
                }
                Err(err)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

fn open_alternate_screen() -> io::Result<AppTerminal> {
    io::stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installed once per process, however many times the screen is entered.
/// Returns whether this call installed it.
fn install_panic_hook() -> bool {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_hook_is_installed_once() {
        install_panic_hook();
        assert!(!install_panic_hook());
        assert!(!install_panic_hook());
    }
}
