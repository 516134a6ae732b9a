//! 终端模式守卫
//!
//! Puts the terminal into the editor's mode (raw input, alternate screen,
//! mouse capture, bracketed paste) and puts it back exactly once, whether
//! the guard is dropped, the process panics out of the loop, or a signal
//! arrives.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

/// Time the event loop gets to exit on its own after a signal.
#[cfg(unix)]
const SIGNAL_GRACE: std::time::Duration = std::time::Duration::from_secs(2);

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::{EnableBracketedPaste, EnableMouseCapture};
        use crossterm::execute;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBar
        )
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::{DisableBracketedPaste, DisableMouseCapture};
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        // Run every step; report the first failure.
        let raw = disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            SetCursorStyle::DefaultUserShape
        );
        raw.and(screen)
    }
}

#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    /// Restores the terminal; later calls are no-ops.
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    /// Shell convention: 128 + signal number.
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to the returned receiver. If the event loop has
/// not exited after a grace period, the listener restores the terminal and
/// exits the process itself.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
) -> io::Result<Receiver<TerminationSignal>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let (tx, rx) = mpsc::channel();
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            if let Some(sig) = signals.forever().next() {
                let signal = if sig == SIGINT {
                    TerminationSignal::SigInt
                } else {
                    TerminationSignal::SigTerm
                };
                tracing::info!(?signal, "termination signal received");
                let _ = tx.send(signal);

                std::thread::sleep(SIGNAL_GRACE);
                let _ = restorer.restore();
                std::process::exit(signal.exit_code());
            }
        })?;
    Ok(rx)
}

/// Without Unix signals the receiver never yields.
#[cfg(not(unix))]
pub fn install_termination_signals(
    _restorer: TerminalRestorer,
) -> io::Result<Receiver<TerminationSignal>> {
    let (_tx, rx) = mpsc::channel();
    Ok(rx)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
