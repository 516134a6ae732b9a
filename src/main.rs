//! textedit: a minimal terminal text editor with open and save dialogs.

mod logging;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::process::ExitCode;
use textedit::app::{Controller, Frontend};
use textedit::services::settings::load_settings;
use textedit::services::{KeybindingService, LocalFileProvider};
use textedit::tui::events::CrosstermEventSource;
use textedit::tui::terminal_guard::{install_termination_signals, TerminalGuard};

fn main() -> ExitCode {
    // Keep the guard alive until exit so buffered log lines are flushed.
    let _logging = logging::init();

    let settings = load_settings();
    let mut keybindings = KeybindingService::with_defaults();
    let applied = keybindings.apply_rules(&settings.keybindings);
    tracing::debug!(applied, total = settings.keybindings.len(), "keybinding rules");

    let mut controller = Controller::new(
        settings.editor,
        keybindings,
        Box::new(LocalFileProvider::new()),
    );

    let code = match run(&mut controller) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "event loop failed");
            eprintln!("textedit: {e}");
            1
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(controller: &mut Controller) -> io::Result<i32> {
    let guard = TerminalGuard::new()?;
    let signals = match install_termination_signals(guard.restorer()) {
        Ok(rx) => Some(rx),
        Err(e) => {
            tracing::warn!(error = %e, "signal handlers unavailable");
            None
        }
    };

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut frontend = Frontend::new(terminal, CrosstermEventSource::new(signals));
    frontend.run(controller)
}
