//! 终端前端：主事件循环与模态对话框
//!
//! Single-threaded: draw, wait for one event, route it to the controller.
//! File choosers run a nested loop over the same terminal and event source,
//! so no other input reaches the controller while a dialog is open.

use super::controller::Controller;
use super::dialog::DialogHost;
use crate::core::event::InputEvent;
use crate::services::file::FileProvider;
use crate::tui::events::{AppEvent, EventSource};
use crate::tui::terminal_guard::TerminationSignal;
use crate::views::file_chooser::{
    render_file_chooser, ChooserRequest, ChooserResponse, ChooserStep, FileChooserState,
};
use crate::views::window::MainWindow;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::io;

pub struct Frontend<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    pending_exit: Option<TerminationSignal>,
}

impl<B: Backend, E: EventSource> Frontend<B, E> {
    pub fn new(terminal: Terminal<B>, events: E) -> Self {
        Self {
            terminal,
            events,
            pending_exit: None,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Runs until the controller quits or a termination signal arrives.
    /// Returns the process exit code.
    pub fn run(&mut self, controller: &mut Controller) -> io::Result<i32> {
        tracing::info!("event loop started");

        while controller.is_running() && self.pending_exit.is_none() {
            self.terminal.draw(|frame| {
                let area = frame.area();
                controller.window_mut().render(frame, area)
            })?;

            match self.events.next_event()? {
                AppEvent::Input(event) => {
                    controller.handle_input(event, self);
                }
                AppEvent::Tick => {}
                AppEvent::Terminate(signal) => self.pending_exit = Some(signal),
            }
        }

        let code = match self.pending_exit {
            Some(signal) => {
                tracing::info!(?signal, "terminated by signal");
                signal.exit_code()
            }
            None => 0,
        };
        tracing::info!(code, "event loop finished");
        Ok(code)
    }
}

impl<B: Backend, E: EventSource> DialogHost for Frontend<B, E> {
    fn choose_file(
        &mut self,
        request: &ChooserRequest,
        window: &mut MainWindow,
        files: &dyn FileProvider,
    ) -> io::Result<ChooserResponse> {
        let mut state = FileChooserState::new(request.clone(), files);
        tracing::debug!(title = %request.title, dir = %state.dir().display(), "file chooser opened");

        loop {
            self.terminal.draw(|frame| {
                let area = frame.area();
                window.render(frame, area);
                render_file_chooser(&state, frame, area);
            })?;

            match self.events.next_event()? {
                AppEvent::Input(InputEvent::Key(key)) => {
                    if let ChooserStep::Done(response) = state.handle_key(&key, files) {
                        return Ok(response);
                    }
                }
                AppEvent::Input(InputEvent::Paste(text)) => state.insert_text(&text, files),
                AppEvent::Input(_) | AppEvent::Tick => {}
                AppEvent::Terminate(signal) => {
                    self.pending_exit = Some(signal);
                    return Ok(ChooserResponse::Cancel);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/frontend.rs"]
mod tests;
