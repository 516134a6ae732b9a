//! 应用控制器：打开/保存流程
//!
//! Owns the main window and the current file. Toolbar buttons and key
//! chords resolve to an `AppAction`, which is dispatched through
//! `ACTION_TABLE`. Every outcome is reported on the status line and through
//! `tracing`; file errors never leave the flow that caused them.

use super::action::AppAction;
use super::dialog::DialogHost;
use crate::core::event::{InputEvent, Key, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use crate::services::file::{decode_utf8, FileError, FileHandle, FileProvider};
use crate::services::{EditorConfig, KeybindingService};
use crate::views::file_chooser::{ChooserRequest, ChooserResponse};
use crate::views::window::{MainWindow, StatusKind};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum FlowError {
    File(FileError),
    /// The dialog host failed to run the chooser.
    Dialog(io::Error),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::File(e) => write!(f, "{}", e),
            FlowError::Dialog(e) => write!(f, "dialog failed: {}", e),
        }
    }
}

impl std::error::Error for FlowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlowError::File(e) => Some(e),
            FlowError::Dialog(e) => Some(e),
        }
    }
}

impl From<FileError> for FlowError {
    fn from(e: FileError) -> Self {
        FlowError::File(e)
    }
}

#[derive(Debug)]
pub enum FlowOutcome {
    Cancelled,
    Opened(PathBuf),
    Saved(PathBuf),
    Failed(FlowError),
    Quit,
}

type ActionHandler = fn(&mut Controller, &mut dyn DialogHost) -> FlowOutcome;

static ACTION_TABLE: [(AppAction, ActionHandler); 3] = [
    (AppAction::Open, Controller::open_flow),
    (AppAction::Save, Controller::save_flow),
    (AppAction::Quit, Controller::quit),
];

pub struct Controller {
    window: MainWindow,
    current_file: Option<FileHandle>,
    files: Box<dyn FileProvider>,
    keybindings: KeybindingService,
    config: EditorConfig,
    running: bool,
}

impl Controller {
    pub fn new(
        config: EditorConfig,
        keybindings: KeybindingService,
        files: Box<dyn FileProvider>,
    ) -> Self {
        Self {
            window: MainWindow::new(&config),
            current_file: None,
            files,
            keybindings,
            config,
            running: true,
        }
    }

    pub fn window(&self) -> &MainWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut MainWindow {
        &mut self.window
    }

    pub fn current_file(&self) -> Option<&FileHandle> {
        self.current_file.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the event loop after the current iteration.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    fn current_path(&self) -> Option<&Path> {
        self.current_file.as_ref().map(FileHandle::path)
    }

    fn choose(
        &mut self,
        request: ChooserRequest,
        host: &mut dyn DialogHost,
    ) -> Result<Option<FileHandle>, FlowError> {
        match host.choose_file(&request, &mut self.window, self.files.as_ref()) {
            Ok(ChooserResponse::Accept(handle)) => Ok(Some(handle)),
            Ok(ChooserResponse::Cancel) => Ok(None),
            Err(e) => Err(FlowError::Dialog(e)),
        }
    }

    // ==================== 打开 ====================

    /// Replaces the buffer with a chosen file. On any failure the buffer and
    /// the current file are left as they were.
    pub fn open_flow(&mut self, host: &mut dyn DialogHost) -> FlowOutcome {
        let request = ChooserRequest::open().near(self.current_path());
        let handle = match self.choose(request, host) {
            Ok(Some(handle)) => handle,
            Ok(None) => return FlowOutcome::Cancelled,
            Err(e) => return FlowOutcome::Failed(e),
        };

        let text = match self.load(&handle) {
            Ok(text) => text,
            Err(e) => return FlowOutcome::Failed(e.into()),
        };

        self.window.view_mut().set_text(&text);
        let path = handle.path().to_path_buf();
        self.current_file = Some(handle);
        FlowOutcome::Opened(path)
    }

    fn load(&self, handle: &FileHandle) -> Result<String, FileError> {
        let bytes = self.files.load_contents(handle.path())?;
        decode_utf8(handle.path(), bytes)
    }

    // ==================== 保存 ====================

    /// Writes the whole buffer to a chosen file. The chosen file becomes the
    /// current file before the write, whatever its outcome.
    pub fn save_flow(&mut self, host: &mut dyn DialogHost) -> FlowOutcome {
        let request = ChooserRequest::save().near(self.current_path());
        let handle = match self.choose(request, host) {
            Ok(Some(handle)) => handle,
            Ok(None) => return FlowOutcome::Cancelled,
            Err(e) => return FlowOutcome::Failed(e),
        };

        let path = handle.path().to_path_buf();
        self.current_file = Some(handle);

        let text = self.window.view().text();
        let written = if text.is_empty() {
            self.files.replace_readwrite(&path)
        } else {
            self.files.replace_contents(&path, text.as_bytes())
        };

        match written {
            Ok(()) => FlowOutcome::Saved(path),
            Err(e) => FlowOutcome::Failed(e.into()),
        }
    }

    fn quit(&mut self, _host: &mut dyn DialogHost) -> FlowOutcome {
        self.request_quit();
        FlowOutcome::Quit
    }

    // ==================== 分发 ====================

    /// Runs the handler registered for `action` and reports its outcome.
    pub fn activate(&mut self, action: AppAction, host: &mut dyn DialogHost) -> FlowOutcome {
        let Some((_, handler)) = ACTION_TABLE.iter().find(|(a, _)| *a == action) else {
            tracing::warn!(action = action.name(), "no handler registered");
            return FlowOutcome::Cancelled;
        };
        tracing::debug!(action = action.name(), "activate");

        let outcome = handler(self, host);
        self.report(action, &outcome);
        outcome
    }

    fn report(&mut self, action: AppAction, outcome: &FlowOutcome) {
        match outcome {
            FlowOutcome::Cancelled => {
                tracing::debug!(action = action.name(), "cancelled");
            }
            FlowOutcome::Opened(path) => {
                tracing::info!(path = %path.display(), "opened file");
                self.window
                    .set_status(StatusKind::Info, format!("Opened {}", path.display()));
            }
            FlowOutcome::Saved(path) => {
                tracing::info!(path = %path.display(), "saved file");
                self.window
                    .set_status(StatusKind::Info, format!("Saved {}", path.display()));
            }
            FlowOutcome::Failed(err) => {
                tracing::error!(action = action.name(), error = %err, "action failed");
                self.window
                    .set_status(StatusKind::Error, format!("Error: {}", err));
            }
            FlowOutcome::Quit => {
                tracing::info!("quit requested");
            }
        }
        self.window
            .set_file_label(self.current_file.as_ref().map(FileHandle::display_name));
    }

    /// Routes one input event. Returns the outcome when it triggered an action.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        host: &mut dyn DialogHost,
    ) -> Option<FlowOutcome> {
        match event {
            InputEvent::Key(key) => {
                if !key.is_press() {
                    return None;
                }
                if let Some(&command) = self.keybindings.get(&Key::from(&key)) {
                    if let Some(action) = command.app_action() {
                        return Some(self.activate(action, host));
                    }
                    self.window.view_mut().apply_command(command, &self.config);
                    return None;
                }
                if let KeyCode::Char(ch) = key.code {
                    let plain = !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT);
                    // AltGr arrives as Ctrl+Alt on some terminals.
                    let alt_gr = key
                        .modifiers
                        .contains(KeyModifiers::CONTROL | KeyModifiers::ALT);
                    if plain || alt_gr {
                        self.window.view_mut().buffer_mut().insert_char(ch);
                    }
                }
                None
            }
            InputEvent::Paste(text) => {
                self.window.view_mut().insert_text(&text);
                None
            }
            InputEvent::Mouse(mouse) => {
                let lines = self.config.scroll_lines.max(1) as isize;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(action) = self.window.toolbar_hit(mouse.column, mouse.row) {
                            return Some(self.activate(action, host));
                        }
                    }
                    MouseEventKind::ScrollUp if self.window.view_contains(mouse.column, mouse.row) => {
                        self.window.view_mut().scroll_by(-lines);
                    }
                    MouseEventKind::ScrollDown
                        if self.window.view_contains(mouse.column, mouse.row) =>
                    {
                        self.window.view_mut().scroll_by(lines);
                    }
                    _ => {}
                }
                None
            }
            InputEvent::Resize(..) | InputEvent::FocusGained | InputEvent::FocusLost => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/controller.rs"]
mod tests;
