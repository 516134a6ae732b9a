//! 文件选择对话框
//!
//! A modal chooser for one file, in Open or Save mode. The state machine is
//! independent of the terminal: it consumes key events and reports
//! `ChooserStep::Done` once the user accepted a file or cancelled. In Save
//! mode with overwrite confirmation, picking an existing file asks before
//! accepting.

use super::util::centered_rect;
use crate::core::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::services::file::{DirEntry, FileHandle, FileProvider};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use unicode_width::UnicodeWidthStr;

const PARENT_ENTRY: &str = "..";
const INPUT_LABEL: &str = "Name: ";
const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserAction {
    Open,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserRequest {
    pub action: ChooserAction,
    pub title: String,
    pub do_overwrite_confirmation: bool,
    /// Folder listed first; the working directory when `None`.
    pub initial_dir: Option<PathBuf>,
    /// File name prefilled in the name field.
    pub initial_name: Option<String>,
}

impl ChooserRequest {
    pub fn open() -> Self {
        Self {
            action: ChooserAction::Open,
            title: "Open a file".to_string(),
            do_overwrite_confirmation: false,
            initial_dir: None,
            initial_name: None,
        }
    }

    pub fn save() -> Self {
        Self {
            action: ChooserAction::Save,
            title: "Save as a file".to_string(),
            do_overwrite_confirmation: true,
            initial_dir: None,
            initial_name: None,
        }
    }

    /// Starts in the folder of `current`, prefilling its name for Save.
    pub fn near(mut self, current: Option<&Path>) -> Self {
        if let Some(path) = current {
            self.initial_dir = path.parent().map(Path::to_path_buf);
            if self.action == ChooserAction::Save {
                self.initial_name = path.file_name().map(|n| n.to_string_lossy().to_string());
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserResponse {
    Accept(FileHandle),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserStep {
    Continue,
    Done(ChooserResponse),
}

fn dir_prefix(dir: &Path) -> String {
    let mut s = dir.display().to_string();
    if !s.ends_with(MAIN_SEPARATOR) {
        s.push(MAIN_SEPARATOR);
    }
    s
}

/// Lexically resolves `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn common_prefix<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut prefix: Option<String> = None;
    for name in names {
        prefix = Some(match prefix {
            None => name.to_string(),
            Some(p) => p
                .chars()
                .zip(name.chars())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }
    prefix.unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct FileChooserState {
    request: ChooserRequest,
    dir: PathBuf,
    entries: Vec<DirEntry>,
    selected: Option<usize>,
    input: String,
    /// Byte offset into `input`.
    cursor: usize,
    error: Option<String>,
    confirm_overwrite: Option<PathBuf>,
}

impl FileChooserState {
    pub fn new(request: ChooserRequest, files: &dyn FileProvider) -> Self {
        let dir = request
            .initial_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let name = request.initial_name.clone().unwrap_or_default();

        let mut state = Self {
            request,
            dir: PathBuf::new(),
            entries: Vec::new(),
            selected: None,
            input: String::new(),
            cursor: 0,
            error: None,
            confirm_overwrite: None,
        };
        state.load_dir(dir, files);
        state.input = format!("{}{}", dir_prefix(&state.dir), name);
        state.cursor = state.input.len();
        state
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirm_overwrite(&self) -> Option<&Path> {
        self.confirm_overwrite.as_deref()
    }

    fn load_dir(&mut self, dir: PathBuf, files: &dyn FileProvider) {
        let mut entries = match files.read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.error = Some(e.to_string());
                Vec::new()
            }
        };
        if let Some(parent) = dir.parent() {
            entries.insert(
                0,
                DirEntry {
                    path: parent.to_path_buf(),
                    name: PARENT_ENTRY.to_string(),
                    is_dir: true,
                },
            );
        }
        self.entries = entries;
        self.selected = None;
        self.dir = dir;
    }

    fn resolve_input(&self) -> Option<PathBuf> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return None;
        }

        let path = match raw.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with(MAIN_SEPARATOR) => {
                let home = std::env::var_os("HOME")?;
                PathBuf::from(home).join(rest.trim_start_matches(MAIN_SEPARATOR))
            }
            _ => PathBuf::from(raw),
        };
        let path = if path.is_absolute() {
            path
        } else {
            self.dir.join(path)
        };
        Some(normalize(&path))
    }

    /// The name typed after the last separator.
    fn fragment(&self) -> &str {
        match self.input.rfind(MAIN_SEPARATOR) {
            Some(idx) => &self.input[idx + MAIN_SEPARATOR.len_utf8()..],
            None => &self.input,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, files: &dyn FileProvider) -> ChooserStep {
        if !key.is_press() {
            return ChooserStep::Continue;
        }

        if let Some(path) = self.confirm_overwrite.clone() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    ChooserStep::Done(ChooserResponse::Accept(FileHandle::new(path)))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_overwrite = None;
                    ChooserStep::Continue
                }
                _ => ChooserStep::Continue,
            };
        }

        match key.code {
            KeyCode::Esc => return ChooserStep::Done(ChooserResponse::Cancel),
            KeyCode::Enter => return self.submit(files),
            KeyCode::Up => self.select_by(-1),
            KeyCode::Down => self.select_by(1),
            KeyCode::PageUp => self.select_by(-(PAGE_STEP as isize)),
            KeyCode::PageDown => self.select_by(PAGE_STEP as isize),
            KeyCode::Tab => self.complete(files),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.drain(prev..self.cursor);
                    self.cursor = prev;
                    self.after_edit(files);
                }
            }
            KeyCode::Delete => {
                if let Some(ch) = self.input[self.cursor..].chars().next() {
                    self.input
                        .drain(self.cursor..self.cursor + ch.len_utf8());
                    self.after_edit(files);
                }
            }
            KeyCode::Left => {
                self.cursor = self.input[..self.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
            KeyCode::Right => {
                if let Some(ch) = self.input[self.cursor..].chars().next() {
                    self.cursor += ch.len_utf8();
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                self.cursor = 0;
                self.after_edit(files);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.len(),
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.input.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
                self.after_edit(files);
            }
            _ => {}
        }
        ChooserStep::Continue
    }

    /// Inserts pasted text into the name field; line breaks are dropped.
    pub fn insert_text(&mut self, text: &str, files: &dyn FileProvider) {
        if self.confirm_overwrite.is_some() {
            return;
        }
        let clean: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.input.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        self.after_edit(files);
    }

    fn after_edit(&mut self, files: &dyn FileProvider) {
        self.error = None;

        if self.input.ends_with(MAIN_SEPARATOR) {
            if let Some(path) = self.resolve_input() {
                if path != self.dir && files.is_dir(&path) {
                    self.load_dir(path, files);
                }
            }
        }

        let fragment = self.fragment().to_string();
        self.selected = if fragment.is_empty() {
            None
        } else {
            self.entries
                .iter()
                .position(|e| e.name != PARENT_ENTRY && e.name.starts_with(&fragment))
        };
    }

    fn select_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let next = match self.selected {
            None if delta >= 0 => 0,
            None => last,
            Some(i) => (i as isize + delta).clamp(0, last as isize) as usize,
        };
        self.selected = Some(next);
        self.input = format!("{}{}", dir_prefix(&self.dir), self.entries[next].name);
        self.cursor = self.input.len();
        self.error = None;
    }

    fn complete(&mut self, files: &dyn FileProvider) {
        let prefix = dir_prefix(&self.dir);
        let Some(fragment) = self.input.strip_prefix(prefix.as_str()) else {
            return;
        };
        if fragment.contains(MAIN_SEPARATOR) {
            return;
        }

        let candidates: Vec<&DirEntry> = self
            .entries
            .iter()
            .filter(|e| e.name != PARENT_ENTRY && e.name.starts_with(fragment))
            .collect();
        let completed = match candidates.as_slice() {
            [] => return,
            [only] if only.is_dir => format!("{}{}", only.name, MAIN_SEPARATOR),
            [only] => only.name.clone(),
            many => common_prefix(many.iter().map(|e| e.name.as_str())),
        };

        self.input = format!("{prefix}{completed}");
        self.cursor = self.input.len();
        self.after_edit(files);
    }

    fn submit(&mut self, files: &dyn FileProvider) -> ChooserStep {
        let Some(path) = self.resolve_input() else {
            self.error = Some("Enter a file name".to_string());
            return ChooserStep::Continue;
        };

        if files.is_dir(&path) {
            self.load_dir(path, files);
            self.input = dir_prefix(&self.dir);
            self.cursor = self.input.len();
            return ChooserStep::Continue;
        }

        match self.request.action {
            ChooserAction::Open => {
                if !files.exists(&path) {
                    self.error = Some(format!("No such file: {}", path.display()));
                    return ChooserStep::Continue;
                }
            }
            ChooserAction::Save => {
                if self.input.ends_with(MAIN_SEPARATOR) {
                    self.error = Some("Enter a file name".to_string());
                    return ChooserStep::Continue;
                }
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !files.is_dir(parent) {
                        self.error =
                            Some(format!("Folder does not exist: {}", parent.display()));
                        return ChooserStep::Continue;
                    }
                }
                if self.request.do_overwrite_confirmation && files.exists(&path) {
                    self.confirm_overwrite = Some(path);
                    return ChooserStep::Continue;
                }
            }
        }

        ChooserStep::Done(ChooserResponse::Accept(FileHandle::new(path)))
    }
}

pub fn render_file_chooser(state: &FileChooserState, frame: &mut Frame, area: Rect) {
    let height = area.height.saturating_sub(4).min(20);
    let popup = centered_rect(70, height, area);
    if popup.width < 20 || popup.height < 6 {
        return;
    }

    frame.render_widget(Clear, popup);

    let base = Style::default().bg(Color::Black).fg(Color::White);
    let muted = base.fg(Color::DarkGray);
    let accent = base.fg(Color::Yellow);
    let selected_style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(base.fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", state.request.title),
            base.fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .style(base);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height < 4 || inner.width < 10 {
        return;
    }

    // Name field, with the text scrolled so the cursor stays visible.
    let label_w = INPUT_LABEL.width() as u16;
    let field_w = inner.width.saturating_sub(label_w).max(1) as usize;
    let before_cursor = &state.input[..state.cursor];
    let mut skip = 0usize;
    while before_cursor[skip..].width() >= field_w {
        let Some(ch) = before_cursor[skip..].chars().next() else {
            break;
        };
        skip += ch.len_utf8();
    }
    let visible_input = &state.input[skip..];
    let input_line = Line::from(vec![
        Span::styled(INPUT_LABEL, accent),
        Span::styled(visible_input, base),
    ]);
    frame.render_widget(
        Paragraph::new(input_line).style(base),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let footer_h = 2u16;
    let body = Rect::new(
        inner.x,
        inner.y + 1,
        inner.width,
        inner.height.saturating_sub(1 + footer_h),
    );

    if let Some(path) = state.confirm_overwrite() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("A file named \"{name}\" already exists. Replace it?"),
                base.add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(base).wrap(Wrap { trim: true }),
            body,
        );
    } else {
        let list_h = body.height as usize;
        let offset = match state.selected {
            Some(sel) if list_h > 0 && sel >= list_h => sel + 1 - list_h,
            _ => 0,
        };
        let lines: Vec<Line> = state
            .entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_h)
            .map(|(idx, entry)| {
                let is_selected = state.selected == Some(idx);
                let style = if is_selected { selected_style } else { base };
                let marker = if is_selected { "▸ " } else { "  " };
                let suffix = if entry.is_dir && entry.name != PARENT_ENTRY {
                    "/"
                } else {
                    ""
                };
                Line::from(Span::styled(format!("{marker}{}{suffix}", entry.name), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).style(base), body);
    }

    let footer_y = inner.y + inner.height - footer_h;
    if let Some(err) = state.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(err, base.fg(Color::LightRed))),
            Rect::new(inner.x, footer_y, inner.width, 1),
        );
    }

    let verb = match state.request.action {
        ChooserAction::Open => " Open  ",
        ChooserAction::Save => " Save  ",
    };
    let hint = if state.confirm_overwrite.is_some() {
        Line::from(vec![
            Span::styled("[y]", accent),
            Span::styled(" Replace  ", base),
            Span::styled("[n]", muted),
            Span::styled(" Back", base),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Enter]", accent),
            Span::styled(verb, base),
            Span::styled("[Tab]", accent),
            Span::styled(" Complete  ", base),
            Span::styled("[Esc]", muted),
            Span::styled(" Cancel", base),
        ])
    };
    frame.render_widget(
        Paragraph::new(hint).style(base),
        Rect::new(inner.x, footer_y + 1, inner.width, 1),
    );

    if state.confirm_overwrite.is_none() {
        let x = inner.x + label_w + before_cursor[skip..].width() as u16;
        frame.set_cursor_position((x.min(inner.x + inner.width - 1), inner.y));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/file_chooser.rs"]
mod tests;
