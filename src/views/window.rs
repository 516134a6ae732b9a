//! 主窗口：标题栏 + 工具栏 + 文本视图 + 状态栏
//!
//! Structural only: the window draws its parts and answers which toolbar
//! button sits under a mouse position. Behaviour lives in the controller.

use super::text_view::TextView;
use crate::app::action::AppAction;
use crate::services::EditorConfig;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub const WINDOW_TITLE: &str = "TextEdit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub label: &'static str,
    pub action: AppAction,
}

pub const TOOLBAR: [ToolbarButton; 2] = [
    ToolbarButton {
        label: "Open",
        action: AppAction::Open,
    },
    ToolbarButton {
        label: "Save",
        action: AppAction::Save,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowLayout {
    pub header: Rect,
    pub toolbar: Rect,
    pub view: Rect,
    pub status: Rect,
}

pub fn compute_window_layout(area: Rect) -> WindowLayout {
    let [header, toolbar, view, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    WindowLayout {
        header,
        toolbar,
        view,
        status,
    }
}

/// Screen rectangles of the toolbar buttons inside `toolbar`.
pub fn toolbar_button_areas(toolbar: Rect) -> Vec<(Rect, AppAction)> {
    let mut out = Vec::with_capacity(TOOLBAR.len());
    let right = toolbar.x.saturating_add(toolbar.width);
    let mut x = toolbar.x.saturating_add(1);
    for button in TOOLBAR {
        // " Label " plus one column of spacing.
        let width = (button.label.width() + 2) as u16;
        if x.saturating_add(width) > right {
            break;
        }
        out.push((Rect::new(x, toolbar.y, width, toolbar.height.min(1)), button.action));
        x = x.saturating_add(width + 1);
    }
    out
}

pub struct MainWindow {
    title: String,
    view: TextView,
    status: Option<StatusMessage>,
    file_label: Option<String>,
    last_layout: WindowLayout,
}

impl MainWindow {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            view: TextView::new(config),
            status: None,
            file_label: None,
            last_layout: WindowLayout::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn view(&self) -> &TextView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TextView {
        &mut self.view
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn set_file_label(&mut self, label: Option<String>) {
        self.file_label = label;
    }

    /// Toolbar action under a screen position from the last render.
    pub fn toolbar_hit(&self, x: u16, y: u16) -> Option<AppAction> {
        toolbar_button_areas(self.last_layout.toolbar)
            .into_iter()
            .find(|(r, _)| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
            .map(|(_, action)| action)
    }

    /// Whether a screen position lies over the text view.
    pub fn view_contains(&self, x: u16, y: u16) -> bool {
        let r = self.last_layout.view;
        x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = compute_window_layout(area);
        self.last_layout = layout;

        self.render_header(frame, layout.header);
        self.render_toolbar(frame, layout.toolbar);
        self.view.render(frame, layout.view);
        self.render_status(frame, layout.status);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(self.title.as_str(), style)))
                .alignment(Alignment::Center)
                .style(Style::default().bg(Color::Black)),
            area,
        );
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let bar_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        let button_style = Style::default()
            .bg(Color::Gray)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);

        frame.render_widget(Paragraph::new("").style(bar_style), area);
        let buf = frame.buffer_mut();
        for (rect, action) in toolbar_button_areas(area) {
            let label = TOOLBAR
                .iter()
                .find(|b| b.action == action)
                .map(|b| b.label)
                .unwrap_or_default();
            buf.set_stringn(
                rect.x,
                rect.y,
                format!(" {label} "),
                rect.width as usize,
                button_style,
            );
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let base = Style::default().bg(Color::DarkGray).fg(Color::White);

        let (row, col) = self.view.buffer().cursor();
        let file = self.file_label.as_deref().unwrap_or("[No file]");
        let right = format!("{file}  Ln {}, Col {} ", row + 1, col + 1);
        let right_width = right.width() as u16;

        let left = match &self.status {
            Some(msg) => {
                let style = match msg.kind {
                    StatusKind::Info => base,
                    StatusKind::Error => base.fg(Color::LightRed).add_modifier(Modifier::BOLD),
                };
                Span::styled(format!(" {}", msg.text), style)
            }
            None => Span::styled(" ^O Open  ^S Save  ^Q Quit", base.fg(Color::Gray)),
        };

        frame.render_widget(Paragraph::new(Line::from(left)).style(base), area);
        if right_width < area.width {
            let x = area.x + area.width - right_width;
            frame
                .buffer_mut()
                .set_stringn(x, area.y, &right, right_width as usize, base);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/window.rs"]
mod tests;
