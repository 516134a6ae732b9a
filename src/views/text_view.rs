//! 文本视图：行号 gutter、自动换行、滚动条
//!
//! Scroll position is tracked as (first visible line, wrapped row inside that
//! line) so only the lines between the viewport and the cursor are wrapped
//! per frame, never the whole buffer.

use crate::core::Command;
use crate::models::TextBuffer;
use crate::services::EditorConfig;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const MIN_GUTTER_DIGITS: usize = 3;
const SCROLLBAR_WIDTH: u16 = 1;

fn grapheme_width(g: &str, tab_width: usize) -> usize {
    if g == "\t" {
        tab_width
    } else {
        g.width()
    }
}

fn is_break_opportunity(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Splits a line (without its line break) into visual rows of at most
/// `width` columns, breaking after whitespace where possible.
///
/// Returned ranges are grapheme indices. Whitespace may hang past the edge
/// instead of starting a row of its own; a word longer than `width` is
/// broken hard. An empty line still yields one empty row.
pub fn wrap_line(line: &str, width: usize, tab_width: usize) -> Vec<Range<usize>> {
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    if width == 0 || graphemes.is_empty() {
        return vec![0..graphemes.len()];
    }

    let widths: Vec<usize> = graphemes
        .iter()
        .map(|g| grapheme_width(g, tab_width))
        .collect();

    let mut rows = Vec::new();
    let mut start = 0usize;
    let mut used = 0usize;
    let mut last_break: Option<usize> = None;
    let mut i = 0usize;
    while i < graphemes.len() {
        let w = widths[i];
        let hangs = is_break_opportunity(graphemes[i]);
        if used + w > width && i > start && !hangs {
            let end = match last_break {
                Some(b) if b > start => b,
                _ => i,
            };
            rows.push(start..end);
            start = end;
            used = widths[start..i].iter().sum();
            last_break = None;
            continue;
        }

        used += w;
        if hangs {
            last_break = Some(i + 1);
        }
        i += 1;
    }
    rows.push(start..graphemes.len());
    rows
}

fn digits(mut n: usize) -> usize {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

#[derive(Debug, Clone)]
pub struct TextView {
    buffer: TextBuffer,
    show_line_numbers: bool,
    word_wrap: bool,
    tab_width: usize,
    /// First visible logical line and wrapped row within it.
    top: (usize, usize),
    /// Horizontal scroll in columns; only used without word wrap.
    left_col: usize,
    /// Content area of the last render.
    viewport: Rect,
    /// Cleared by wheel scrolling so the next render keeps the scroll position.
    follow_cursor: bool,
}

impl TextView {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            show_line_numbers: config.show_line_numbers,
            word_wrap: config.word_wrap,
            tab_width: config.tab_size.max(1) as usize,
            top: (0, 0),
            left_col: 0,
            viewport: Rect::default(),
            follow_cursor: true,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        self.follow_cursor = true;
        &mut self.buffer
    }

    /// Replaces the displayed text and scrolls back to the top.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.follow_cursor = true;
        self.top = (0, 0);
        self.left_col = 0;
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_word_wrap(&mut self, wrap: bool) {
        self.word_wrap = wrap;
        self.top.1 = 0;
        self.left_col = 0;
    }

    pub fn top(&self) -> (usize, usize) {
        self.top
    }

    pub fn gutter_width(&self) -> u16 {
        if !self.show_line_numbers {
            return 0;
        }
        let d = digits(self.buffer.len_lines()).max(MIN_GUTTER_DIGITS);
        (d + 1).min(u16::MAX as usize) as u16
    }

    fn page_height(&self) -> usize {
        (self.viewport.height as usize).max(1)
    }

    fn line_rows(&self, row: usize, width: usize) -> Vec<Range<usize>> {
        let line = self.buffer.line(row).unwrap_or_default();
        if self.word_wrap {
            wrap_line(&line, width, self.tab_width)
        } else {
            vec![0..line.graphemes(true).count()]
        }
    }

    /// Wrapped row index of the cursor inside its line, and its x column
    /// relative to the start of that row.
    fn cursor_visual(&self, width: usize) -> (usize, usize) {
        let (row, col) = self.buffer.cursor();
        let rows = self.line_rows(row, width);
        let sub = rows
            .iter()
            .rposition(|r| r.start <= col)
            .unwrap_or(0);
        let start = rows.get(sub).map(|r| r.start).unwrap_or(0);
        let line = self.buffer.line(row).unwrap_or_default();
        let x = line
            .graphemes(true)
            .skip(start)
            .take(col.saturating_sub(start))
            .map(|g| grapheme_width(g, self.tab_width))
            .sum();
        (sub, x)
    }

    /// Scrolls so the cursor lies inside a `width` x `height` viewport.
    pub fn ensure_cursor_visible(&mut self, width: usize, height: usize) {
        let height = height.max(1);
        let (cursor_row, _) = self.buffer.cursor();
        let (cursor_sub, cursor_x) = self.cursor_visual(width);

        self.clamp_top(width);

        if (cursor_row, cursor_sub) < self.top {
            self.top = (cursor_row, cursor_sub);
        } else {
            // Visual rows from the top of the viewport down to the cursor row.
            let mut distance = 0usize;
            for line in self.top.0..cursor_row {
                distance += self.line_rows(line, width).len();
            }
            distance = distance + cursor_sub - self.top.1;

            while distance >= height {
                let rows_in_top = self.line_rows(self.top.0, width).len();
                if self.top.1 + 1 < rows_in_top {
                    self.top.1 += 1;
                } else {
                    self.top = (self.top.0 + 1, 0);
                }
                distance -= 1;
            }
        }

        if self.word_wrap {
            self.left_col = 0;
        } else if cursor_x < self.left_col {
            self.left_col = cursor_x;
        } else if width > 0 && cursor_x >= self.left_col + width {
            self.left_col = cursor_x + 1 - width;
        }
    }

    fn clamp_top(&mut self, width: usize) {
        let last_line = self.buffer.len_lines().saturating_sub(1);
        if self.top.0 > last_line {
            self.top = (last_line, 0);
        }
        // Edits can shrink the top line below the remembered wrapped row.
        let rows_in_top = self.line_rows(self.top.0, width).len();
        self.top.1 = self.top.1.min(rows_in_top.saturating_sub(1));
    }

    /// Scrolls the viewport by visual rows without moving the cursor.
    pub fn scroll_by(&mut self, delta: isize) {
        self.follow_cursor = false;
        let width = self.viewport.width as usize;
        let last_line = self.buffer.len_lines().saturating_sub(1);
        if delta > 0 {
            for _ in 0..delta {
                let rows_in_top = self.line_rows(self.top.0, width).len();
                if self.top.1 + 1 < rows_in_top {
                    self.top.1 += 1;
                } else if self.top.0 < last_line {
                    self.top = (self.top.0 + 1, 0);
                } else {
                    break;
                }
            }
        } else {
            for _ in 0..delta.unsigned_abs() {
                if self.top.1 > 0 {
                    self.top.1 -= 1;
                } else if self.top.0 > 0 {
                    let prev = self.top.0 - 1;
                    let rows = self.line_rows(prev, width).len();
                    self.top = (prev, rows.saturating_sub(1));
                } else {
                    break;
                }
            }
        }
    }

    /// Inserts typed or pasted text at the cursor.
    pub fn insert_text(&mut self, text: &str) {
        // Pasted CRLF keeps the buffer's own line breaks consistent with typed ones.
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.follow_cursor = true;
        self.buffer.insert_str(&normalized);
    }

    /// Applies an editing, movement or view command. Returns false for
    /// commands the view does not handle.
    pub fn apply_command(&mut self, command: Command, config: &EditorConfig) -> bool {
        self.follow_cursor = true;
        match command {
            Command::CursorLeft => self.buffer.move_left(),
            Command::CursorRight => self.buffer.move_right(),
            Command::CursorUp => self.buffer.move_up(1),
            Command::CursorDown => self.buffer.move_down(1),
            Command::CursorLineStart => self.buffer.move_line_start(),
            Command::CursorLineEnd => self.buffer.move_line_end(),
            Command::CursorFileStart => self.buffer.move_file_start(),
            Command::CursorFileEnd => self.buffer.move_file_end(),
            Command::InsertNewline => self.buffer.insert_char('\n'),
            Command::InsertTab => self.buffer.insert_str(&config.tab_string()),
            Command::DeleteBackward => {
                self.buffer.delete_backward();
            }
            Command::DeleteForward => {
                self.buffer.delete_forward();
            }
            Command::PageUp => self.buffer.move_up(self.page_height()),
            Command::PageDown => self.buffer.move_down(self.page_height()),
            Command::ToggleWordWrap => self.set_word_wrap(!self.word_wrap),
            Command::ToggleLineNumbers => self.set_show_line_numbers(!self.show_line_numbers),
            Command::Open | Command::Save | Command::Quit => return false,
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let gutter_width = self.gutter_width().min(area.width);
        let scrollbar_width = SCROLLBAR_WIDTH.min(area.width - gutter_width);
        let content = Rect::new(
            area.x + gutter_width,
            area.y,
            area.width - gutter_width - scrollbar_width,
            area.height,
        );
        self.viewport = content;

        if self.follow_cursor {
            self.ensure_cursor_visible(content.width as usize, content.height as usize);
        } else {
            self.clamp_top(content.width as usize);
        }
        let cursor = self.draw_rows(frame.buffer_mut(), area.x, gutter_width, content);

        let scrollbar_area = Rect::new(
            content.x + content.width,
            area.y,
            scrollbar_width,
            area.height,
        );
        if scrollbar_area.width > 0 {
            let mut state = ScrollbarState::new(self.buffer.len_lines().saturating_sub(1))
                .position(self.top.0)
                .viewport_content_length(content.height as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                scrollbar_area,
                &mut state,
            );
        }

        if let Some(pos) = cursor {
            frame.set_cursor_position(pos);
        }
    }

    /// Draws gutter and text rows; returns the on-screen cursor position if
    /// it is inside the viewport.
    fn draw_rows(
        &self,
        buf: &mut Buffer,
        gutter_x: u16,
        gutter_width: u16,
        content: Rect,
    ) -> Option<(u16, u16)> {
        let gutter_style = Style::default().fg(Color::DarkGray);
        let active_gutter_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default();

        let width = content.width as usize;
        let (cursor_row, cursor_col) = self.buffer.cursor();
        let mut cursor_pos = None;

        let mut y = content.y;
        let bottom = content.y + content.height;
        let mut line = self.top.0;
        let mut first_sub = self.top.1;

        while y < bottom && line < self.buffer.len_lines() {
            let text = self.buffer.line(line).unwrap_or_default();
            let graphemes: Vec<&str> = text.graphemes(true).collect();
            let rows = self.line_rows(line, width);

            for (sub, range) in rows.iter().enumerate().skip(first_sub) {
                if y >= bottom {
                    break;
                }

                if gutter_width > 1 && sub == 0 {
                    let style = if line == cursor_row {
                        active_gutter_style
                    } else {
                        gutter_style
                    };
                    let digits_width = (gutter_width - 1) as usize;
                    let label = format!("{:>digits_width$}", line + 1);
                    buf.set_stringn(gutter_x, y, label, digits_width, style);
                }

                let mut rendered = String::new();
                let mut col = 0usize;
                for g in &graphemes[range.clone()] {
                    let w = grapheme_width(g, self.tab_width);
                    if col + w > self.left_col {
                        if col < self.left_col || *g == "\t" {
                            // Only the columns right of the scroll edge are painted.
                            let visible = col + w - self.left_col.max(col);
                            rendered.push_str(&" ".repeat(visible));
                        } else {
                            rendered.push_str(g);
                        }
                    }
                    col += w;
                }
                if width > 0 {
                    buf.set_stringn(content.x, y, &rendered, width, text_style);
                }

                let last_row = sub + 1 == rows.len();
                let owns_cursor = line == cursor_row
                    && cursor_col >= range.start
                    && (cursor_col < range.end || last_row);
                if owns_cursor {
                    let (_, x) = self.cursor_visual(width);
                    let x = x.saturating_sub(self.left_col).min(width.saturating_sub(1));
                    cursor_pos = Some((content.x + x as u16, y));
                }

                y += 1;
            }

            first_sub = 0;
            line += 1;
        }

        cursor_pos
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/text_view.rs"]
mod tests;
