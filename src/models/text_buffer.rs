//! 文本缓冲区模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 光标管理（行 + 字素列）
//! - 行列 ↔ 字符偏移映射

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Chars ropey ends a line on (with `unicode_lines` and `cr_lines`).
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{b}' | '\u{c}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Strips the trailing line break of a line; `\r\n` counts as one.
pub fn strip_line_break(line: &str) -> &str {
    if let Some(rest) = line.strip_suffix("\r\n") {
        return rest;
    }
    match line.chars().next_back() {
        Some(c) if is_line_break(c) => &line[..line.len() - c.len_utf8()],
        _ => line,
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
    /// (row, grapheme column)
    cursor: (usize, usize),
    /// Column remembered across vertical moves through shorter lines.
    preferred_col: Option<usize>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
            preferred_col: None,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Full buffer content, start to end, without any markup.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replaces the whole content and moves the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = (0, 0);
        self.preferred_col = None;
    }

    /// Text in the char range, clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Line content without its trailing line break.
    pub fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        if row >= self.rope.len_lines() {
            return None;
        }
        let line = slice_to_cow(self.rope.line(row));
        Some(match line {
            Cow::Borrowed(s) => Cow::Borrowed(strip_line_break(s)),
            Cow::Owned(s) => Cow::Owned(strip_line_break(&s).to_string()),
        })
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Moves the cursor, clamping it to an existing position.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.rope.len_lines().saturating_sub(1));
        let col = col.min(self.line_grapheme_len(row));
        self.cursor = (row, col);
        self.preferred_col = None;
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        self.line(row)
            .map(|line| line.graphemes(true).count())
            .unwrap_or(0)
    }

    pub fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let Some(line) = self.line(row) else {
            return 0;
        };
        line.graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        if pos.0 >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(pos.0) + self.grapheme_to_char_index(pos.0, pos.1)
    }

    pub fn char_to_pos(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(row);
        let prefix = slice_to_cow(self.rope.slice(line_start..char_idx));
        (row, prefix.graphemes(true).count())
    }

    fn cursor_char_offset(&self) -> usize {
        self.pos_to_char(self.cursor)
    }

    // ==================== 编辑 ====================

    pub fn insert_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut tmp));
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let offset = self.cursor_char_offset();
        self.rope.insert(offset, s);
        self.cursor = self.char_to_pos(offset + s.chars().count());
        self.preferred_col = None;
    }

    /// Backspace. Returns false at the start of the buffer.
    pub fn delete_backward(&mut self) -> bool {
        let (row, col) = self.cursor;
        let range = if col > 0 {
            self.pos_to_char((row, col - 1))..self.pos_to_char((row, col))
        } else if row > 0 {
            let end = self.rope.line_to_char(row);
            end - self.line_break_len_before(end)..end
        } else {
            return false;
        };

        self.rope.remove(range.clone());
        self.cursor = self.char_to_pos(range.start);
        self.preferred_col = None;
        true
    }

    /// Delete. Returns false at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        let (row, col) = self.cursor;
        let start = self.pos_to_char((row, col));
        let range = if col < self.line_grapheme_len(row) {
            start..self.pos_to_char((row, col + 1))
        } else if row + 1 < self.rope.len_lines() {
            let next_line = self.rope.line_to_char(row + 1);
            start..next_line
        } else {
            return false;
        };

        self.rope.remove(range);
        self.preferred_col = None;
        true
    }

    fn line_break_len_before(&self, char_idx: usize) -> usize {
        if char_idx >= 2
            && self.rope.char(char_idx - 1) == '\n'
            && self.rope.char(char_idx - 2) == '\r'
        {
            2
        } else if char_idx >= 1 {
            1
        } else {
            0
        }
    }

    // ==================== 光标移动 ====================

    pub fn move_left(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
        } else if row > 0 {
            self.cursor = (row - 1, self.line_grapheme_len(row - 1));
        }
        self.preferred_col = None;
    }

    pub fn move_right(&mut self) {
        let (row, col) = self.cursor;
        if col < self.line_grapheme_len(row) {
            self.cursor = (row, col + 1);
        } else if row + 1 < self.rope.len_lines() {
            self.cursor = (row + 1, 0);
        }
        self.preferred_col = None;
    }

    pub fn move_up(&mut self, lines: usize) {
        let (row, col) = self.cursor;
        let target = row.saturating_sub(lines);
        self.move_vertical(target, col);
    }

    pub fn move_down(&mut self, lines: usize) {
        let (row, col) = self.cursor;
        let last = self.rope.len_lines().saturating_sub(1);
        let target = row.saturating_add(lines).min(last);
        self.move_vertical(target, col);
    }

    fn move_vertical(&mut self, target_row: usize, col: usize) {
        let want = *self.preferred_col.get_or_insert(col);
        self.cursor = (target_row, want.min(self.line_grapheme_len(target_row)));
    }

    pub fn move_line_start(&mut self) {
        self.cursor.1 = 0;
        self.preferred_col = None;
    }

    pub fn move_line_end(&mut self) {
        self.cursor.1 = self.line_grapheme_len(self.cursor.0);
        self.preferred_col = None;
    }

    pub fn move_file_start(&mut self) {
        self.cursor = (0, 0);
        self.preferred_col = None;
    }

    pub fn move_file_end(&mut self) {
        let last = self.rope.len_lines().saturating_sub(1);
        self.cursor = (last, self.line_grapheme_len(last));
        self.preferred_col = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
