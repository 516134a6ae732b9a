//! 命令系统：语义命令定义
//!
//! Command 只描述"做什么"，不关心具体按键；按键到命令的映射见
//! `services::keybinding`。

use crate::app::action::AppAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 光标移动 ====================
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,
    CursorFileStart,
    CursorFileEnd,

    // ==================== 编辑操作 ====================
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,

    // ==================== 滚动操作 ====================
    PageUp,
    PageDown,

    // ==================== 视图操作 ====================
    ToggleWordWrap,
    ToggleLineNumbers,

    // ==================== 应用动作 ====================
    Open,
    Save,
    Quit,
}

impl Command {
    const ALL: [Command; 19] = [
        Command::CursorLeft,
        Command::CursorRight,
        Command::CursorUp,
        Command::CursorDown,
        Command::CursorLineStart,
        Command::CursorLineEnd,
        Command::CursorFileStart,
        Command::CursorFileEnd,
        Command::InsertNewline,
        Command::InsertTab,
        Command::DeleteBackward,
        Command::DeleteForward,
        Command::PageUp,
        Command::PageDown,
        Command::ToggleWordWrap,
        Command::ToggleLineNumbers,
        Command::Open,
        Command::Save,
        Command::Quit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorFileStart => "cursorFileStart",
            Command::CursorFileEnd => "cursorFileEnd",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::PageUp => "pageUp",
            Command::PageDown => "pageDown",
            Command::ToggleWordWrap => "toggleWordWrap",
            Command::ToggleLineNumbers => "toggleLineNumbers",
            Command::Open => "open",
            Command::Save => "save",
            Command::Quit => "quit",
        }
    }

    /// Parses a command name as written in the settings file.
    ///
    /// Matching ignores ASCII case and accepts the `app.` prefix used by the
    /// action names, so `"save"`, `"Save"` and `"app.save"` are equivalent.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("app.").unwrap_or(name);
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(name))
    }

    /// The application-level action this command triggers, if any.
    pub fn app_action(&self) -> Option<AppAction> {
        match self {
            Command::Open => Some(AppAction::Open),
            Command::Save => Some(AppAction::Save),
            Command::Quit => Some(AppAction::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
