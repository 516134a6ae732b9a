//! 快捷键服务：按键 → 命令映射
//!
//! 功能：
//! - 默认键位映射
//! - 设置文件中的自定义键位（覆盖或解绑）

use super::config::KeybindingRule;
use super::settings::parse_keybinding;
use crate::core::event::{Key, KeyCode, KeyModifiers};
use crate::core::Command;
use rustc_hash::FxHashMap;

pub struct KeybindingService {
    bindings: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut bindings = FxHashMap::default();

        // ==================== 光标移动 ====================
        bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
        bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
        bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
        bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);

        bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
        bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);

        bindings.insert(Key::ctrl(KeyCode::Home), Command::CursorFileStart);
        bindings.insert(Key::ctrl(KeyCode::End), Command::CursorFileEnd);

        // ==================== 编辑操作 ====================
        bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
        bindings.insert(Key::simple(KeyCode::Tab), Command::InsertTab);
        bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
        bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);

        // ==================== 滚动操作 ====================
        bindings.insert(Key::simple(KeyCode::PageUp), Command::PageUp);
        bindings.insert(Key::simple(KeyCode::PageDown), Command::PageDown);

        // ==================== 视图操作 ====================
        bindings.insert(
            Key::new(KeyCode::Char('z'), KeyModifiers::ALT),
            Command::ToggleWordWrap,
        );
        bindings.insert(
            Key::new(KeyCode::Char('l'), KeyModifiers::ALT),
            Command::ToggleLineNumbers,
        );

        // ==================== 文件操作 ====================
        bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::Open);
        bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
        bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);

        Self { bindings }
    }

    pub fn get(&self, key: &Key) -> Option<&Command> {
        self.bindings.get(key)
    }

    pub fn bind(&mut self, key: Key, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        self.bindings.remove(key)
    }

    pub fn keys_for_command(&self, command: Command) -> Vec<Key> {
        self.bindings
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn is_bound(&self, key: &Key) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Applies user rules on top of the current bindings; returns how many
    /// were applied. Invalid rules are logged and skipped.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) -> usize {
        let mut applied = 0;
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "invalid keybinding");
                continue;
            };

            if rule.command.trim().is_empty() {
                self.unbind(&key);
                applied += 1;
                continue;
            }

            match Command::from_name(&rule.command) {
                Some(command) => {
                    self.bind(key, command);
                    applied += 1;
                }
                None => tracing::warn!(command = %rule.command, "unknown command in keybinding"),
            }
        }
        applied
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/keybinding.rs"]
mod tests;
