//! 配置：编辑器选项与设置文件结构

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_size: u8,
    pub show_line_numbers: bool,
    pub word_wrap: bool,
    /// Lines moved per mouse wheel notch.
    pub scroll_lines: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            show_line_numbers: true,
            word_wrap: true,
            scroll_lines: 3,
        }
    }
}

impl EditorConfig {
    /// Spaces inserted for the tab key; never zero.
    pub fn tab_string(&self) -> String {
        " ".repeat(self.tab_size.max(1) as usize)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    /// Command name; empty removes the binding.
    pub command: String,
}

#[cfg(test)]
#[path = "../../tests/unit/services/config.rs"]
mod tests;
