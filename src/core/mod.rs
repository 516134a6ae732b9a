//! 核心抽象：
//! - Event: 与前端无关的输入事件
//! - Command: 语义命令

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{InputEvent, Key, KeyCode, KeyEvent, KeyModifiers};
