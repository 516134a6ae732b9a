//! 服务层
//!
//! - file: 文件句柄与文件系统 Provider
//! - keybinding: 按键 → 命令
//! - config / settings: 编辑器配置与只读设置文件
//! - paths: 日志与配置目录

pub mod config;
pub mod file;
pub mod keybinding;
pub mod paths;
pub mod settings;

pub use config::{EditorConfig, KeybindingRule, Settings};
pub use file::{FileError, FileHandle, FileProvider, LocalFileProvider};
pub use keybinding::KeybindingService;
