//! textedit - 极简 TUI 文本编辑器库
//!
//! 模块结构：
//! - core: 输入事件与语义命令
//! - models: 数据模型（TextBuffer）
//! - services: 服务层（文件 Provider、快捷键、配置）
//! - views: 视图层（MainWindow、TextView、文件选择对话框）
//! - app: 应用层（Controller、打开/保存流程、终端前端）
//! - tui: 终端集成（crossterm 事件转换、终端守卫）

pub mod app;
pub mod core;
pub mod models;
pub mod services;
pub mod tui;
pub mod views;
