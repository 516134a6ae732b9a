//! 视图层
//!
//! - window: 主窗口（标题、工具栏、文本视图、状态栏）
//! - text_view: 带行号与自动换行的文本视图
//! - file_chooser: 打开/保存文件对话框

pub mod file_chooser;
pub mod text_view;
mod util;
pub mod window;

pub use file_chooser::{ChooserAction, ChooserRequest, ChooserResponse, FileChooserState};
pub use text_view::TextView;
pub use window::MainWindow;
