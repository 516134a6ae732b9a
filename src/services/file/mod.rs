//! 文件服务模块
//!
//! open/save 流程使用的文件句柄与文件系统抽象

pub mod local;
pub mod provider;

pub use local::LocalFileProvider;
pub use provider::{decode_utf8, DirEntry, FileError, FileHandle, FileProvider};
