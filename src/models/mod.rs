//! 数据模型

pub mod text_buffer;

pub use text_buffer::{slice_to_cow, TextBuffer};
