//! 终端集成层（crossterm + ratatui）
//!
//! Everything that touches the real terminal lives here; the controller and
//! views only see `core::event` types and a ratatui `Backend`.

pub mod crossterm;
pub mod events;
pub mod terminal_guard;
