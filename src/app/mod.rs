//! 应用层：动作、控制器、对话框宿主与终端前端

pub mod action;
pub mod controller;
pub mod dialog;
pub mod frontend;

pub use action::AppAction;
pub use controller::{Controller, FlowError, FlowOutcome};
pub use dialog::DialogHost;
pub use frontend::Frontend;
