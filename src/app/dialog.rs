//! 模态对话框宿主
//!
//! The controller never drives a dialog itself: it hands a request to a
//! `DialogHost`, which runs the chooser until the user accepts or cancels.
//! The terminal frontend implements it with a nested event loop; tests use
//! a scripted host.

use crate::services::file::FileProvider;
use crate::views::file_chooser::{ChooserRequest, ChooserResponse};
use crate::views::window::MainWindow;
use std::io;

pub trait DialogHost {
    /// Shows a modal chooser over `window` and blocks until it is dismissed.
    ///
    /// Errors are terminal I/O failures of the host, never a cancel.
    fn choose_file(
        &mut self,
        request: &ChooserRequest,
        window: &mut MainWindow,
        files: &dyn FileProvider,
    ) -> io::Result<ChooserResponse>;
}
