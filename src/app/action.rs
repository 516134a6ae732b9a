//! 应用级动作
//!
//! Named actions triggered from the toolbar or a key chord. The name is
//! only used for logging and for settings; dispatch goes through the
//! controller's action table.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppAction {
    Open,
    Save,
    Quit,
}

impl AppAction {
    pub const ALL: [AppAction; 3] = [AppAction::Open, AppAction::Save, AppAction::Quit];

    pub fn name(&self) -> &'static str {
        match self {
            AppAction::Open => "app.open",
            AppAction::Save => "app.save",
            AppAction::Quit => "app.quit",
        }
    }
}

impl std::fmt::Display for AppAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
