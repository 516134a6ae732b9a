//! 应用目录
//!
//! 跨平台的数据/配置目录：
//! - macOS: ~/Library/Application Support/textedit
//! - Linux: $XDG_DATA_HOME/textedit 或 ~/.local/share/textedit（配置目录为 ~/.config/textedit）
//! - Windows: %APPDATA%\textedit

use std::path::PathBuf;

const APP_NAME: &str = "textedit";
const LOG_DIR: &str = "logs";
const SETTINGS_FILE: &str = "settings.json";
const SETTINGS_ENV: &str = "TEXTEDIT_SETTINGS";

fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_NAME)
        })
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            Some(PathBuf::from(xdg).join(APP_NAME))
        } else {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
        }
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join(APP_NAME));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join(APP_NAME))
    }

    #[cfg(not(target_os = "linux"))]
    {
        get_app_data_dir()
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

/// 确保日志目录存在
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Settings file location; `$TEXTEDIT_SETTINGS` overrides the config dir.
pub fn get_settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    get_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}
