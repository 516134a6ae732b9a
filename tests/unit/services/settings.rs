use super::*;
use tempfile::tempdir;

#[test]
fn test_parse_keybinding_modifiers() {
    assert_eq!(
        parse_keybinding("ctrl+s"),
        Some(Key::ctrl(KeyCode::Char('s')))
    );
    assert_eq!(
        parse_keybinding("Primary + S"),
        Some(Key::ctrl_shift(KeyCode::Char('s')))
    );
    assert_eq!(
        parse_keybinding("alt+z"),
        Some(Key::new(KeyCode::Char('z'), KeyModifiers::ALT))
    );
}

#[test]
fn test_parse_keybinding_named_keys() {
    assert_eq!(parse_keybinding("f5"), Some(Key::simple(KeyCode::F(5))));
    assert_eq!(parse_keybinding("f"), Some(Key::simple(KeyCode::Char('f'))));
    assert_eq!(
        parse_keybinding("ctrl+pagedown"),
        Some(Key::ctrl(KeyCode::PageDown))
    );
}

#[test]
fn test_parse_keybinding_rejects_garbage() {
    assert_eq!(parse_keybinding(""), None);
    assert_eq!(parse_keybinding("ctrl+"), None);
    assert_eq!(parse_keybinding("ctrl+nope"), None);
}

#[test]
fn test_load_settings_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("settings.json"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_load_settings_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn test_load_settings_reads_editor_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "editor": { "show_line_numbers": false } }"#).unwrap();

    let settings = load_settings_from(&path);
    assert!(!settings.editor.show_line_numbers);
}
