use super::*;

#[test]
fn test_key_from_uppercase_char_adds_shift() {
    let event = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL);
    let key = Key::from(&event);

    assert_eq!(key.code, KeyCode::Char('s'));
    assert!(key.modifiers.contains(KeyModifiers::CONTROL));
    assert!(key.modifiers.contains(KeyModifiers::SHIFT));
    assert_eq!(key, Key::ctrl_shift(KeyCode::Char('s')));
}

#[test]
fn test_key_from_plain_event() {
    let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(Key::from(&event), Key::simple(KeyCode::Enter));
}

#[test]
fn test_modifiers_remove() {
    let mut mods = KeyModifiers::CONTROL | KeyModifiers::ALT;
    mods.remove(KeyModifiers::ALT);

    assert_eq!(mods, KeyModifiers::CONTROL);
    assert!(!mods.is_empty());
}

#[test]
fn test_release_is_not_press() {
    let mut event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
    assert!(event.is_press());

    event.kind = KeyEventKind::Release;
    assert!(!event.is_press());
}

#[test]
fn test_input_event_accessors() {
    let key = InputEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(key.as_key().is_some());
    assert!(key.as_mouse().is_none());

    let mouse = InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 1,
        row: 2,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(mouse.as_mouse().map(|m| m.row), Some(2));
}
