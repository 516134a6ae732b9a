use super::*;

#[test]
fn test_default_bindings() {
    let service = KeybindingService::new();

    assert_eq!(
        service.get(&Key::simple(KeyCode::Left)),
        Some(&Command::CursorLeft)
    );
    assert_eq!(
        service.get(&Key::ctrl(KeyCode::Char('s'))),
        Some(&Command::Save)
    );
    assert_eq!(
        service.get(&Key::ctrl(KeyCode::Char('o'))),
        Some(&Command::Open)
    );
    assert!(service.len() > 15);
}

#[test]
fn test_save_has_exactly_one_default_accelerator() {
    let service = KeybindingService::new();
    assert_eq!(
        service.keys_for_command(Command::Save),
        vec![Key::ctrl(KeyCode::Char('s'))]
    );
}

#[test]
fn test_custom_bindings() {
    let mut service = KeybindingService::empty();
    assert!(service.is_empty());

    service.bind(Key::ctrl(KeyCode::Char('w')), Command::Quit);

    assert_eq!(
        service.get(&Key::ctrl(KeyCode::Char('w'))),
        Some(&Command::Quit)
    );
}

#[test]
fn test_unbind() {
    let mut service = KeybindingService::new();
    let key = Key::simple(KeyCode::Left);

    assert!(service.is_bound(&key));

    let removed = service.unbind(&key);
    assert_eq!(removed, Some(Command::CursorLeft));
    assert!(!service.is_bound(&key));
}

#[test]
fn test_apply_rules_rebinds_unbinds_and_skips_invalid() {
    let mut service = KeybindingService::new();
    let rules = vec![
        KeybindingRule {
            key: "ctrl+shift+s".to_string(),
            command: "app.save".to_string(),
        },
        KeybindingRule {
            key: "ctrl+q".to_string(),
            command: String::new(),
        },
        KeybindingRule {
            key: "ctrl+???".to_string(),
            command: "save".to_string(),
        },
        KeybindingRule {
            key: "ctrl+k".to_string(),
            command: "doesNotExist".to_string(),
        },
    ];

    assert_eq!(service.apply_rules(&rules), 2);
    assert_eq!(
        service.get(&Key::ctrl_shift(KeyCode::Char('s'))),
        Some(&Command::Save)
    );
    assert!(!service.is_bound(&Key::ctrl(KeyCode::Char('q'))));
    assert!(!service.is_bound(&Key::ctrl(KeyCode::Char('k'))));
}
