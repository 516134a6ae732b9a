//! crossterm → core::event 转换

use crate::core::event::{
    InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::event as ct;

pub fn into_input_event(event: ct::Event) -> InputEvent {
    match event {
        ct::Event::Key(key) => InputEvent::Key(into_key_event(key)),
        ct::Event::Mouse(mouse) => InputEvent::Mouse(into_mouse_event(mouse)),
        ct::Event::Resize(w, h) => InputEvent::Resize(w, h),
        ct::Event::FocusGained => InputEvent::FocusGained,
        ct::Event::FocusLost => InputEvent::FocusLost,
        ct::Event::Paste(text) => InputEvent::Paste(text),
    }
}

pub fn into_key_event(event: ct::KeyEvent) -> KeyEvent {
    let mut modifiers = KeyModifiers::from(event.modifiers);
    let code = match event.code {
        // Ctrl+Space arrives as NUL.
        ct::KeyCode::Null => {
            modifiers |= KeyModifiers::CONTROL;
            KeyCode::Char(' ')
        }
        other => KeyCode::from(other),
    };
    let kind = match event.kind {
        ct::KeyEventKind::Press => KeyEventKind::Press,
        ct::KeyEventKind::Release => KeyEventKind::Release,
        ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
    };
    KeyEvent {
        code,
        modifiers,
        kind,
    }
}

impl From<ct::KeyModifiers> for KeyModifiers {
    fn from(mods: ct::KeyModifiers) -> Self {
        [
            (ct::KeyModifiers::SHIFT, KeyModifiers::SHIFT),
            (ct::KeyModifiers::CONTROL, KeyModifiers::CONTROL),
            (ct::KeyModifiers::ALT, KeyModifiers::ALT),
            (ct::KeyModifiers::SUPER, KeyModifiers::SUPER),
        ]
        .into_iter()
        .filter(|(theirs, _)| mods.contains(*theirs))
        .fold(KeyModifiers::NONE, |acc, (_, ours)| acc | ours)
    }
}

impl From<ct::KeyCode> for KeyCode {
    fn from(code: ct::KeyCode) -> Self {
        match code {
            ct::KeyCode::Char(ch) => KeyCode::Char(ch),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Esc => KeyCode::Esc,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => KeyCode::Unknown,
        }
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(button: ct::MouseButton) -> Self {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

pub fn into_mouse_event(event: ct::MouseEvent) -> MouseEvent {
    let kind = match event.kind {
        ct::MouseEventKind::Down(b) => MouseEventKind::Down(b.into()),
        ct::MouseEventKind::Up(b) => MouseEventKind::Up(b.into()),
        ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(b.into()),
        ct::MouseEventKind::Moved => MouseEventKind::Moved,
        ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        ct::MouseEventKind::ScrollLeft => MouseEventKind::ScrollLeft,
        ct::MouseEventKind::ScrollRight => MouseEventKind::ScrollRight,
    };
    MouseEvent {
        kind,
        column: event.column,
        row: event.row,
        modifiers: event.modifiers.into(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
