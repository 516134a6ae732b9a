use super::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buf = terminal.backend().buffer();
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_toolbar_button_areas() {
    let areas = toolbar_button_areas(Rect::new(0, 1, 80, 1));

    assert_eq!(
        areas,
        vec![
            (Rect::new(1, 1, 6, 1), AppAction::Open),
            (Rect::new(8, 1, 6, 1), AppAction::Save),
        ]
    );
}

#[test]
fn test_toolbar_buttons_dropped_when_too_narrow() {
    let areas = toolbar_button_areas(Rect::new(0, 0, 10, 1));
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].1, AppAction::Open);
}

#[test]
fn test_layout_stacks_header_toolbar_view_status() {
    let layout = compute_window_layout(Rect::new(0, 0, 40, 10));

    assert_eq!(layout.header, Rect::new(0, 0, 40, 1));
    assert_eq!(layout.toolbar, Rect::new(0, 1, 40, 1));
    assert_eq!(layout.view, Rect::new(0, 2, 40, 7));
    assert_eq!(layout.status, Rect::new(0, 9, 40, 1));
}

#[test]
fn test_render_window_parts_and_hit_testing() {
    let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    let mut window = MainWindow::new(&EditorConfig::default());
    window.view_mut().set_text("Hello, World!");

    terminal
        .draw(|frame| {
            let area = frame.area();
            window.render(frame, area)
        })
        .unwrap();

    assert!(row_text(&terminal, 0).contains(WINDOW_TITLE));
    let toolbar = row_text(&terminal, 1);
    assert!(toolbar.contains(" Open "));
    assert!(toolbar.contains(" Save "));
    assert!(row_text(&terminal, 2).contains("Hello, World!"));
    assert!(row_text(&terminal, 5).contains("[No file]"));

    assert_eq!(window.toolbar_hit(2, 1), Some(AppAction::Open));
    assert_eq!(window.toolbar_hit(9, 1), Some(AppAction::Save));
    assert_eq!(window.toolbar_hit(30, 1), None);
    assert_eq!(window.toolbar_hit(2, 0), None);
    assert!(window.view_contains(5, 3));
    assert!(!window.view_contains(5, 5));
}

#[test]
fn test_status_message_and_file_label() {
    let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
    let mut window = MainWindow::new(&EditorConfig::default());
    window.set_status(StatusKind::Error, "Error: boom");
    window.set_file_label(Some("a.txt".to_string()));

    terminal
        .draw(|frame| {
            let area = frame.area();
            window.render(frame, area)
        })
        .unwrap();

    let status = row_text(&terminal, 5);
    assert!(status.contains("Error: boom"));
    assert!(status.contains("a.txt  Ln 1, Col 1"));

    window.clear_status();
    assert!(window.status().is_none());
}
