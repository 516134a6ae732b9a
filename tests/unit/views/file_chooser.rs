use super::*;
use crate::services::file::LocalFileProvider;
use std::fs;
use tempfile::tempdir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(state: &mut FileChooserState, text: &str, files: &dyn FileProvider) {
    for ch in text.chars() {
        assert_eq!(
            state.handle_key(&key(KeyCode::Char(ch)), files),
            ChooserStep::Continue
        );
    }
}

fn request_in(mut request: ChooserRequest, dir: &Path) -> ChooserRequest {
    request.initial_dir = Some(dir.to_path_buf());
    request
}

#[test]
fn test_new_lists_directory_with_parent_entry_first() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let files = LocalFileProvider::new();

    let state = FileChooserState::new(request_in(ChooserRequest::open(), dir.path()), &files);

    let names: Vec<&str> = state.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["..", "sub", "a.txt"]);
    assert_eq!(state.input(), dir_prefix(dir.path()));
    assert_eq!(state.cursor(), state.input().len());
    assert!(state.selected().is_none());
}

#[test]
fn test_open_accepts_existing_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::open(), dir.path()), &files);

    type_str(&mut state, "a.txt", &files);
    let step = state.handle_key(&key(KeyCode::Enter), &files);

    assert_eq!(
        step,
        ChooserStep::Done(ChooserResponse::Accept(FileHandle::new(
            dir.path().join("a.txt")
        )))
    );
}

#[test]
fn test_open_missing_file_reports_error_and_stays_open() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::open(), dir.path()), &files);

    type_str(&mut state, "nope.txt", &files);
    assert_eq!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Continue
    );
    assert!(state.error().unwrap().starts_with("No such file"));

    // Editing clears the error.
    state.handle_key(&key(KeyCode::Backspace), &files);
    assert!(state.error().is_none());
}

#[test]
fn test_escape_cancels() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);

    assert_eq!(
        state.handle_key(&key(KeyCode::Esc), &files),
        ChooserStep::Done(ChooserResponse::Cancel)
    );
}

#[test]
fn test_save_new_file_accepts_without_confirmation() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);

    type_str(&mut state, "new.txt", &files);

    assert_eq!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Done(ChooserResponse::Accept(FileHandle::new(
            dir.path().join("new.txt")
        )))
    );
}

#[test]
fn test_save_existing_file_asks_before_replacing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("a.txt");
    fs::write(&target, "old").unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);

    type_str(&mut state, "a.txt", &files);
    assert_eq!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Continue
    );
    assert_eq!(state.confirm_overwrite(), Some(target.as_path()));

    // Declining returns to the name field.
    state.handle_key(&key(KeyCode::Char('n')), &files);
    assert!(state.confirm_overwrite().is_none());

    state.handle_key(&key(KeyCode::Enter), &files);
    assert_eq!(
        state.handle_key(&key(KeyCode::Char('y')), &files),
        ChooserStep::Done(ChooserResponse::Accept(FileHandle::new(target)))
    );
}

#[test]
fn test_save_without_confirmation_flag_overwrites_directly() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "old").unwrap();
    let files = LocalFileProvider::new();
    let mut request = request_in(ChooserRequest::save(), dir.path());
    request.do_overwrite_confirmation = false;
    let mut state = FileChooserState::new(request, &files);

    type_str(&mut state, "a.txt", &files);
    assert!(matches!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Done(ChooserResponse::Accept(_))
    ));
}

#[test]
fn test_save_into_missing_folder_is_rejected() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);

    type_str(&mut state, "missing/a.txt", &files);
    assert_eq!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Continue
    );
    assert!(state.error().unwrap().starts_with("Folder does not exist"));
}

#[test]
fn test_enter_on_directory_navigates() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("inner.txt"), "x").unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::open(), dir.path()), &files);

    // ".." then "sub"
    state.handle_key(&key(KeyCode::Down), &files);
    state.handle_key(&key(KeyCode::Down), &files);
    assert_eq!(state.selected(), Some(1));
    assert_eq!(state.input(), format!("{}sub", dir_prefix(dir.path())));

    assert_eq!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Continue
    );
    assert_eq!(state.dir(), dir.path().join("sub").as_path());
    assert!(state.entries().iter().any(|e| e.name == "inner.txt"));

    // ".." goes back up.
    state.handle_key(&key(KeyCode::Down), &files);
    state.handle_key(&key(KeyCode::Enter), &files);
    assert_eq!(state.dir(), dir.path());
}

#[test]
fn test_tab_completes_common_prefix_and_directories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("alpha.txt"), "").unwrap();
    fs::write(dir.path().join("alpine.txt"), "").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let files = LocalFileProvider::new();

    let mut state = FileChooserState::new(request_in(ChooserRequest::open(), dir.path()), &files);
    type_str(&mut state, "al", &files);
    state.handle_key(&key(KeyCode::Tab), &files);
    assert_eq!(state.input(), format!("{}alp", dir_prefix(dir.path())));

    let mut state = FileChooserState::new(request_in(ChooserRequest::open(), dir.path()), &files);
    type_str(&mut state, "s", &files);
    state.handle_key(&key(KeyCode::Tab), &files);
    assert_eq!(state.dir(), dir.path().join("sub").as_path());
    assert_eq!(state.input(), dir_prefix(&dir.path().join("sub")));
}

#[test]
fn test_cursor_editing_respects_char_boundaries() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);
    let prefix = state.input().to_string();

    type_str(&mut state, "ab", &files);
    state.handle_key(&key(KeyCode::Left), &files);
    type_str(&mut state, "é", &files);
    assert_eq!(state.input(), format!("{prefix}aéb"));

    state.handle_key(&key(KeyCode::Left), &files);
    state.handle_key(&key(KeyCode::Delete), &files);
    assert_eq!(state.input(), format!("{prefix}ab"));

    state.handle_key(&key(KeyCode::End), &files);
    assert_eq!(state.cursor(), state.input().len());
}

#[test]
fn test_control_chords_do_not_insert_text() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);
    let before = state.input().to_string();

    state.handle_key(
        &KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        &files,
    );
    assert_eq!(state.input(), before);
}

#[test]
fn test_paste_drops_line_breaks() {
    let dir = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);
    let prefix = state.input().to_string();

    state.insert_text("notes.txt\n", &files);
    assert_eq!(state.input(), format!("{prefix}notes.txt"));
}

#[test]
fn test_request_near_current_file() {
    let current = Path::new("/tmp/docs/a.txt");

    let save = ChooserRequest::save().near(Some(current));
    assert_eq!(save.initial_dir.as_deref(), Some(Path::new("/tmp/docs")));
    assert_eq!(save.initial_name.as_deref(), Some("a.txt"));

    let open = ChooserRequest::open().near(Some(current));
    assert_eq!(open.initial_dir.as_deref(), Some(Path::new("/tmp/docs")));
    assert!(open.initial_name.is_none());

    assert_eq!(ChooserRequest::open().near(None), ChooserRequest::open());
}

#[test]
fn test_normalize_resolves_dots() {
    assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
}

#[test]
fn test_common_prefix() {
    assert_eq!(common_prefix(["alpha", "alpine"].into_iter()), "alp");
    assert_eq!(common_prefix(["x"].into_iter()), "x");
    assert_eq!(common_prefix(std::iter::empty()), "");
}

#[test]
fn test_ctrl_u_clears_name_field_for_absolute_paths() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);

    state.handle_key(
        &KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        &files,
    );
    assert_eq!(state.input(), "");

    let target = other.path().join("b.txt");
    state.insert_text(&target.display().to_string(), &files);
    assert_eq!(
        state.handle_key(&key(KeyCode::Enter), &files),
        ChooserStep::Done(ChooserResponse::Accept(FileHandle::new(target)))
    );
}

#[test]
fn test_render_shows_title_field_and_overwrite_prompt() {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "old").unwrap();
    let files = LocalFileProvider::new();
    let mut state = FileChooserState::new(request_in(ChooserRequest::save(), dir.path()), &files);

    let screen = |terminal: &Terminal<TestBackend>| -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    };

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            render_file_chooser(&state, frame, area)
        })
        .unwrap();
    let text = screen(&terminal);
    assert!(text.contains("Save as a file"));
    assert!(text.contains("Name: "));
    assert!(text.contains("a.txt"));

    type_str(&mut state, "a.txt", &files);
    state.handle_key(&key(KeyCode::Enter), &files);
    terminal
        .draw(|frame| {
            let area = frame.area();
            render_file_chooser(&state, frame, area)
        })
        .unwrap();
    assert!(screen(&terminal).contains("A file named \"a.txt\" already exists. Replace it?"));
}
