use super::*;
use crate::app::Model;
use crate::editor::Motion;
use crate::session::Session;
use crate::ui::dialog::{ConfirmDialog, ErrorDialog};
use crate::ui::picker::{FilePicker, PickerMode};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn model_with_text(text: &str, size: (u16, u16)) -> Model {
    let mut session = Session::new();
    session.buffer_mut().set_text(text);
    Model::new(session, size)
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_layout_has_menu_editor_and_status_rows() {
    let [menu, editor, status] = split_screen(Rect::new(0, 0, 80, 24));
    assert_eq!(menu, Rect::new(0, 0, 80, 1));
    assert_eq!(editor, Rect::new(0, 1, 80, 22));
    assert_eq!(status, Rect::new(0, 23, 80, 1));
}

#[test]
fn test_render_shows_menu_text_and_title() {
    let model = model_with_text("hello world\nsecond", (80, 10));
    let mut terminal = create_test_terminal(80, 10);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let menu = row_text(buffer, 0);
    assert!(menu.contains("File:"), "menu row: {menu:?}");
    assert!(menu.contains("Open ^O"), "menu row: {menu:?}");
    assert!(menu.contains("Paste ^V"), "menu row: {menu:?}");

    assert!(row_text(buffer, 1).contains("  1 hello world"));
    assert!(row_text(buffer, 2).contains("  2 second"));

    let status = row_text(buffer, 9);
    assert!(status.contains("Jotpad - Untitled"), "status row: {status:?}");
    assert!(status.contains("Ln 1, Col 1"), "status row: {status:?}");
}

#[test]
fn test_render_places_terminal_cursor_after_gutter() {
    let mut model = model_with_text("abc", (40, 6));
    model.session.buffer_mut().apply_motion(Motion::End, false);
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    // gutter "  1 " is four cells wide, then three chars
    terminal.backend_mut().assert_cursor_position((7, 1));
}

#[test]
fn test_render_expands_tabs() {
    let model = model_with_text("a\tb", (40, 6));
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 1).starts_with("  1 a   b"));
}

#[test]
fn test_render_highlights_selection() {
    let mut model = model_with_text("hello", (80, 6));
    model.session.buffer_mut().apply_motion(Motion::Right, true);
    model.session.buffer_mut().apply_motion(Motion::Right, true);
    let mut terminal = create_test_terminal(80, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(4, 1)].bg, Color::Blue);
    assert_eq!(buffer[(5, 1)].bg, Color::Blue);
    assert_ne!(buffer[(6, 1)].bg, Color::Blue);
    assert!(row_text(buffer, 5).contains("[2 selected]"));
}

#[test]
fn test_render_respects_scroll_offset() {
    let text: Vec<String> = (1..=30).map(|n| format!("line {n}")).collect();
    let mut model = model_with_text(&text.join("\n"), (40, 6));
    model.scroll_offset = 10;
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 1).contains("11 line 11"));
}

#[test]
fn test_render_horizontal_scroll_clips_left() {
    let mut model = model_with_text("abcdefghij", (40, 6));
    model.h_scroll = 3;
    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 1).starts_with("  1 defghij"));
}

#[test]
fn test_help_overlay_lists_commands() {
    let mut model = model_with_text("", (80, 30));
    model.help_visible = true;
    let mut terminal = create_test_terminal(80, 30);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let content = screen_text(terminal.backend().buffer());
    assert!(content.contains("Help"));
    assert!(content.contains("Select all"));
    assert!(content.contains("Any key closes"));
}

#[test]
fn test_confirm_dialog_renders_title_message_and_buttons() {
    let dialog = ConfirmDialog::new("Save Changes?", "Do you want to save changes?");
    let mut terminal = create_test_terminal(80, 20);
    terminal
        .draw(|frame| render_confirm_dialog(&dialog, frame, frame.area()))
        .unwrap();
    let content = screen_text(terminal.backend().buffer());
    assert!(content.contains("Save Changes?"));
    assert!(content.contains("Do you want to save changes?"));
    assert!(content.contains("[ Yes ]"));
    assert!(content.contains("[ No ]"));
    assert!(content.contains("[ Cancel ]"));
}

#[test]
fn test_confirm_dialog_fits_narrow_terminal() {
    let dialog = ConfirmDialog::new("Save Changes?", "Do you want to save changes?");
    let mut terminal = create_test_terminal(20, 5);
    terminal
        .draw(|frame| render_confirm_dialog(&dialog, frame, frame.area()))
        .unwrap();
}

#[test]
fn test_error_dialog_renders_message() {
    let dialog = ErrorDialog::new("Error reading file: missing.txt");
    let mut terminal = create_test_terminal(80, 20);
    terminal
        .draw(|frame| render_error_dialog(&dialog, frame, frame.area()))
        .unwrap();
    let content = screen_text(terminal.backend().buffer());
    assert!(content.contains("Error reading file: missing.txt"));
    assert!(content.contains("Press any key"));
}

#[test]
fn test_file_picker_renders_entries_and_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "n").unwrap();
    std::fs::create_dir(dir.path().join("drafts")).unwrap();
    let picker = FilePicker::new(PickerMode::Save, dir.path(), false).with_name("letter");

    let mut terminal = create_test_terminal(80, 24);
    terminal
        .draw(|frame| render_file_picker(&picker, frame, frame.area()))
        .unwrap();
    let content = screen_text(terminal.backend().buffer());
    assert!(content.contains(" Save "));
    assert!(content.contains("drafts/"));
    assert!(content.contains("notes.txt"));
    assert!(content.contains("Name: letter"));
    assert!(content.contains("*.txt"));
}
