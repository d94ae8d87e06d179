use b64file::app::{App, NoticeLevel};
use b64file::config::Settings;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use tempfile::TempDir;

const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAAAAAA6fptVAAAACklEQVR4nGNgAAAAAgABSK+kcQAAAABJRU5ErkJggg==";

// ─── Helpers ─────────────────────────────────────────────────────────────

fn app_in(dir: &TempDir) -> App<'static> {
    App::new(Settings {
        margin: 2,
        output_dir: dir.path().to_path_buf(),
        initial_text: None,
    })
}

/// Renders the app into a TestBackend buffer and returns the buffer for inspection.
fn render_app(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    terminal.backend().buffer().clone()
}

/// Renders, then ticks until any pending wrap finishes, then renders again.
fn render_settled(app: &mut App, width: u16, height: u16) -> Buffer {
    render_app(app, width, height);
    while app.is_busy() {
        app.tick();
    }
    render_app(app, width, height)
}

/// Extracts the text content of a single row from the buffer (stripping trailing spaces).
fn buffer_line_text(buf: &Buffer, row: u16) -> String {
    let width = buf.area.width;
    let mut text = String::new();
    for col in 0..width {
        if let Some(cell) = buf.cell((col, row)) {
            text.push_str(cell.symbol());
        }
    }
    text.trim_end().to_string()
}

/// Searches the entire buffer for a substring and returns true if found.
fn buffer_contains(buf: &Buffer, needle: &str) -> bool {
    (0..buf.area.height).any(|row| buffer_line_text(buf, row).contains(needle))
}

/// Returns the first (x, y) where `needle` starts.
fn find_in_buffer(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    (0..buf.area.height).find_map(|row| {
        let line = buffer_line_text(buf, row);
        line.find(needle)
            .map(|byte_idx| (line[..byte_idx].chars().count() as u16, row))
    })
}

fn ctrl(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

// ═══════════════════════════════════════════════════════════════════════
// A. Layout
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn header_shows_title() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let buf = render_app(&mut app, 80, 24);
    assert!(buffer_line_text(&buf, 0).contains("Base64 to file"));
}

#[test]
fn empty_buffer_shows_placeholder() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let buf = render_app(&mut app, 80, 24);
    assert!(buffer_line_text(&buf, 2).contains("Paste a Base64 string"));
}

#[test]
fn status_bar_shows_initial_hint() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let buf = render_app(&mut app, 120, 24);
    assert!(buffer_line_text(&buf, 23).contains("F1: help"));
}

#[test]
fn status_bar_shows_wrap_width_until_edited() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste(PNG_B64.into()));
    let buf = render_settled(&mut app, 80, 24);
    let status = buffer_line_text(&buf, 23);
    assert!(status.contains("78 cols"), "got: '{}'", status);
    assert!(status.contains("2 lines"), "got: '{}'", status);

    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    let buf = render_app(&mut app, 80, 24);
    assert!(!buffer_line_text(&buf, 23).contains("cols"));
}

#[test]
fn tilde_markers_below_content() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste("aGVsbG8=".into()));
    let buf = render_settled(&mut app, 80, 10);
    assert!(buffer_line_text(&buf, 2).contains("aGVsbG8="));
    assert!(buffer_line_text(&buf, 3).starts_with('~'));
}

// ═══════════════════════════════════════════════════════════════════════
// B. Wrapping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn pasted_text_fits_content_width() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste(PNG_B64.into()));
    let buf = render_settled(&mut app, 40, 20);

    // Budget is 40 - 2 cells
    let lines = app.textarea.lines();
    assert_eq!(lines[0].len(), 38);
    assert!(lines.iter().all(|l| l.len() <= 38));
    assert_eq!(lines.concat(), PNG_B64);
    assert!(buffer_line_text(&buf, 2).starts_with(&PNG_B64[..38]));
}

#[test]
fn width_is_capped_for_wide_terminals() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste("QUJD".repeat(100)));
    render_settled(&mut app, 200, 20);
    assert_eq!(app.textarea.lines()[0].len(), 118);
}

#[test]
fn resize_reflows_paste() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste(PNG_B64.into()));
    render_settled(&mut app, 40, 20);
    assert_eq!(app.textarea.lines()[0].len(), 38);

    render_settled(&mut app, 60, 20);
    assert_eq!(app.textarea.lines()[0].len(), 58);
    assert_eq!(app.textarea.lines().concat(), PNG_B64);
}

#[test]
fn wrap_progress_badge_while_busy() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste("QUJD".repeat(5000)));
    // First frame starts the job, second shows its progress
    render_app(&mut app, 80, 20);
    let buf = render_app(&mut app, 80, 20);
    assert!(buffer_line_text(&buf, 0).contains("WRAPPING"));

    let buf = render_settled(&mut app, 80, 20);
    assert!(!buffer_line_text(&buf, 0).contains("WRAPPING"));
}

#[test]
fn tildes_stay_off_content_in_very_long_buffers() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    // Budget 1 at width 3: one line per character, more lines than u16 holds
    app.handle_event(Event::Paste("A".repeat(65_538)));
    let buf = render_settled(&mut app, 3, 10);
    assert_eq!(app.textarea.lines().len(), 65_538);
    for row in 2..8 {
        assert_eq!(buf.cell((0, row)).unwrap().symbol(), "A", "row {}", row);
    }
}

#[test]
fn render_frame_advances_wrap() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste("QUJD".repeat(10)));
    let backend = TestBackend::new(20, 10);
    let mut terminal = Terminal::new(backend).unwrap();
    app.render_frame(&mut terminal).unwrap();
    assert!(!app.is_busy());
    assert_eq!(app.textarea.lines()[0], "QUJDQUJDQUJDQUJDQU");
}

// ═══════════════════════════════════════════════════════════════════════
// C. Save prompt and notices
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn header_shows_save_prompt() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste(PNG_B64.into()));
    render_settled(&mut app, 200, 20);
    app.handle_event(ctrl('s'));
    let buf = render_app(&mut app, 200, 20);
    let header = buffer_line_text(&buf, 0);
    assert!(header.contains("PNG Files (*.png)"), "got: '{}'", header);
    assert!(header.contains("base64.png"), "got: '{}'", header);
}

#[test]
fn error_notice_is_drawn_in_red() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste("aGVsbG8=".into()));
    app.handle_event(ctrl('s'));
    assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Error);

    let buf = render_app(&mut app, 80, 24);
    let (x, y) = find_in_buffer(&buf, "Unrecognized format").expect("notice title");
    assert_eq!(buf.cell((x, y)).unwrap().fg, Color::Red);
    assert!(buffer_contains(&buf, "neither PNG nor PDF"));
    assert!(buffer_contains(&buf, "Press any key"));
}

#[test]
fn warning_notice_for_empty_input() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(ctrl('s'));
    let buf = render_app(&mut app, 80, 24);
    let (x, y) = find_in_buffer(&buf, "No input").expect("notice title");
    assert_eq!(buf.cell((x, y)).unwrap().fg, Color::Yellow);
}

#[test]
fn help_modal_lists_save_key() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)));
    let buf = render_app(&mut app, 80, 24);
    assert!(buffer_contains(&buf, "Keybindings"));
    assert!(buffer_contains(&buf, "Save as PNG / PDF"));
}

#[test]
fn success_notice_names_path() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_event(Event::Paste(PNG_B64.into()));
    render_settled(&mut app, 80, 24);
    app.handle_event(ctrl('s'));
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    let buf = render_app(&mut app, 120, 24);
    assert!(buffer_contains(&buf, "File saved to:"));
    assert!(dir.path().join("base64.png").exists());
}
