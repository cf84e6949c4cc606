use super::*;

use ratatui::backend::TestBackend;

use crate::form::Field;
use crate::model::Connection;
use crate::session::SessionRequest;
use crate::store::MemoryKv;

#[derive(Default)]
struct RecordingLauncher {
    launched: Vec<SessionRequest>,
}

impl SessionLauncher for RecordingLauncher {
    fn launch(&mut self, request: &SessionRequest) -> Result<()> {
        self.launched.push(request.clone());
        Ok(())
    }
}

type TestApp = App<MemoryKv, RecordingLauncher>;

fn conn(id: &str, name: &str, host: &str, port: u16) -> Connection {
    Connection {
        id: ConnectionId::from(id),
        name: name.to_string(),
        host: host.to_string(),
        port,
    }
}

fn app_with(list: &[Connection]) -> Result<TestApp> {
    let store = ConnectionsStore::new(MemoryKv::new());
    store.save(list)?;
    Ok(App::load(
        store,
        RecordingLauncher::default(),
        "(test)".to_string(),
    ))
}

fn press(app: &mut TestApp, code: KeyCode) {
    event_loop::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut TestApp, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen_text(app: &TestApp) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(80, 30))?;
    terminal.draw(|f| render::draw(f, app))?;
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let mut out = String::new();
    for (i, cell) in buffer.content().iter().enumerate() {
        if i > 0 && i % width == 0 {
            out.push('\n');
        }
        out.push_str(cell.symbol());
    }
    Ok(out)
}

#[test]
fn keyboard_add_flow_persists_connection() -> Result<()> {
    let mut app = app_with(&[])?;
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.flow.screen().kind(), ScreenKind::Edit);

    type_str(&mut app, "Home");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "192.168.1.5");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.flow.screen().kind(), ScreenKind::List);
    let list = app.flow.store().load();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Home");
    assert_eq!(list[0].port, 7681);
    let last = app.last_result.as_ref().expect("status line");
    assert_eq!(last.kind, EntryKind::Output);
    Ok(())
}

#[test]
fn rejected_save_reports_error_and_stays_in_form() -> Result<()> {
    let mut app = app_with(&[])?;
    press(&mut app, KeyCode::Char('n'));
    type_str(&mut app, "Home");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.flow.screen().kind(), ScreenKind::Edit);
    let last = app.last_result.as_ref().expect("status line");
    assert_eq!(last.kind, EntryKind::Error);
    assert_eq!(last.lines, vec!["host: required".to_string()]);
    let form = app.flow.form_mut().expect("edit screen");
    assert_eq!(form.focus(), Field::Host);
    Ok(())
}

#[test]
fn saving_deleted_target_is_reported_as_error() -> Result<()> {
    let mut app = app_with(&[conn("a", "A", "h", 1)])?;
    press(&mut app, KeyCode::Char('e'));
    app.flow.store().delete(&ConnectionId::from("a"))?;
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.flow.screen().kind(), ScreenKind::List);
    let last = app.last_result.as_ref().expect("status line");
    assert_eq!(last.kind, EntryKind::Error);
    assert_eq!(last.lines, vec!["a no longer exists; nothing saved".to_string()]);
    assert!(app.flow.store().load().is_empty());
    Ok(())
}

#[test]
fn letters_in_form_are_text_not_commands() -> Result<()> {
    let mut app = app_with(&[conn("a", "A", "h", 1)])?;
    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::End);
    type_str(&mut app, "qnd");
    assert!(!app.quit);
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.flow.screen().kind(), ScreenKind::List);
    assert_eq!(app.flow.store().load(), vec![conn("a", "A", "h", 1)]);
    Ok(())
}

#[test]
fn enter_opens_session_and_esc_returns() -> Result<()> {
    let mut app = app_with(&[conn("a", "A", "h", 1), conn("b", "Lab", "10.0.0.2", 22)])?;
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.flow.screen().kind(), ScreenKind::Session);
    assert_eq!(app.flow.launcher().launched[0].url, "http://10.0.0.2:22");

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.flow.screen().kind(), ScreenKind::List);
    assert!(!app.quit);
    Ok(())
}

#[test]
fn delete_key_removes_selected() -> Result<()> {
    let mut app = app_with(&[conn("a", "A", "h", 1), conn("b", "B", "h", 2)])?;
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.flow.store().load(), vec![conn("b", "B", "h", 2)]);
    assert_eq!(app.flow.displayed().len(), 1);
    Ok(())
}

#[test]
fn quit_keys() -> Result<()> {
    let mut app = app_with(&[])?;
    press(&mut app, KeyCode::Char('q'));
    assert!(app.quit);

    let mut app = app_with(&[])?;
    press(&mut app, KeyCode::Char('n'));
    event_loop::handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(app.quit);
    Ok(())
}

#[test]
fn list_screen_shows_rows_and_details() -> Result<()> {
    let app = app_with(&[conn("a1", "Home", "192.168.1.5", 7681)])?;
    let text = screen_text(&app)?;
    assert!(text.contains("Connections"));
    assert!(text.contains("Home"));
    assert!(text.contains("192.168.1.5:7681"));
    assert!(text.contains("ws://192.168.1.5:7681/ws"));
    assert!(text.contains("list>"));
    Ok(())
}

#[test]
fn empty_list_shows_placeholder() -> Result<()> {
    let app = app_with(&[])?;
    let text = screen_text(&app)?;
    assert!(text.contains("(no connections: press n to add one)"));
    Ok(())
}

#[test]
fn edit_screen_shows_form_over_list() -> Result<()> {
    let mut app = app_with(&[conn("a1", "Home", "192.168.1.5", 7681)])?;
    press(&mut app, KeyCode::Char('e'));
    let text = screen_text(&app)?;
    assert!(text.contains("Edit Connection"));
    assert!(text.contains("edit>"));
    assert!(text.contains("7681"));
    Ok(())
}

#[test]
fn since_formatting() -> Result<()> {
    let now = OffsetDateTime::parse("2026-03-01T12:00:00Z", &Rfc3339)?;
    assert_eq!(fmt_ts_since("2026-03-01T11:59:30Z", now), "just now");
    assert_eq!(fmt_ts_since("2026-03-01T11:15:00Z", now), "45m ago");
    assert_eq!(fmt_ts_since("2026-03-01T02:00:00Z", now), "10h ago");
    assert_eq!(fmt_ts_since("not a time", now), "not a time");
    Ok(())
}
