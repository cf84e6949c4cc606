use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(in crate::tui_shell) fn handle_key<K: KeyValueStore, L: SessionLauncher>(
    app: &mut App<K, L>,
    key: KeyEvent,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    match app.flow.screen().kind() {
        ScreenKind::List => handle_list_key(app, key),
        ScreenKind::Edit => handle_edit_key(app, key),
        ScreenKind::Session => handle_session_key(app, key),
    }
}

fn handle_list_key<K: KeyValueStore, L: SessionLauncher>(app: &mut App<K, L>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.flow.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.flow.select_next(),
        KeyCode::Char('n') => app.dispatch(Intent::Create),
        KeyCode::Char('e') => {
            let res = app.flow.edit_selected();
            app.report(res);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let res = app.flow.delete_selected();
            app.report(res);
        }
        KeyCode::Enter => {
            let res = app.flow.open_selected();
            app.report(res);
        }
        _ => {}
    }
}

fn handle_edit_key<K: KeyValueStore, L: SessionLauncher>(app: &mut App<K, L>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.dispatch(Intent::Cancel);
            return;
        }
        KeyCode::Enter => {
            app.dispatch(Intent::Save);
            return;
        }
        _ => {}
    }

    let Some(form) = app.flow.form_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.focused_mut().move_left(),
        KeyCode::Right => form.focused_mut().move_right(),
        KeyCode::Home => form.focused_mut().move_home(),
        KeyCode::End => form.focused_mut().move_end(),
        KeyCode::Backspace => form.focused_mut().backspace(),
        KeyCode::Delete => form.focused_mut().delete(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.focused_mut().insert_char(c)
        }
        _ => {}
    }
}

fn handle_session_key<K: KeyValueStore, L: SessionLauncher>(app: &mut App<K, L>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
            app.dispatch(Intent::ExitSession);
        }
        _ => {}
    }
}
