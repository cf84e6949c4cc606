use super::*;

pub(in crate::tui_shell) fn draw<K: KeyValueStore, L: SessionLauncher>(
    frame: &mut ratatui::Frame,
    app: &App<K, L>,
) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    let kind = app.flow.screen().kind();

    // Header
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "vibedeck",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(app.prompt(), Style::default().fg(screen_color(kind))),
        Span::raw("  "),
        Span::raw(app.store_label.as_str()),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Main view
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };
    let fresh = app.fresh_ids();
    let list = ConnectionsView {
        items: app.flow.displayed(),
        selected: app.flow.selected_index(),
        fresh: &fresh,
        loaded_at: &app.loaded_at,
    };
    match app.flow.screen() {
        Screen::List => list.render(frame, chunks[1], &ctx),
        Screen::Edit(form) => {
            list.render(frame, chunks[1], &ctx);
            FormView { form }.render(frame, chunks[1], &ctx);
        }
        Screen::Session(request) => SessionView { request }.render(frame, chunks[1], &ctx),
    }

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", fmt_ts_ui(&r.ts)),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    frame.render_widget(Paragraph::new(input_hint(kind)), chunks[3]);
}
