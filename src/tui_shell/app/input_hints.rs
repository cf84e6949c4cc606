use super::*;

fn hint_pairs(kind: ScreenKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ScreenKind::List => &[
            ("Enter", "open"),
            ("n", "new"),
            ("e", "edit"),
            ("d", "delete"),
            ("q", "quit"),
        ],
        ScreenKind::Edit => &[
            ("Tab", "next field"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        ScreenKind::Session => &[("Esc", "back to list")],
    }
}

pub(super) fn input_hint(kind: ScreenKind) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hint_pairs(kind).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{}:", key),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*action, Style::default().fg(screen_color(kind))));
    }
    Line::from(spans)
}
