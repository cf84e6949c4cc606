use std::collections::HashSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::model::{Connection, ConnectionId};

use super::super::{RenderCtx, View, fmt_ts_since, render_view_chrome};

pub(in crate::tui_shell) struct ConnectionsView<'a> {
    pub(in crate::tui_shell) items: &'a [Connection],
    pub(in crate::tui_shell) selected: usize,

    /// Rows inserted or changed by the last reload; drawn highlighted.
    pub(in crate::tui_shell) fresh: &'a HashSet<&'a ConnectionId>,

    pub(in crate::tui_shell) loaded_at: &'a str,
}

impl ConnectionsView<'_> {
    fn rows(&self) -> Vec<ListItem<'_>> {
        if self.items.is_empty() {
            return vec![ListItem::new("(no connections: press n to add one)")];
        }

        self.items
            .iter()
            .map(|c| {
                let name_style = if self.fresh.contains(&c.id) {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                ListItem::new(vec![
                    Line::from(Span::styled(c.name.as_str(), name_style)),
                    Line::from(Span::styled(
                        format!("  {}", c.endpoint()),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect()
    }

    fn details(&self) -> Vec<Line<'_>> {
        let Some(c) = self.items.get(self.selected) else {
            return vec![Line::from("(no selection)")];
        };
        vec![
            Line::from(format!("id: {}", c.id)),
            Line::from(format!("session: {}", c.session_url())),
            Line::from(format!("stream: {}", c.stream_url())),
        ]
    }
}

impl View for ConnectionsView<'_> {
    fn title(&self) -> &str {
        "Connections"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let subtitle = format!(
            "{} saved, loaded {}",
            self.items.len(),
            fmt_ts_since(self.loaded_at, ctx.now)
        );
        let inner = render_view_chrome(frame, self.title(), &subtitle, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(inner);

        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected.min(self.items.len() - 1)));
        }
        let list = List::new(self.rows())
            .block(Block::default().borders(Borders::BOTTOM))
            .highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, parts[0], &mut state);

        frame.render_widget(
            Paragraph::new(self.details()).wrap(Wrap { trim: false }),
            parts[1],
        );
    }
}
