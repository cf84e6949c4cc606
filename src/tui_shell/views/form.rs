use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::form::{ConnectionForm, Field};

use super::super::{RenderCtx, View};

/// The edit form, drawn as a box centered over `area`.
pub(in crate::tui_shell) struct FormView<'a> {
    pub(in crate::tui_shell) form: &'a ConnectionForm,
}

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

impl View for FormView<'_> {
    fn title(&self) -> &str {
        self.form.title()
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx) {
        let w = area.width.saturating_sub(6).clamp(20, 60);
        let box_area = centered(area, w, 13);
        frame.render_widget(Clear, box_area);

        let block = Block::default().borders(Borders::ALL).title(self.title());
        let inner = block.inner(box_area);
        frame.render_widget(block, box_area);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let error = self.form.error();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            let input = self.form.field(field);
            let focused = self.form.focus() == field;
            let style = if error.is_some_and(|e| e.field == field) {
                Style::default().fg(Color::Red)
            } else if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            frame.render_widget(
                Paragraph::new(input.as_str()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(style)
                        .title(field.label()),
                ),
                parts[i],
            );
            if focused {
                let x = input.cursor() as u16;
                let max_x = parts[i].width.saturating_sub(2);
                frame.set_cursor_position((parts[i].x + 1 + x.min(max_x), parts[i].y + 1));
            }
        }

        let message = match error {
            Some(e) => Line::styled(e.to_string(), Style::default().fg(Color::Red)),
            None => Line::styled("Enter: save  Esc: cancel", Style::default().fg(Color::Gray)),
        };
        frame.render_widget(Paragraph::new(message), parts[3]);
    }
}
