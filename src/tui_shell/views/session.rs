use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::session::SessionRequest;

use super::super::{RenderCtx, View, render_view_chrome};

pub(in crate::tui_shell) struct SessionView<'a> {
    pub(in crate::tui_shell) request: &'a SessionRequest,
}

impl View for SessionView<'_> {
    fn title(&self) -> &str {
        "Session"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), &self.request.display_name, area);
        let lines = vec![
            Line::from(Span::styled(
                self.request.display_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.request.url.as_str(),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from("The session is open in your browser."),
            Line::from(Span::styled(
                "Esc to return to the list",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
