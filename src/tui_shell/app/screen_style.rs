use ratatui::style::Color;

use crate::flow::ScreenKind;

pub(in crate::tui_shell) fn screen_color(kind: ScreenKind) -> Color {
    match kind {
        ScreenKind::List => Color::Yellow,
        ScreenKind::Edit => Color::Cyan,
        ScreenKind::Session => Color::Green,
    }
}
