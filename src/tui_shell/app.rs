use std::collections::HashSet;
use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::config::AppConfig;
use crate::flow::{FlowController, Intent, Outcome, Screen, ScreenKind};
use crate::model::ConnectionId;
use crate::reconcile::Edit;
use crate::session::{BrowserLauncher, SessionLauncher};
use crate::store::{ConnectionsStore, KeyValueStore};

use super::view::{RenderCtx, View};
use super::views::{ConnectionsView, FormView, SessionView};

mod event_loop;
mod input_hints;
mod lifecycle;
mod log_types;
mod render;
mod screen_style;
mod time_utils;

use self::input_hints::input_hint;
use self::log_types::{EntryKind, ScrollEntry};
use self::screen_style::screen_color;
pub(in crate::tui_shell) use self::time_utils::fmt_ts_since;
use self::time_utils::{fmt_ts_ui, now_ts};

pub(super) fn run(config: &AppConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let store = ConnectionsStore::new(config.open_kv());
    let launcher = BrowserLauncher::new(config.opener.clone());
    let mut app = App::load(store, launcher, config.store_label());

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

pub(in crate::tui_shell) struct App<K = Box<dyn KeyValueStore>, L = BrowserLauncher> {
    pub(in crate::tui_shell) flow: FlowController<K, L>,
    pub(in crate::tui_shell) store_label: String,

    // When the displayed list was last reconciled against the registry.
    pub(in crate::tui_shell) loaded_at: String,

    pub(in crate::tui_shell) last_result: Option<ScrollEntry>,

    pub(in crate::tui_shell) quit: bool,
}

impl<K: KeyValueStore, L: SessionLauncher> App<K, L> {
    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.last_result = Some(ScrollEntry {
            ts: now_ts(),
            kind: EntryKind::Output,
            lines,
        });
    }

    pub(in crate::tui_shell) fn push_error(&mut self, msg: String) {
        self.last_result = Some(ScrollEntry {
            ts: now_ts(),
            kind: EntryKind::Error,
            lines: vec![msg],
        });
    }

    pub(in crate::tui_shell) fn prompt(&self) -> &'static str {
        match self.flow.screen().kind() {
            ScreenKind::List => "list>",
            ScreenKind::Edit => "edit>",
            ScreenKind::Session => "session>",
        }
    }

    /// Ids whose rows were inserted or changed by the last reconcile.
    pub(in crate::tui_shell) fn fresh_ids(&self) -> HashSet<&ConnectionId> {
        self.flow
            .last_edits()
            .iter()
            .filter_map(|e| match e {
                Edit::Insert { item, .. } => Some(&item.id),
                Edit::Change { key, .. } => Some(key),
                Edit::Remove { .. } => None,
            })
            .collect()
    }

    pub(in crate::tui_shell) fn dispatch(&mut self, intent: Intent) {
        let res = self.flow.dispatch(intent);
        self.report(res);
    }

    /// Puts the result of a flow step in the status panel.
    pub(in crate::tui_shell) fn report(&mut self, res: Result<Outcome>) {
        let reloaded = match res {
            Ok(Outcome::Saved(c)) => {
                self.push_output(vec![format!("saved {} ({})", c.name, c.endpoint())]);
                true
            }
            Ok(Outcome::Vanished(id)) => {
                self.push_error(format!("{} no longer exists; nothing saved", id));
                true
            }
            Ok(Outcome::Deleted(id)) => {
                self.push_output(vec![format!("deleted {}", id)]);
                true
            }
            Ok(Outcome::Launched(req)) => {
                self.push_output(vec![
                    format!("opened {}", req.display_name),
                    req.url.clone(),
                ]);
                false
            }
            Ok(Outcome::Rejected(err)) => {
                self.push_error(err.to_string());
                false
            }
            Ok(Outcome::Moved) => self.flow.screen().kind() == ScreenKind::List,
            Ok(Outcome::Ignored) => false,
            Err(err) => {
                self.push_error(format!("{:#}", err));
                false
            }
        };
        if reloaded {
            self.loaded_at = now_ts();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
