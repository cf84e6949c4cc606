//! Navigation between the connection list, the edit form and a running
//! session.
//!
//! The displayed list is only ever changed by reloading the registry and
//! applying the reconciled edit script against what is on screen.

use anyhow::Result;
use tracing::{debug, info};

use crate::form::{ConnectionForm, SaveOutcome};
use crate::model::{Connection, ConnectionId};
use crate::reconcile::{self, ConnectionEdit, EditSummary};
use crate::session::{SessionLauncher, SessionRequest};
use crate::store::{ConnectionsStore, KeyValueStore};

#[derive(Clone, Debug)]
pub enum Screen {
    List,
    Edit(ConnectionForm),
    Session(SessionRequest),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    List,
    Edit,
    Session,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::List => ScreenKind::List,
            Screen::Edit(_) => ScreenKind::Edit,
            Screen::Session(_) => ScreenKind::Session,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Create,
    Edit(ConnectionId),
    Delete(ConnectionId),
    Select(ConnectionId),
    Save,
    Cancel,
    ExitSession,
}

/// What a dispatched intent did, for status reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Saved(Connection),
    /// The edit target was deleted while the form was open; nothing saved.
    Vanished(ConnectionId),
    Rejected(crate::form::FieldError),
    Deleted(ConnectionId),
    Launched(SessionRequest),
    Ignored,
}

pub struct FlowController<K, L> {
    store: ConnectionsStore<K>,
    launcher: L,
    screen: Screen,
    displayed: Vec<Connection>,
    last_edits: Vec<ConnectionEdit>,
    selected: usize,
}

impl<K: KeyValueStore, L: SessionLauncher> FlowController<K, L> {
    /// Starts on the list screen with the registry already loaded.
    pub fn new(store: ConnectionsStore<K>, launcher: L) -> Self {
        let mut flow = Self {
            store,
            launcher,
            screen: Screen::List,
            displayed: Vec::new(),
            last_edits: Vec::new(),
            selected: 0,
        };
        flow.reconcile();
        flow
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn form_mut(&mut self) -> Option<&mut ConnectionForm> {
        match &mut self.screen {
            Screen::Edit(form) => Some(form),
            _ => None,
        }
    }

    pub fn displayed(&self) -> &[Connection] {
        &self.displayed
    }

    pub fn last_edits(&self) -> &[ConnectionEdit] {
        &self.last_edits
    }

    pub fn store(&self) -> &ConnectionsStore<K> {
        &self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn selected(&self) -> Option<&Connection> {
        self.displayed.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.displayed.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.displayed.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Applies `intent` if the current screen accepts it.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = match (self.screen.kind(), intent) {
            (ScreenKind::List, Intent::Create) => {
                self.enter_edit(None);
                Outcome::Moved
            }
            (ScreenKind::List, Intent::Edit(id)) => {
                self.enter_edit(Some(&id));
                Outcome::Moved
            }
            (ScreenKind::List, Intent::Delete(id)) => {
                self.store.delete(&id)?;
                self.reconcile();
                Outcome::Deleted(id)
            }
            (ScreenKind::List, Intent::Select(id)) => {
                let Some(conn) = self.displayed.iter().find(|c| c.id == id) else {
                    debug!(id = %id, "select of connection not on screen");
                    return Ok(Outcome::Ignored);
                };
                let request = SessionRequest::for_connection(conn);
                self.launcher.launch(&request)?;
                self.screen = Screen::Session(request.clone());
                Outcome::Launched(request)
            }
            (ScreenKind::Edit, Intent::Save) => self.save_form()?,
            (ScreenKind::Edit, Intent::Cancel) => {
                self.back_to_list();
                Outcome::Moved
            }
            (ScreenKind::Session, Intent::ExitSession) => {
                self.back_to_list();
                Outcome::Moved
            }
            (screen, intent) => {
                debug!(screen = ?screen, intent = ?intent, "intent ignored");
                Outcome::Ignored
            }
        };
        Ok(outcome)
    }

    pub fn create(&mut self) -> Result<Outcome> {
        self.dispatch(Intent::Create)
    }

    pub fn edit_selected(&mut self) -> Result<Outcome> {
        match self.selected().map(|c| c.id.clone()) {
            Some(id) => self.dispatch(Intent::Edit(id)),
            None => Ok(Outcome::Ignored),
        }
    }

    pub fn delete_selected(&mut self) -> Result<Outcome> {
        match self.selected().map(|c| c.id.clone()) {
            Some(id) => self.dispatch(Intent::Delete(id)),
            None => Ok(Outcome::Ignored),
        }
    }

    pub fn open_selected(&mut self) -> Result<Outcome> {
        match self.selected().map(|c| c.id.clone()) {
            Some(id) => self.dispatch(Intent::Select(id)),
            None => Ok(Outcome::Ignored),
        }
    }

    fn save_form(&mut self) -> Result<Outcome> {
        let Screen::Edit(form) = &mut self.screen else {
            return Ok(Outcome::Ignored);
        };
        match form.submit(&self.store)? {
            SaveOutcome::Saved(conn) => {
                self.back_to_list();
                match self.displayed.iter().position(|c| c.id == conn.id) {
                    Some(pos) => {
                        self.selected = pos;
                        Ok(Outcome::Saved(conn))
                    }
                    None => {
                        info!(id = %conn.id, "edit target gone; nothing saved");
                        Ok(Outcome::Vanished(conn.id))
                    }
                }
            }
            SaveOutcome::Rejected(err) => Ok(Outcome::Rejected(err)),
        }
    }

    fn enter_edit(&mut self, id: Option<&ConnectionId>) {
        let form = ConnectionForm::open(&self.store, id);
        info!(mode = ?form.mode(), "enter edit");
        self.screen = Screen::Edit(form);
    }

    fn back_to_list(&mut self) {
        self.screen = Screen::List;
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let latest = self.store.load();
        let edits = reconcile::diff(&self.displayed, &latest);
        let summary = EditSummary::of(&edits);
        if !summary.is_empty() {
            debug!(
                inserted = summary.inserted,
                removed = summary.removed,
                changed = summary.changed,
                "reconciled connection list"
            );
        }
        reconcile::apply(&mut self.displayed, &edits);
        reconcile::reorder(&mut self.displayed, &latest);
        self.last_edits = edits;

        if self.displayed.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.displayed.len() - 1);
        }
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
