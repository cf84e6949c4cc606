use std::collections::HashSet;
use std::fmt;

use anyhow::Result;
use tracing::{debug, info};

use crate::model::{Connection, ConnectionId, DEFAULT_PORT};
use crate::store::{ConnectionsStore, KeyValueStore};

mod input;

pub use input::TextInput;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    New,
    Editing(ConnectionId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Host,
    Port,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Host, Field::Port];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Host => "host",
            Field::Port => "port",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Host,
            Field::Host => Field::Port,
            Field::Port => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Port,
            Field::Host => Field::Name,
            Field::Port => Field::Host,
        }
    }
}

/// A user-correctable problem with one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

impl std::error::Error for FieldError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validated {
    pub name: String,
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Connection),
    Rejected(FieldError),
}

/// Create/edit form for a single connection profile.
#[derive(Clone, Debug)]
pub struct ConnectionForm {
    mode: FormMode,
    name: TextInput,
    host: TextInput,
    port: TextInput,
    focus: Field,
    error: Option<FieldError>,
}

impl ConnectionForm {
    fn blank(mode: FormMode) -> Self {
        Self {
            mode,
            name: TextInput::default(),
            host: TextInput::default(),
            port: TextInput::default(),
            focus: Field::Name,
            error: None,
        }
    }

    pub fn new_connection() -> Self {
        let mut form = Self::blank(FormMode::New);
        form.port.set(DEFAULT_PORT.to_string());
        form
    }

    /// Opens the form for `editing`, or in create mode when `None`.
    ///
    /// The id is looked up in the registry now. If it no longer exists the
    /// form stays in edit mode with every field blank.
    pub fn open<K: KeyValueStore>(
        store: &ConnectionsStore<K>,
        editing: Option<&ConnectionId>,
    ) -> Self {
        let Some(id) = editing else {
            return Self::new_connection();
        };

        let mut form = Self::blank(FormMode::Editing(id.clone()));
        match store.get(id) {
            Some(c) => {
                form.name.set(c.name);
                form.host.set(c.host);
                form.port.set(c.port.to_string());
            }
            None => debug!(id = %id, "edit target gone; starting blank"),
        }
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::New => "New Connection",
            FormMode::Editing(_) => "Edit Connection",
        }
    }

    pub fn field(&self, field: Field) -> &TextInput {
        match field {
            Field::Name => &self.name,
            Field::Host => &self.host,
            Field::Port => &self.port,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Name => &mut self.name,
            Field::Host => &mut self.host,
            Field::Port => &mut self.port,
        }
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.field_mut(field).set(value.to_string());
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        self.field_mut(self.focus)
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Checks name, host and port in that order, stopping at the first failure.
    pub fn validate(&self) -> Result<Validated, FieldError> {
        let name = self.name.as_str().trim();
        if name.is_empty() {
            return Err(FieldError::new(Field::Name, "required"));
        }

        let host = self.host.as_str().trim();
        if host.is_empty() {
            return Err(FieldError::new(Field::Host, "required"));
        }

        let port = match self.port.as_str().trim().parse::<i64>() {
            Ok(p) if (1..=65535).contains(&p) => p as u16,
            _ => {
                return Err(FieldError::new(
                    Field::Port,
                    "enter a valid port (1-65535)",
                ));
            }
        };

        Ok(Validated {
            name: name.to_string(),
            host: host.to_string(),
            port,
        })
    }

    /// Validates and writes the profile.
    ///
    /// A validation failure is returned as [`SaveOutcome::Rejected`], leaves
    /// the registry untouched and moves focus to the offending field. Only
    /// storage failures are errors.
    pub fn submit<K: KeyValueStore>(
        &mut self,
        store: &ConnectionsStore<K>,
    ) -> Result<SaveOutcome> {
        let v = match self.validate() {
            Ok(v) => v,
            Err(err) => {
                debug!(field = err.field.label(), message = %err.message, "form rejected");
                self.focus = err.field;
                self.error = Some(err.clone());
                return Ok(SaveOutcome::Rejected(err));
            }
        };
        self.error = None;

        let conn = match &self.mode {
            FormMode::Editing(id) => {
                let conn = Connection {
                    id: id.clone(),
                    name: v.name,
                    host: v.host,
                    port: v.port,
                };
                store.update(conn.clone())?;
                conn
            }
            FormMode::New => {
                let conn = Connection {
                    id: fresh_id(store),
                    name: v.name,
                    host: v.host,
                    port: v.port,
                };
                store.add(conn.clone())?;
                conn
            }
        };

        info!(id = %conn.id, endpoint = %conn.endpoint(), "saved connection");
        Ok(SaveOutcome::Saved(conn))
    }
}

fn fresh_id<K: KeyValueStore>(store: &ConnectionsStore<K>) -> ConnectionId {
    let taken: HashSet<ConnectionId> = store.load().into_iter().map(|c| c.id).collect();
    loop {
        let id = ConnectionId::random();
        if !taken.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
