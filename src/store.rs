use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::{Connection, ConnectionId};

mod kv;

pub use kv::{FileKv, KeyValueStore, MemoryKv};

const KEY: &str = "connections_json";

/// The persisted registry of connection profiles.
///
/// Every mutation reloads the whole registry, applies the change and writes
/// the whole registry back. Nothing guards against two processes doing this
/// at the same time; the later write wins.
pub struct ConnectionsStore<K> {
    kv: K,
}

impl<K: KeyValueStore> ConnectionsStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Returns the registry in stored order. A missing, unreadable or
    /// malformed payload loads as an empty registry. Of several entries
    /// sharing an id only the first is kept.
    pub fn load(&self) -> Vec<Connection> {
        let raw = match self.kv.get(KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                let err = format!("{:#}", err);
                warn!(error = %err, "connection registry unreadable; using empty registry");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Connection>>(&raw) {
            Ok(list) => dedupe_ids(list),
            Err(err) => {
                warn!(error = %err, "connection registry malformed; using empty registry");
                Vec::new()
            }
        }
    }

    pub fn save(&self, connections: &[Connection]) -> Result<()> {
        let bytes =
            serde_json::to_string_pretty(connections).context("serialize connection registry")?;
        self.kv.put(KEY, &bytes).context("write connection registry")
    }

    /// Appends `connection`. The caller guarantees its id is not already present.
    pub fn add(&self, connection: Connection) -> Result<()> {
        let mut list = self.load();
        info!(id = %connection.id, name = %connection.name, "add connection");
        list.push(connection);
        self.save(&list)
    }

    pub fn update(&self, connection: Connection) -> Result<()> {
        let list = self.load();
        if !list.iter().any(|c| c.id == connection.id) {
            warn!(id = %connection.id, "update target not in registry");
        } else {
            info!(id = %connection.id, name = %connection.name, "update connection");
        }
        let list: Vec<Connection> = list
            .into_iter()
            .map(|c| {
                if c.id == connection.id {
                    connection.clone()
                } else {
                    c
                }
            })
            .collect();
        self.save(&list)
    }

    pub fn delete(&self, id: &ConnectionId) -> Result<()> {
        let mut list = self.load();
        let before = list.len();
        list.retain(|c| &c.id != id);
        if list.len() != before {
            info!(id = %id, "delete connection");
        }
        self.save(&list)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<Connection> {
        self.load().into_iter().find(|c| &c.id == id)
    }

    /// Looks up a profile by exact id, then unique id prefix, then unique name.
    pub fn resolve(&self, query: &str) -> Option<Connection> {
        let list = self.load();
        if let Some(c) = list.iter().find(|c| c.id.as_str() == query) {
            return Some(c.clone());
        }

        if !query.is_empty() {
            let mut by_prefix = list.iter().filter(|c| c.id.as_str().starts_with(query));
            if let (Some(c), None) = (by_prefix.next(), by_prefix.next()) {
                return Some(c.clone());
            }
        }

        let mut by_name = list.iter().filter(|c| c.name == query);
        match (by_name.next(), by_name.next()) {
            (Some(c), None) => Some(c.clone()),
            _ => None,
        }
    }
}

fn dedupe_ids(list: Vec<Connection>) -> Vec<Connection> {
    let mut seen = HashSet::new();
    let before = list.len();
    let list: Vec<Connection> = list
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect();
    if list.len() != before {
        warn!(
            dropped = before - list.len(),
            "connection registry has duplicate ids; keeping first of each"
        );
    }
    list
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
