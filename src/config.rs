use std::path::PathBuf;

use crate::store::{FileKv, KeyValueStore, MemoryKv};

pub const STORE_ENV: &str = "VIBEDECK_STORE";
pub const OPENER_ENV: &str = "VIBEDECK_OPENER";

const APP_DIR: &str = "vibedeck";
const LOG_FILE: &str = "vibedeck.log";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreLocation {
    Dir(PathBuf),
    /// Keep the registry in memory for the life of the process.
    Ephemeral,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreLocation,
    pub opener: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Explicit settings win; otherwise the registry lives in the user's
    /// config directory.
    pub fn resolve(
        store_dir: Option<PathBuf>,
        ephemeral: bool,
        opener: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        let store = if ephemeral {
            StoreLocation::Ephemeral
        } else {
            StoreLocation::Dir(store_dir.unwrap_or_else(default_store_dir))
        };
        Self {
            store,
            opener,
            log_file,
        }
    }

    pub fn open_kv(&self) -> Box<dyn KeyValueStore> {
        match &self.store {
            StoreLocation::Dir(dir) => Box::new(FileKv::open(dir)),
            StoreLocation::Ephemeral => Box::new(MemoryKv::new()),
        }
    }

    /// Where tracing output goes, if anywhere.
    pub fn log_path(&self) -> Option<PathBuf> {
        if let Some(p) = &self.log_file {
            return Some(p.clone());
        }
        match &self.store {
            StoreLocation::Dir(dir) => Some(dir.join(LOG_FILE)),
            StoreLocation::Ephemeral => None,
        }
    }

    pub fn store_label(&self) -> String {
        match &self.store {
            StoreLocation::Dir(dir) => dir.display().to_string(),
            StoreLocation::Ephemeral => "(in memory)".to_string(),
        }
    }
}

/// The platform config directory (`dirs::config_dir`) plus `vibedeck`.
pub fn default_store_dir() -> PathBuf {
    store_dir_in(dirs::config_dir())
}

fn store_dir_in(config_dir: Option<PathBuf>) -> PathBuf {
    config_dir
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".vibedeck"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
