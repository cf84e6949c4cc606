use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::Connection;

/// What the session renderer needs to show a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRequest {
    pub url: String,
    pub display_name: String,
}

impl SessionRequest {
    pub fn for_connection(conn: &Connection) -> Self {
        Self {
            url: conn.session_url(),
            display_name: conn.name.clone(),
        }
    }
}

/// Hands a session off to whatever renders it.
///
/// The renderer owns the session from here on; the caller is told the
/// session ended through its own exit signal.
pub trait SessionLauncher {
    fn launch(&mut self, request: &SessionRequest) -> Result<()>;
}

/// Opens the session URL with the platform's web opener, or a user-chosen
/// command that takes the URL as its last argument.
#[derive(Debug, Default)]
pub struct BrowserLauncher {
    opener: Option<String>,

    // One thread per spawned opener, waiting on it so it is reaped on exit.
    reapers: Vec<JoinHandle<()>>,
}

impl BrowserLauncher {
    pub fn new(opener: Option<String>) -> Self {
        Self {
            opener: opener.filter(|s| !s.trim().is_empty()),
            reapers: Vec::new(),
        }
    }

    fn command(&self, url: &str) -> Command {
        if let Some(opener) = &self.opener {
            let mut parts = opener.split_whitespace();
            let mut cmd = Command::new(parts.next().unwrap_or(opener));
            cmd.args(parts).arg(url);
            return cmd;
        }

        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(url);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl SessionLauncher for BrowserLauncher {
    fn launch(&mut self, request: &SessionRequest) -> Result<()> {
        let mut cmd = self.command(&request.url);
        let program = cmd.get_program().to_string_lossy().to_string();
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("launch {} for {}", program, request.url))?;
        info!(url = %request.url, name = %request.display_name, opener = %program, "session launched");

        self.reapers.retain(|h| !h.is_finished());
        self.reapers.push(thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                warn!(opener = %program, status = %status, "opener exited with failure")
            }
            Ok(_) => {}
            Err(err) => warn!(opener = %program, error = %err, "wait for opener failed"),
        }));
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
