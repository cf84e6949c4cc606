use std::fmt;

use serde::{Deserialize, Serialize};

/// Port used when the user leaves the port field unset.
pub const DEFAULT_PORT: u16 = 7681;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mint a random RFC 4122 version-4 identifier.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A remote terminal endpoint as persisted in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl Connection {
    /// Page the session renderer loads.
    pub fn session_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Socket stream the served page attaches to.
    pub fn stream_url(&self) -> String {
        format!("ws://{}:{}/ws", self.host, self.port)
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
