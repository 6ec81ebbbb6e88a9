//! Remembered session
//!
//! Keeps the bearer token and username between launches. The stored value is
//! read once at startup and handed to the gate explicitly.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persisted form of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// JSON file holding the remembered session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the application data directory
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(crate::storage::get_data_dir()?.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the remembered session; a missing or corrupt file means none
    pub fn load(&self) -> Option<StoredSession> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return None,
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) if !stored.token.is_empty() => Some(stored),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring unreadable session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        debug!("Saved session to {:?}", self.path);
        Ok(())
    }

    /// Forget the remembered session
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
