//! Session Gate
//!
//! Holds the bearer credential and derives administrator capability by
//! probing: a successful privileged read means privileged, an authorization
//! failure means not. A negative probe is an expected outcome, never an error.
//!
//! The session is an owned value handed to whoever needs the credential;
//! nothing here reads ambient process state.

pub mod store;

use tracing::{debug, info, warn};

use crate::api::{EngineConfig, OcrService};
use crate::error::{ClientError, ClientResult};

pub use store::{SessionStore, StoredSession};

/// Current authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub is_privileged: bool,
    pub display_name: Option<String>,
}

/// Owner of the session and of the privileged configuration snapshot
#[derive(Debug, Default)]
pub struct SessionGate {
    session: Session,
    engine_config: Option<EngineConfig>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential; privilege is unknown until probed
    pub fn establish(&mut self, token: impl Into<String>, display_name: Option<String>) {
        self.session = Session {
            token: Some(token.into()),
            is_privileged: false,
            display_name,
        };
        self.engine_config = None;
    }

    /// Discard the credential along with any privileged state
    pub fn clear(&mut self) {
        self.session = Session::default();
        self.engine_config = None;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    /// Credential for an authenticated call; fails locally when signed out
    pub fn require_token(&self) -> ClientResult<String> {
        self.session
            .token
            .clone()
            .ok_or_else(|| ClientError::Auth("Not signed in".to_string()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token.is_some()
    }

    pub fn is_privileged(&self) -> bool {
        self.session.is_privileged
    }

    pub fn display_name(&self) -> Option<&str> {
        self.session.display_name.as_deref()
    }

    /// Configuration snapshot cached by the last successful probe
    pub fn engine_config(&self) -> Option<&EngineConfig> {
        self.engine_config.as_ref()
    }

    /// Exchange credentials for a token and establish the session
    pub async fn login(
        &mut self,
        service: &dyn OcrService,
        username: &str,
        password: &str,
    ) -> ClientResult<()> {
        let token = service.login(username, password).await?;
        self.establish(token, Some(username.to_string()));
        info!("Signed in as {}", username);
        Ok(())
    }

    /// Attempt one privileged read and record the outcome
    pub async fn probe_privilege(&mut self, service: &dyn OcrService) -> bool {
        let outcome = match self.token() {
            Some(token) => service.engine_config(token).await,
            None => Err(ClientError::Auth("Not signed in".to_string())),
        };
        self.apply_probe(outcome)
    }

    /// Apply a completed probe; every failure resolves to "not privileged"
    pub fn apply_probe(&mut self, outcome: ClientResult<EngineConfig>) -> bool {
        match outcome {
            Ok(config) => {
                debug!("Privilege probe succeeded");
                self.session.is_privileged = true;
                self.engine_config = Some(config);
            }
            Err(e) => {
                if e.is_auth() {
                    debug!("Privilege probe denied: {}", e);
                } else {
                    warn!("Privilege probe failed: {}", e);
                }
                self.session.is_privileged = false;
                self.engine_config = None;
            }
        }
        self.session.is_privileged
    }

    /// Inspect the outcome of an authenticated user action; an authorization
    /// failure ends the session. Returns true when the session was cleared.
    pub fn observe<T>(&mut self, outcome: &ClientResult<T>) -> bool {
        match outcome {
            Err(e) if e.is_auth() && self.is_authenticated() => {
                info!("Credential rejected, signing out: {}", e);
                self.clear();
                true
            }
            _ => false,
        }
    }
}
