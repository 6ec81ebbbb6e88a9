//! Message types for completed remote calls

use crate::api::{EngineConfig, HistoryRecord};
use crate::error::ClientResult;
use crate::recognition::{RecognitionResult, RequestTicket, UploadedImage};

/// Result of a background request, delivered to the dashboard
#[derive(Debug)]
pub enum ApiEvent {
    /// A recognition call finished
    Recognized {
        ticket: RequestTicket,
        upload: UploadedImage,
        outcome: ClientResult<RecognitionResult>,
    },
    /// Server history fetch for `token` finished
    HistoryLoaded {
        token: String,
        outcome: ClientResult<Vec<HistoryRecord>>,
    },
    /// Server history deletion for `token` finished
    HistoryCleared {
        token: String,
        outcome: ClientResult<()>,
    },
    /// Login finished
    LoggedIn {
        username: String,
        outcome: ClientResult<String>,
    },
    /// Privilege probe finished for `token`
    PrivilegeProbed {
        token: String,
        outcome: ClientResult<EngineConfig>,
    },
}

impl ApiEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ApiEvent::Recognized { .. } => "recognized",
            ApiEvent::HistoryLoaded { .. } => "history_loaded",
            ApiEvent::HistoryCleared { .. } => "history_cleared",
            ApiEvent::LoggedIn { .. } => "logged_in",
            ApiEvent::PrivilegeProbed { .. } => "privilege_probed",
        }
    }
}
