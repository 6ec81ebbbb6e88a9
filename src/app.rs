//! Application Coordinator
//!
//! Runs remote calls on a tokio runtime and hands every completion back to
//! the dashboard through a channel. The UI never blocks on the network.

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, error};

use crate::api::{self, ApiClient, OcrService};
use crate::config::AppConfig;
use crate::recognition::{CoordinateMode, RequestTicket, UploadedImage};
use crate::shared::ApiEvent;

/// Dispatches service calls off the UI thread
pub struct TaskRunner {
    runtime: Runtime,
    service: Arc<dyn OcrService>,
    events: Sender<ApiEvent>,
    repaint: Option<egui::Context>,
}

impl TaskRunner {
    /// Runner talking HTTP to the configured server
    pub fn from_config(config: &AppConfig) -> Result<(Self, Receiver<ApiEvent>)> {
        let client = ApiClient::new(&config.server.base_url, config.server.timeout())
            .context("Failed to create service client")?;
        Self::with_service(Arc::new(client))
    }

    pub fn with_service(service: Arc<dyn OcrService>) -> Result<(Self, Receiver<ApiEvent>)> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let (events, receiver) = unbounded();

        Ok((
            Self {
                runtime,
                service,
                events,
                repaint: None,
            },
            receiver,
        ))
    }

    /// Wake the UI whenever an event is delivered
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn recognize(
        &self,
        ticket: RequestTicket,
        token: String,
        upload: UploadedImage,
        mode: CoordinateMode,
    ) {
        let service = self.service.clone();
        self.dispatch(async move {
            let outcome = api::recognize_upload(service.as_ref(), &token, &upload, mode).await;
            ApiEvent::Recognized {
                ticket,
                upload,
                outcome,
            }
        });
    }

    pub fn load_history(&self, token: String) {
        let service = self.service.clone();
        self.dispatch(async move {
            let outcome = service.fetch_history(&token).await;
            ApiEvent::HistoryLoaded { token, outcome }
        });
    }

    pub fn clear_history(&self, token: String) {
        let service = self.service.clone();
        self.dispatch(async move {
            let outcome = service.clear_history(&token).await;
            ApiEvent::HistoryCleared { token, outcome }
        });
    }

    pub fn login(&self, username: String, password: String) {
        let service = self.service.clone();
        self.dispatch(async move {
            let outcome = service.login(&username, &password).await;
            ApiEvent::LoggedIn { username, outcome }
        });
    }

    pub fn probe_privilege(&self, token: String) {
        let service = self.service.clone();
        self.dispatch(async move {
            let outcome = service.engine_config(&token).await;
            ApiEvent::PrivilegeProbed { token, outcome }
        });
    }

    fn dispatch<F>(&self, task: F)
    where
        F: std::future::Future<Output = ApiEvent> + Send + 'static,
    {
        let events = self.events.clone();
        let repaint = self.repaint.clone();

        self.runtime.spawn(async move {
            let event = task.await;
            debug!("Delivering {} event", event.kind());
            if events.send(event).is_err() {
                error!("Dashboard is gone, dropping event");
                return;
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeService;
    use crate::error::ClientError;
    use std::time::Duration;

    fn runner(service: FakeService) -> (TaskRunner, Receiver<ApiEvent>, Arc<FakeService>) {
        let service = Arc::new(service);
        let (runner, rx) = TaskRunner::with_service(service.clone()).unwrap();
        (runner, rx, service)
    }

    fn next(rx: &Receiver<ApiEvent>) -> ApiEvent {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_login_event() {
        let service = FakeService::default();
        *service.login.lock().unwrap() = Ok("tok".into());
        let (runner, rx, _service) = runner(service);

        runner.login("alice".into(), "pw".into());

        match next(&rx) {
            ApiEvent::LoggedIn { username, outcome } => {
                assert_eq!(username, "alice");
                assert_eq!(outcome.unwrap(), "tok");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_probe_event_carries_token() {
        let service = FakeService::default();
        *service.engine.lock().unwrap() = Err(ClientError::Auth("admin only".into()));
        let (runner, rx, service) = runner(service);

        runner.probe_privilege("user-token".into());

        match next(&rx) {
            ApiEvent::PrivilegeProbed { token, outcome } => {
                assert_eq!(token, "user-token");
                assert!(outcome.unwrap_err().is_auth());
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(service.calls(), vec!["engine_config:user-token".to_string()]);
    }

    #[test]
    fn test_history_events() {
        let service = FakeService::default();
        *service.history.lock().unwrap() = Ok(Vec::new());
        *service.clear.lock().unwrap() = Ok(());
        let (runner, rx, _service) = runner(service);

        runner.load_history("t".into());
        assert!(matches!(
            next(&rx),
            ApiEvent::HistoryLoaded { token, outcome: Ok(records) } if token == "t" && records.is_empty()
        ));

        runner.clear_history("t".into());
        assert!(matches!(
            next(&rx),
            ApiEvent::HistoryCleared { token, outcome: Ok(()) } if token == "t"
        ));
    }
}
