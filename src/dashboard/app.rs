//! Dashboard application entry point
//!
//! Owns the session, the history cache, the request tracker and the overlay.
//! Views raise commands; remote calls go through the task runner and come
//! back as [`ApiEvent`]s, which are applied here on the UI thread.

use crossbeam_channel::Receiver;
use eframe::egui;
use tracing::{debug, info, warn};

use crate::app::TaskRunner;
use crate::config::AppConfig;
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardCommand, DashboardState, DashboardView};
use crate::dashboard::theme;
use crate::dashboard::views::{
    render_engine_view, render_history_view, render_login_view, render_recognize_view,
};
use crate::error::{ClientError, ClientResult};
use crate::history::HistoryCache;
use crate::overlay::view::ViewOptions;
use crate::overlay::OverlayRenderer;
use crate::recognition::{RecognitionResult, RecognitionTracker, UploadedImage};
use crate::session::{SessionGate, SessionStore, StoredSession};
use crate::shared::ApiEvent;

/// The main dashboard application
pub struct DashboardApp {
    config: AppConfig,
    runner: TaskRunner,
    events: Receiver<ApiEvent>,
    session: SessionGate,
    store: Option<SessionStore>,
    history: HistoryCache,
    tracker: RecognitionTracker,
    overlay: OverlayRenderer,
    view_options: ViewOptions,
    /// Dashboard-specific state
    state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl DashboardApp {
    /// Create the dashboard, resuming `restored` when given
    pub fn new(
        config: AppConfig,
        runner: TaskRunner,
        events: Receiver<ApiEvent>,
        store: Option<SessionStore>,
        restored: Option<StoredSession>,
    ) -> Self {
        let view_options = ViewOptions {
            opacity: config.overlay.opacity,
            show_tooltips: config.overlay.show_tooltips,
            ..Default::default()
        };

        let mut app = Self {
            history: HistoryCache::with_capacity(config.history.capacity),
            config,
            runner,
            events,
            session: SessionGate::new(),
            store,
            tracker: RecognitionTracker::new(),
            overlay: OverlayRenderer::new(),
            view_options,
            state: DashboardState::default(),
            theme_applied: false,
        };

        if let Some(stored) = restored {
            info!("Resuming saved session");
            app.state.login.username = stored.username.clone().unwrap_or_default();
            app.session.establish(stored.token, stored.username);
            app.start_session();
        }

        app
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 760.0])
                .with_min_inner_size([720.0, 480.0])
                .with_title("OCR Lens"),
            ..Default::default()
        }
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    /// Resync history and probe privilege for the current credential
    fn start_session(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };
        self.state.history.loading = true;
        self.runner.load_history(token.clone());
        self.runner.probe_privilege(token);
    }

    /// Apply a command raised by a view
    fn handle_command(&mut self, command: DashboardCommand) {
        debug!("Dashboard command: {}", command.name());
        match command {
            DashboardCommand::Login { username, password } => {
                self.runner.login(username, password);
            }
            DashboardCommand::Recognize { path } => self.submit_upload(&path),
            DashboardCommand::ReloadHistory => match self.session.require_token() {
                Ok(token) => self.runner.load_history(token),
                Err(e) => self.fail_history(e.user_message()),
            },
            DashboardCommand::ClearHistory => match self.session.require_token() {
                Ok(token) => self.runner.clear_history(token),
                Err(e) => self.fail_history(e.user_message()),
            },
            DashboardCommand::SelectHistory(id) => self.select_history(&id),
            DashboardCommand::Logout => self.logout(),
        }
    }

    fn fail_history(&mut self, message: String) {
        self.state.history.loading = false;
        self.state.history.clearing = false;
        self.state.history.error = Some(message);
    }

    fn submit_upload(&mut self, path: &str) {
        let token = match self.session.require_token() {
            Ok(token) => token,
            Err(e) => {
                self.state.recognize.error = Some(e.user_message());
                return;
            }
        };

        let upload = match UploadedImage::open(std::path::Path::new(path)) {
            Ok(upload) => upload,
            Err(e) => {
                self.state.recognize.error = Some(ClientError::from(e).user_message());
                return;
            }
        };

        info!(
            "Submitting {}x{} {} image",
            upload.width(),
            upload.height(),
            upload.mime()
        );

        // Show the image right away; boxes follow when the call resolves
        self.state.recognize.show_image(Some(upload.clone()));
        self.state.recognize.result = None;
        self.overlay.load(&RecognitionResult::default(), true);

        let ticket = self.tracker.begin();
        self.runner
            .recognize(ticket, token, upload, self.config.overlay.coordinate_mode);
    }

    fn select_history(&mut self, id: &str) {
        let Some(selected) = self.history.select(id) else {
            warn!("History entry {} no longer present", id);
            return;
        };

        let image = if selected.thumbnail.is_empty() {
            None
        } else {
            match UploadedImage::from_data_uri(&selected.thumbnail) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Could not decode thumbnail for {}: {}", id, e);
                    None
                }
            }
        };

        self.overlay.load(&selected.result, image.is_some());
        self.state.recognize.show_image(image);
        self.state.recognize.result = Some(selected.result);
        self.state.recognize.error = None;
        self.state.recognize.notice = None;
        self.state.current_view = DashboardView::Recognize;
    }

    /// Sign out: forget the credential and everything derived from it
    fn logout(&mut self) {
        info!("Signing out");
        self.session.clear();
        self.reset_after_logout();
    }

    fn reset_after_logout(&mut self) {
        self.history = HistoryCache::with_capacity(self.config.history.capacity);
        self.tracker.invalidate();
        self.overlay.reset();
        self.state.reset_session_views();

        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!("Failed to forget saved session: {}", e);
            }
        }
    }

    /// Reactive logout on an authorization failure; true when it happened
    fn check_auth<T>(&mut self, outcome: &ClientResult<T>) -> bool {
        if self.session.observe(outcome) {
            self.reset_after_logout();
            self.state.login.error = Some("Session expired, please sign in again".to_string());
            true
        } else {
            false
        }
    }

    /// Whether a reply issued with `token` still belongs to the signed-in session
    fn is_current(&self, token: &str) -> bool {
        self.session.token() == Some(token)
    }

    /// Apply a completed remote call
    pub fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Recognized {
                ticket,
                upload,
                outcome,
            } => {
                if !self.tracker.finish(ticket) {
                    info!("Discarding stale recognition result #{}", ticket.sequence());
                    return;
                }
                if self.check_auth(&outcome) {
                    return;
                }

                match outcome {
                    Ok(result) => {
                        self.history.record_local(upload.data_uri(), result.clone());
                        self.overlay.load(&result, true);
                        self.state.recognize.result = Some(result);
                        self.state.recognize.error = None;
                    }
                    Err(e) => {
                        self.overlay.reset();
                        self.state.recognize.show_image(None);
                        self.state.recognize.error = Some(e.user_message());
                    }
                }
            }
            ApiEvent::HistoryLoaded { token, outcome } => {
                if !self.is_current(&token) {
                    debug!("Ignoring history fetched for a previous session");
                    return;
                }
                self.state.history.loading = false;
                if self.check_auth(&outcome) {
                    return;
                }
                match self.history.apply_remote(outcome) {
                    Ok(_) => self.state.history.error = None,
                    Err(e) => {
                        self.state.history.error =
                            Some(format!("History temporarily unavailable: {}", e.user_message()));
                    }
                }
            }
            ApiEvent::HistoryCleared { token, outcome } => {
                if !self.is_current(&token) {
                    debug!("Ignoring history clear for a previous session");
                    return;
                }
                self.state.history.clearing = false;
                if self.check_auth(&outcome) {
                    return;
                }
                match self.history.apply_clear(outcome) {
                    Ok(()) => {
                        self.state.history.error = None;
                        self.state.history.selected = None;
                    }
                    Err(e) => self.state.history.error = Some(e.user_message()),
                }
            }
            ApiEvent::LoggedIn { username, outcome } => {
                self.state.login.pending = false;
                match outcome {
                    Ok(token) => {
                        info!("Signed in as {}", username);
                        self.persist_session(&token, &username);
                        self.session.establish(token, Some(username));
                        self.state.login.password.clear();
                        self.state.login.error = None;
                        self.state.current_view = DashboardView::Recognize;
                        self.start_session();
                    }
                    Err(e) => self.state.login.error = Some(e.user_message()),
                }
            }
            ApiEvent::PrivilegeProbed { token, outcome } => {
                if !self.is_current(&token) {
                    debug!("Ignoring privilege probe for a previous session");
                    return;
                }
                self.session.apply_probe(outcome);
                if !self.session.is_privileged() && self.state.current_view == DashboardView::Engine {
                    self.state.current_view = DashboardView::Recognize;
                }
            }
        }
    }

    fn persist_session(&self, token: &str, username: &str) {
        if !self.config.general.remember_session {
            return;
        }
        if let Some(store) = &self.store {
            let stored = StoredSession {
                token: token.to_string(),
                username: Some(username.to_string()),
            };
            if let Err(e) = store.save(&stored) {
                warn!("Failed to remember session: {}", e);
            }
        }
    }

    /// Drain every completed call
    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.runner.set_repaint_context(ctx.clone());
            self.theme_applied = true;
        }

        self.process_events();

        if !self.session.is_authenticated() {
            egui::CentralPanel::default().show(ctx, |ui| {
                render_login_view(ui, &mut self.state.login, &mut self.state.command);
            });
        } else {
            egui::SidePanel::left("sidebar")
                .resizable(false)
                .default_width(180.0)
                .show(ctx, |ui| {
                    let views = DashboardView::available(self.session.is_privileged());
                    if render_sidebar(
                        ui,
                        &mut self.state.current_view,
                        views,
                        self.session.display_name(),
                    ) {
                        self.state.command = Some(DashboardCommand::Logout);
                    }
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                egui::Frame::none()
                    .inner_margin(24.0)
                    .show(ui, |ui| match self.state.current_view {
                        DashboardView::Recognize => {
                            render_recognize_view(
                                ui,
                                &mut self.state.recognize,
                                &mut self.overlay,
                                &self.view_options,
                                self.tracker.is_busy(),
                                &mut self.state.command,
                            );
                        }
                        DashboardView::History => {
                            render_history_view(
                                ui,
                                &mut self.state.history,
                                &self.history,
                                &mut self.state.command,
                            );
                        }
                        DashboardView::Engine => {
                            render_engine_view(ui, self.session.engine_config());
                        }
                    });
            });
        }

        if let Some(command) = self.state.command.take() {
            self.handle_command(command);
        }
    }
}

/// Run the dashboard application
pub fn run_dashboard(app: DashboardApp) -> Result<(), eframe::Error> {
    eframe::run_native(
        "OCR Lens",
        DashboardApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeService;
    use crate::api::{EngineConfig, HistoryRecord};
    use crate::recognition::NormalizedBox;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn app_with(store: Option<SessionStore>, restored: Option<StoredSession>) -> DashboardApp {
        let (runner, events) = TaskRunner::with_service(Arc::new(FakeService::default())).unwrap();
        DashboardApp::new(AppConfig::default(), runner, events, store, restored)
    }

    fn signed_in() -> DashboardApp {
        app_with(
            None,
            Some(StoredSession {
                token: "tok".into(),
                username: Some("alice".into()),
            }),
        )
    }

    fn upload() -> UploadedImage {
        let img = image::RgbaImage::new(8, 4);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        UploadedImage::from_bytes(buf).unwrap()
    }

    fn result(text: &str) -> RecognitionResult {
        RecognitionResult::new(text, vec![NormalizedBox::new(text, [0, 0, 500, 500])])
    }

    fn record(id: i64, text: &str) -> HistoryRecord {
        HistoryRecord {
            id,
            user_id: 1,
            text: text.into(),
            created_at: "2024-05-01T10:00:00Z".into(),
        }
    }

    fn recognized(app: &mut DashboardApp, outcome: ClientResult<RecognitionResult>) {
        let ticket = app.tracker.begin();
        app.handle_event(ApiEvent::Recognized {
            ticket,
            upload: upload(),
            outcome,
        });
    }

    #[test]
    fn test_restored_session() {
        let app = signed_in();
        assert_eq!(app.session().token(), Some("tok"));
        assert_eq!(app.session().display_name(), Some("alice"));
        assert!(app.state.history.loading);
    }

    #[test]
    fn test_recognition_recorded_with_thumbnail() {
        let mut app = signed_in();
        recognized(&mut app, Ok(result("hello")));

        assert_eq!(app.history().len(), 1);
        let entry = &app.history().entries()[0];
        assert!(entry.thumbnail.starts_with("data:image/png;base64,"));
        assert_eq!(app.overlay.blocks().len(), 1);
        assert!(!app.tracker.is_busy());
    }

    #[test]
    fn test_stale_recognition_discarded() {
        let mut app = signed_in();
        let first = app.tracker.begin();
        let second = app.tracker.begin();

        app.handle_event(ApiEvent::Recognized {
            ticket: second,
            upload: upload(),
            outcome: Ok(result("new")),
        });
        app.handle_event(ApiEvent::Recognized {
            ticket: first,
            upload: upload(),
            outcome: Ok(result("old")),
        });

        assert_eq!(app.history().len(), 1);
        assert_eq!(app.state.recognize.result, Some(result("new")));
    }

    #[test]
    fn test_auth_failure_forces_logout() {
        let mut app = signed_in();
        app.history.record_local(String::new(), result("kept?"));

        recognized(&mut app, Err(ClientError::Auth("token expired".into())));

        assert!(!app.session().is_authenticated());
        assert!(app.history().is_empty());
        assert!(app.state.login.error.is_some());
    }

    #[test]
    fn test_remote_failure_keeps_session() {
        let mut app = signed_in();
        recognized(
            &mut app,
            Err(ClientError::Remote {
                code: 6,
                message: "daily limit reached".into(),
            }),
        );

        assert!(app.session().is_authenticated());
        assert_eq!(app.state.recognize.error.as_deref(), Some("daily limit reached"));
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_history_failure_is_not_fatal() {
        let mut app = signed_in();
        app.handle_event(ApiEvent::HistoryLoaded {
            token: "tok".into(),
            outcome: Err(ClientError::Transport("offline".into())),
        });

        assert!(!app.state.history.loading);
        assert!(app.state.history.error.is_some());
        assert!(app.session().is_authenticated());
    }

    #[test]
    fn test_history_loaded_then_selected() {
        let mut app = signed_in();
        app.handle_event(ApiEvent::HistoryLoaded {
            token: "tok".into(),
            outcome: Ok(vec![record(7, "from server")]),
        });

        app.handle_command(DashboardCommand::SelectHistory("7".into()));

        assert_eq!(app.state.recognize.result, Some(RecognitionResult::text_only("from server")));
        assert!(!app.overlay.has_image());
        assert!(app.state.recognize.image.is_none());
    }

    #[test]
    fn test_denied_probe_keeps_session() {
        let mut app = signed_in();
        app.handle_event(ApiEvent::PrivilegeProbed {
            token: "tok".into(),
            outcome: Err(ClientError::Auth("admin only".into())),
        });

        assert!(app.session().is_authenticated());
        assert!(!app.session().is_privileged());
    }

    #[test]
    fn test_probe_for_old_token_ignored() {
        let mut app = signed_in();
        app.handle_event(ApiEvent::PrivilegeProbed {
            token: "previous".into(),
            outcome: Ok(EngineConfig::default()),
        });
        assert!(!app.session().is_privileged());

        app.handle_event(ApiEvent::PrivilegeProbed {
            token: "tok".into(),
            outcome: Ok(EngineConfig::default()),
        });
        assert!(app.session().is_privileged());
    }

    #[test]
    fn test_login_persists_and_logout_forgets() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let mut app = app_with(Some(store.clone()), None);

        app.handle_event(ApiEvent::LoggedIn {
            username: "bob".into(),
            outcome: Ok("fresh".into()),
        });
        assert_eq!(app.session().token(), Some("fresh"));
        assert_eq!(store.load().unwrap().username.as_deref(), Some("bob"));

        app.handle_command(DashboardCommand::Logout);
        assert!(!app.session().is_authenticated());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_login_failure_shows_message() {
        let mut app = app_with(None, None);
        app.state.login.pending = true;

        app.handle_event(ApiEvent::LoggedIn {
            username: "bob".into(),
            outcome: Err(ClientError::Auth("wrong password".into())),
        });

        assert!(!app.state.login.pending);
        assert_eq!(app.state.login.error.as_deref(), Some("wrong password"));
        assert!(!app.session().is_authenticated());
    }

    #[test]
    fn test_clear_failure_keeps_entries() {
        let mut app = signed_in();
        app.history.record_local(String::new(), result("a"));
        app.state.history.clearing = true;

        app.handle_event(ApiEvent::HistoryCleared {
            token: "tok".into(),
            outcome: Err(ClientError::Transport("offline".into())),
        });
        assert_eq!(app.history().len(), 1);
        assert!(!app.state.history.clearing);

        app.handle_event(ApiEvent::HistoryCleared {
            token: "tok".into(),
            outcome: Ok(()),
        });
        assert!(app.history().is_empty());
    }

    fn switch_to_bob(app: &mut DashboardApp) {
        app.handle_command(DashboardCommand::Logout);
        app.handle_event(ApiEvent::LoggedIn {
            username: "bob".into(),
            outcome: Ok("bob-token".into()),
        });
        assert_eq!(app.session().token(), Some("bob-token"));
    }

    #[test]
    fn test_previous_user_history_not_shown_to_next_user() {
        let mut app = signed_in();
        switch_to_bob(&mut app);

        app.handle_event(ApiEvent::HistoryLoaded {
            token: "tok".into(),
            outcome: Ok(vec![record(1, "alice private text")]),
        });

        assert!(app.history().is_empty());
        assert!(app.state.history.loading);
    }

    #[test]
    fn test_previous_user_auth_failure_keeps_next_user_signed_in() {
        let mut app = signed_in();
        switch_to_bob(&mut app);

        app.handle_event(ApiEvent::HistoryLoaded {
            token: "tok".into(),
            outcome: Err(ClientError::Auth("token expired".into())),
        });
        app.handle_event(ApiEvent::HistoryCleared {
            token: "tok".into(),
            outcome: Err(ClientError::Auth("token expired".into())),
        });

        assert!(app.session().is_authenticated());
        assert_eq!(app.session().display_name(), Some("bob"));
        assert!(app.state.login.error.is_none());
    }

    #[test]
    fn test_previous_user_clear_leaves_next_user_history() {
        let mut app = signed_in();
        switch_to_bob(&mut app);
        app.history.record_local(String::new(), result("bob's scan"));

        app.handle_event(ApiEvent::HistoryCleared {
            token: "tok".into(),
            outcome: Ok(()),
        });

        assert_eq!(app.history().len(), 1);
    }
}
