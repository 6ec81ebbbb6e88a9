//! Dashboard view state management

use egui::TextureHandle;

use crate::recognition::{RecognitionResult, UploadedImage};

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Recognize,
    History,
    Engine,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Recognize => "Recognize",
            DashboardView::History => "History",
            DashboardView::Engine => "Engine",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Recognize => "R",
            DashboardView::History => "H",
            DashboardView::Engine => "E",
        }
    }

    /// Views offered for the given privilege
    pub fn available(privileged: bool) -> &'static [DashboardView] {
        if privileged {
            &[DashboardView::Recognize, DashboardView::History, DashboardView::Engine]
        } else {
            &[DashboardView::Recognize, DashboardView::History]
        }
    }
}

/// Requests raised by views, handled by the app after rendering
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    Login { username: String, password: String },
    Recognize { path: String },
    ReloadHistory,
    ClearHistory,
    SelectHistory(String),
    Logout,
}

impl DashboardCommand {
    /// Name for logging; never includes credentials
    pub fn name(&self) -> &'static str {
        match self {
            DashboardCommand::Login { .. } => "login",
            DashboardCommand::Recognize { .. } => "recognize",
            DashboardCommand::ReloadHistory => "reload_history",
            DashboardCommand::ClearHistory => "clear_history",
            DashboardCommand::SelectHistory(_) => "select_history",
            DashboardCommand::Logout => "logout",
        }
    }
}

/// Overall dashboard state
#[derive(Default)]
pub struct DashboardState {
    /// Current active view
    pub current_view: DashboardView,
    /// Login form state
    pub login: LoginViewState,
    /// Recognition view state
    pub recognize: RecognizeViewState,
    /// History view state
    pub history: HistoryViewState,
    /// Command raised this frame
    pub command: Option<DashboardCommand>,
}

impl DashboardState {
    /// Forget everything tied to the signed-in user
    pub fn reset_session_views(&mut self) {
        self.current_view = DashboardView::Recognize;
        self.recognize = RecognizeViewState::default();
        self.history = HistoryViewState::default();
        self.login.pending = false;
        self.login.password.clear();
    }
}

/// Login form state
#[derive(Debug, Default)]
pub struct LoginViewState {
    pub username: String,
    pub password: String,
    /// Login call in flight
    pub pending: bool,
    pub error: Option<String>,
}

/// Recognition view state
#[derive(Default)]
pub struct RecognizeViewState {
    /// Path typed into the upload field
    pub file_path: String,
    /// Image currently shown
    pub image: Option<UploadedImage>,
    /// Texture for `image`, rebuilt when `texture_stale` is set
    pub texture: Option<TextureHandle>,
    pub texture_stale: bool,
    /// Result currently shown
    pub result: Option<RecognitionResult>,
    pub error: Option<String>,
    /// Transient confirmation, e.g. after a copy
    pub notice: Option<String>,
}

impl RecognizeViewState {
    /// Replace the displayed image
    pub fn show_image(&mut self, image: Option<UploadedImage>) {
        self.image = image;
        self.texture = None;
        self.texture_stale = self.image.is_some();
    }
}

/// History view state
#[derive(Debug, Default)]
pub struct HistoryViewState {
    /// Fetch in flight
    pub loading: bool,
    /// Clear in flight
    pub clearing: bool,
    /// Waiting for the user to confirm a clear
    pub confirm_clear: bool,
    pub error: Option<String>,
    /// Id of the entry last opened
    pub selected: Option<String>,
}
