//! Dashboard views

pub mod engine;
pub mod history;
pub mod login;
pub mod recognize;

pub use engine::render_engine_view;
pub use history::render_history_view;
pub use login::render_login_view;
pub use recognize::render_recognize_view;
