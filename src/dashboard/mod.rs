//! Dashboard UI Module
//!
//! The interactive client: sign-in, upload and recognition with the box
//! overlay, recognition history, and the engine panel for administrators.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::{run_dashboard, DashboardApp};
