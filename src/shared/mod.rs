//! Messaging between background requests and the dashboard
//!
//! Remote calls complete on the runtime and are handed back to the UI thread
//! as owned results; only the UI thread mutates session and history state.

pub mod messages;

pub use messages::ApiEvent;
