//! OCR Lens - desktop client for a remote text recognition service
//!
//! Upload an image, see every recognized text box drawn over it, hover to
//! read and click to copy. Recent recognitions are kept in a short history.

mod api;
mod app;
mod config;
mod dashboard;
mod error;
mod history;
mod overlay;
mod recognition;
mod session;
mod shared;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::TaskRunner;
use crate::config::AppConfig;
use crate::dashboard::DashboardApp;
use crate::session::SessionStore;

/// OCR Lens - text recognition client
#[derive(Parser, Debug)]
#[command(name = "ocr-lens")]
#[command(about = "Recognize text in images and copy it with a click")]
struct Args {
    /// Recognition service URL (overrides the config file)
    #[arg(short, long)]
    server: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Forget the saved sign-in before starting
    #[arg(long)]
    logout: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG takes precedence
    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("OCR Lens starting...");

    let mut config = load_config(args.config.as_deref());
    if let Some(server) = args.server {
        config.server.base_url = server;
    }
    info!("Using recognition service at {}", config.server.base_url);

    let store = match SessionStore::in_data_dir() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Session will not be remembered: {}", e);
            None
        }
    };

    if args.logout {
        if let Some(store) = &store {
            store.clear().context("Failed to forget saved session")?;
            info!("Saved session removed");
        }
    }

    let restored = if config.general.remember_session {
        store.as_ref().and_then(SessionStore::load)
    } else {
        None
    };

    let (runner, events) = TaskRunner::from_config(&config)?;
    let app = DashboardApp::new(config, runner, events, store, restored);

    if let Err(e) = dashboard::run_dashboard(app) {
        tracing::error!("Dashboard error: {}", e);
    }

    info!("OCR Lens shutdown complete");

    Ok(())
}

/// Load configuration from the given file, or the platform default location
fn load_config(path: Option<&std::path::Path>) -> AppConfig {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match storage::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("No config directory: {}. Using defaults", e);
                return AppConfig::default();
            }
        },
    };

    let config = config::load_or_default(&path);
    info!("Configuration from {:?}", path);
    config
}
