//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::history::DEFAULT_CAPACITY;
use crate::recognition::CoordinateMode;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recognition service connection
    pub server: ServerConfig,
    /// History cache settings
    pub history: HistoryConfig,
    /// Overlay settings
    pub overlay: OverlaySettings,
    /// General settings
    pub general: GeneralConfig,
}

/// Recognition service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// History cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entries kept in memory
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Overlay-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// How out-of-range engine coordinates are handled
    pub coordinate_mode: CoordinateMode,
    /// Show the recognized text next to the hovered box
    pub show_tooltips: bool,
    /// Box fill opacity
    pub opacity: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            coordinate_mode: CoordinateMode::Clamp,
            show_tooltips: true,
            opacity: 0.9,
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Keep the sign-in across restarts
    pub remember_session: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            remember_session: true,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration, falling back to defaults when missing or invalid
pub fn load_or_default(path: &Path) -> AppConfig {
    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return AppConfig::default();
    }

    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config {:?}: {}. Using defaults", path, e);
            AppConfig::default()
        }
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.base_url, "http://localhost:5001");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.overlay.coordinate_mode, CoordinateMode::Clamp);
        assert!(config.overlay.show_tooltips);
        assert!((config.overlay.opacity - 0.9).abs() < 0.01);
        assert!(config.general.remember_session);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.server.base_url = "https://ocr.example.com".to_string();
        config.overlay.coordinate_mode = CoordinateMode::Raw;
        config.history.capacity = 25;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.server.base_url, "https://ocr.example.com");
        assert_eq!(parsed.overlay.coordinate_mode, CoordinateMode::Raw);
        assert_eq!(parsed.history.capacity, 25);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [overlay]
            coordinate_mode = "raw"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.overlay.coordinate_mode, CoordinateMode::Raw);
        assert!(parsed.overlay.show_tooltips);
        assert_eq!(parsed.server.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.general.remember_session = false;
        let temp_file = NamedTempFile::new().unwrap();

        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert!(!loaded.general.remember_session);
        assert_eq!(loaded.server.base_url, config.server.base_url);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());

        let config = load_or_default(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.history.capacity, 10);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        assert!(load_config(temp_file.path()).is_err());
        let config = load_or_default(temp_file.path());
        assert_eq!(config.server.timeout_secs, 30);
    }

    #[test]
    fn test_timeout_never_zero() {
        let server = ServerConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(server.timeout(), Duration::from_secs(1));
    }
}
