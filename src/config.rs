use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backend configuration for the integrations API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the integrations backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Session identity configuration.
///
/// The (user, org) pair sent with every backend request. Real deployments
/// set these per-user; the defaults match the local development backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// User identifier.
    pub user: String,
    /// Organization identifier.
    pub org: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "TestUser".to_string(),
            org: "TestOrg".to_string(),
        }
    }
}

/// Authorization popup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Window title for the consent popup.
    pub title: String,
    /// Requested popup width in pixels.
    pub width: u32,
    /// Requested popup height in pixels.
    pub height: u32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            title: "HubSpot Authorization".to_string(),
            width: 600,
            height: 700,
        }
    }
}

/// Behavior configuration for the UI and the connection flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Popup-closure polling interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Idle event polling interval in milliseconds.
    pub idle_poll_ms: u64,
    /// Number of items to scroll with Page Up/Down.
    pub scroll_page_size: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            idle_poll_ms: 50,
            scroll_page_size: 10,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub popup: PopupConfig,
    pub behavior: BehaviorConfig,
}

impl Config {
    /// Returns the default config file path: ~/.config/hublink-cli/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hublink-cli").join("config.toml"))
    }

    /// Load configuration from the default path, falling back to defaults.
    pub fn load() -> Self {
        Self::default_path()
            .and_then(|path| Self::load_from_path(&path).ok())
            .unwrap_or_default()
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::default_path() {
            self.save_to_path(&path)
        } else {
            Err(anyhow::anyhow!("Could not determine config directory"))
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
