//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default so the app starts with zero
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use mauria_sync::BootstrapConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the store database.
    /// Env: `MAURIA_DATA_DIR`
    /// Default: platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Whether the beta (preprod) mode is announced to the host after
    /// bootstrap.
    /// Env: `MAURIA_BETA` (true/false)
    /// Default: `false`
    pub beta: bool,

    /// Preprod URL sent with the beta announcement.
    /// Env: `MAURIA_PREPROD_URL`
    pub preprod_url: String,

    /// Handshake timing.  Only the global timeout is exposed through the
    /// environment (`MAURIA_BOOTSTRAP_TIMEOUT_MS`), for development against
    /// slow hosts.
    pub bootstrap: BootstrapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            beta: false,
            preprod_url: "https://preprod.mauria.app".to_string(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("MAURIA_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(beta) = std::env::var("MAURIA_BETA") {
            match beta.parse::<bool>() {
                Ok(flag) => config.beta = flag,
                Err(_) => {
                    tracing::warn!(value = %beta, "Invalid MAURIA_BETA, using default");
                }
            }
        }

        if let Ok(url) = std::env::var("MAURIA_PREPROD_URL") {
            config.preprod_url = url;
        }

        if let Ok(timeout) = std::env::var("MAURIA_BOOTSTRAP_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => config.bootstrap.global_timeout = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(
                        value = %timeout,
                        "Invalid MAURIA_BOOTSTRAP_TIMEOUT_MS, using default"
                    );
                }
            }
        }

        config
    }
}
