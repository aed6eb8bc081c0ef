use std::path::{Path, PathBuf};
use std::time::Duration;

use gtc_session::{Endpoints, ToolPaths, client::DEFAULT_TIMEOUT};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};

const CONFIG_DIR_NAME: &str = "gtcdl";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    pub ffmpeg_path: Option<String>,
    pub ffprobe_path: Option<String>,
    pub endpoints: Endpoints,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            ffmpeg_path: None,
            ffprobe_path: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path` if given (it must exist), otherwise the per-user config
    /// file if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|e| AppError::Config(format!("invalid config {}: {e}", path.display())))
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn timeout(&self, overridden: Option<u64>) -> Duration {
        Duration::from_secs(overridden.unwrap_or(self.timeout_secs))
    }

    pub fn tool_paths(&self) -> ToolPaths {
        ToolPaths::resolve(self.ffmpeg_path.clone(), self.ffprobe_path.clone())
    }
}
