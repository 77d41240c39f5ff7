use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "SAFEMATE_CONFIG";

/// Runtime settings. Every key is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed delay before a finished form is handed to the submission sink.
    pub submission_delay_ms: u64,
    /// Fixed delay applied to every simulated auth call.
    pub auth_latency_ms: u64,
    pub min_password_length: usize,
    pub otp_length: usize,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submission_delay_ms: 1500,
            auth_latency_ms: 1000,
            min_password_length: 8,
            otp_length: 6,
            log_filter: "safemate=info".into(),
            color: true,
        }
    }
}

impl AppConfig {
    /// Loads `path`, else the file named by `SAFEMATE_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        match resolved {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = Self::from_yaml(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    /// Defaults with every simulated delay removed.
    pub fn for_tests() -> Self {
        Self {
            submission_delay_ms: 0,
            auth_latency_ms: 0,
            color: false,
            ..Self::default()
        }
    }
}
