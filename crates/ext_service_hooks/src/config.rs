//! Runtime settings for the service hooks, loaded from TOML.
//!
//! ```toml
//! snapshot_timeout_ms = 5000   # 0 waits for the owning context indefinitely
//! log_filter = "ext_service_hooks=debug"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HooksError, Result};

pub const DEFAULT_SNAPSHOT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Upper bound on waiting for a view snapshot; `0` disables the bound
    pub snapshot_timeout_ms: u64,
    /// `tracing` filter directive used when no env override is set
    pub log_filter: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            snapshot_timeout_ms: DEFAULT_SNAPSHOT_TIMEOUT_MS,
            log_filter: "info".to_string(),
        }
    }
}

impl HooksConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| HooksError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| HooksError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn snapshot_timeout(&self) -> Option<Duration> {
        (self.snapshot_timeout_ms > 0).then(|| Duration::from_millis(self.snapshot_timeout_ms))
    }
}
