// src/config.rs
// =============================================================================
// Runtime configuration, read from a TOML file.
//
// Lookup order:
// 1. --config <FILE> if given (must exist)
// 2. pdf-link-checker.toml in the working directory, if present
// 3. built-in defaults
//
// Command-line flags are applied on top by main.rs.
// =============================================================================

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File looked up in the working directory when no --config is given.
pub const DEFAULT_CONFIG_FILE: &str = "pdf-link-checker.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Number of URLs sent to the verifier per request.
    pub chunk_size: usize,
    /// Timeout for each individual probe (HEAD, and GET on fallback).
    pub probe_timeout_ms: u64,
    /// User-Agent header sent with every probe.
    pub user_agent: String,
    /// Listen address for `serve`.
    pub bind: String,
    /// Remote verifier endpoint; when unset `check` verifies in process.
    pub endpoint: Option<String>,
    /// Largest request body `serve` accepts on the check-links route.
    pub max_body_bytes: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            probe_timeout_ms: 5000,
            user_agent: "PDFLinkChecker/1.0".to_string(),
            bind: "127.0.0.1:3000".to_string(),
            endpoint: None,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl CheckerConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Loads the configuration, see the module header for the lookup order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: CheckerConfig = toml::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }
}
