#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::FileConfig;

pub const DEFAULT_DOMAINS_FILE: &str = "domain.txt";
pub const DEFAULT_CLIENT_SECRET: &str = "client_secret.json";
pub const DEFAULT_TOKEN_STORE: &str = "token.json";
pub const DEFAULT_TOKENS_DIR: &str = "tokens";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";

/// OAuth scopes the stored credential has to cover.
pub const REQUIRED_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/webmasters",
    "https://www.googleapis.com/auth/siteverification",
];

/// Fully resolved settings handed to pre-flight and the verifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub domains_file: PathBuf,
    pub client_secret: PathBuf,
    pub token_store: PathBuf,
    pub tokens_dir: PathBuf,
    pub probe_timeout: Duration,
    pub api_base_url: String,
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            domains_file: PathBuf::from(DEFAULT_DOMAINS_FILE),
            client_secret: PathBuf::from(DEFAULT_CLIENT_SECRET),
            token_store: PathBuf::from(DEFAULT_TOKEN_STORE),
            tokens_dir: PathBuf::from(DEFAULT_TOKENS_DIR),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Defaults overlaid with whatever the TOML file sets.
    pub fn from_file_config(file: &FileConfig) -> Self {
        let mut config = Self::default();
        if let Some(paths) = &file.paths {
            if let Some(p) = &paths.domains {
                config.domains_file = PathBuf::from(p);
            }
            if let Some(p) = &paths.client_secret {
                config.client_secret = PathBuf::from(p);
            }
            if let Some(p) = &paths.token_store {
                config.token_store = PathBuf::from(p);
            }
            if let Some(p) = &paths.tokens_dir {
                config.tokens_dir = PathBuf::from(p);
            }
        }
        if let Some(secs) = file.probe.as_ref().and_then(|p| p.timeout_seconds) {
            config.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(base) = file.api.as_ref().and_then(|a| a.base_url.clone()) {
            config.api_base_url = base;
        }
        config
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("paths.domains", &self.domains_file.to_string_lossy())?;
        validate_path("paths.client_secret", &self.client_secret.to_string_lossy())?;
        validate_path("paths.token_store", &self.token_store.to_string_lossy())?;
        validate_path("paths.tokens_dir", &self.tokens_dir.to_string_lossy())?;
        validate_range("probe.timeout_seconds", self.probe_timeout.as_secs(), 1, 300)?;
        validate_url("api.base_url", &self.api_base_url)?;
        Ok(())
    }
}
