#![allow(clippy::result_large_err)]

use super::RelayConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "relay.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config with precedence: defaults, config file, environment.
    ///
    /// An explicitly requested file must exist; the implicit `relay.toml` is optional.
    /// Ignored environment values are logged as warnings.
    pub fn load(explicit_path: Option<&Path>) -> Result<RelayConfig, AppError> {
        let (config, warnings) = Self::load_with_warnings(explicit_path)?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(config)
    }

    /// Same as [`ConfigLoader::load`], but hands ignored environment values back to the caller
    /// for use before a tracing subscriber exists.
    pub fn load_with_warnings(
        explicit_path: Option<&Path>,
    ) -> Result<(RelayConfig, Vec<String>), AppError> {
        let config_file = match explicit_path {
            Some(path) => Some(Self::load_from_file(path)?.ok_or_else(|| {
                AppError::new(
                    ErrorCategory::ConfigError,
                    format!("Config file {} does not exist", path.display()),
                )
            })?),
            None => Self::load_from_file(&Self::default_path())?,
        };

        let mut config = config_file.unwrap_or_default();

        // Apply environment variable overrides
        let warnings = Self::apply_env_overrides(&mut config);

        Ok((config, warnings))
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<RelayConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: RelayConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    fn default_path() -> PathBuf {
        env::current_dir()
            .map(|cwd| cwd.join(DEFAULT_CONFIG_FILE))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut RelayConfig) -> Vec<String> {
        let mut warnings = Vec::new();
        // Server overrides
        if let Ok(bind) = env::var("RELAY_BIND") {
            config.server.bind = bind;
        }

        if let Ok(max_body_str) = env::var("RELAY_MAX_BODY_BYTES") {
            match max_body_str.parse::<usize>() {
                Ok(max_body_bytes) => config.server.max_body_bytes = max_body_bytes,
                Err(_) => warnings.push(format!(
                    "ignoring RELAY_MAX_BODY_BYTES={}: not a byte count",
                    max_body_str
                )),
            }
        }

        // Webhook overrides
        if let Ok(url) = env::var("RELAY_WEBHOOK_URL") {
            if !url.trim().is_empty() {
                config.webhook.url = Some(url);
            }
        }

        if let Ok(timeout_str) = env::var("RELAY_WEBHOOK_TIMEOUT_MS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout_ms) => config.webhook.timeout_ms = timeout_ms,
                Err(_) => warnings.push(format!(
                    "ignoring RELAY_WEBHOOK_TIMEOUT_MS={}: not a number of milliseconds",
                    timeout_str
                )),
            }
        }

        if let Ok(token) = env::var("RELAY_WEBHOOK_AUTH_TOKEN") {
            if !token.trim().is_empty() {
                config.webhook.auth_token = Some(token);
            }
        }

        warnings
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "RELAY_BIND - Override the listener address (default: 127.0.0.1:5000)",
            "RELAY_MAX_BODY_BYTES - Override the request body limit (default: 2097152)",
            "RELAY_WEBHOOK_URL - Override the workflow webhook URL",
            "RELAY_WEBHOOK_TIMEOUT_MS - Override the dispatch timeout (default: 30000)",
            "RELAY_WEBHOOK_AUTH_TOKEN - Bearer token sent to the workflow webhook",
        ]
    }
}
