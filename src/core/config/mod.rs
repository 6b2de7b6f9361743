use crate::logging::layers::console::ConsoleOutput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Relay configuration loaded from relay.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    /// Inbound HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Downstream workflow webhook
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Text analysis limits applied during normalization
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging sinks
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Inbound server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Downstream webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Workflow endpoint receiving the canonical payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Upper bound for the whole outbound request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sent as `Authorization: Bearer <token>` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Extra headers sent with every dispatch
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Text analysis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    #[serde(default = "default_max_phrases")]
    pub max_phrases: usize,
}

/// Raw `[logging]` table; resolved by `logging::config::LoggingConfig`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_file: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_output: Option<ConsoleOutput>,
}

// Default functions
fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_summary_sentences() -> usize {
    3
}

fn default_max_keywords() -> usize {
    15
}

fn default_max_phrases() -> usize {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        WebhookConfig {
            url: None,
            timeout_ms: default_timeout_ms(),
            auth_token: None,
            headers: BTreeMap::new(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            summary_sentences: default_summary_sentences(),
            max_keywords: default_max_keywords(),
            max_phrases: default_max_phrases(),
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
