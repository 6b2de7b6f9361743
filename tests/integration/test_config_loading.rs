use article_relay::core::config::{ConfigLoader, ConfigValidator};
use article_relay::core::ErrorCategory;
use article_relay::logging::ConsoleOutput;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const RELAY_ENV: &[&str] = &[
    "RELAY_BIND",
    "RELAY_MAX_BODY_BYTES",
    "RELAY_WEBHOOK_URL",
    "RELAY_WEBHOOK_TIMEOUT_MS",
    "RELAY_WEBHOOK_AUTH_TOKEN",
];

fn clear_relay_env() {
    for var in RELAY_ENV {
        env::remove_var(var);
    }
}

const FULL_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:8080"
max_body_bytes = 4096

[webhook]
url = "https://hooks.example.com/articles"
timeout_ms = 1500
auth_token = "from-file"

[webhook.headers]
X-Relay-Source = "article-relay"

[analysis]
summary_sentences = 2
max_keywords = 5
max_phrases = 3

[logging]
default_level = "debug"
enable_file = false
console_output = "none"
"#;

#[test]
#[serial]
fn test_config_file_is_loaded() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");
    fs::write(&config_path, FULL_CONFIG).unwrap();

    let config = ConfigLoader::load(Some(config_path.as_path())).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.server.max_body_bytes, 4096);
    assert_eq!(
        config.webhook.url.as_deref(),
        Some("https://hooks.example.com/articles")
    );
    assert_eq!(config.webhook.timeout_ms, 1500);
    assert_eq!(config.webhook.auth_token.as_deref(), Some("from-file"));
    assert_eq!(
        config.webhook.headers.get("X-Relay-Source").map(String::as_str),
        Some("article-relay")
    );
    assert_eq!(config.analysis.summary_sentences, 2);
    assert_eq!(config.analysis.max_keywords, 5);
    assert_eq!(config.analysis.max_phrases, 3);
    assert_eq!(config.logging.default_level.as_deref(), Some("debug"));
    assert_eq!(config.logging.enable_file, Some(false));
    assert_eq!(config.logging.console_output, Some(ConsoleOutput::None));
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
#[serial]
fn test_partial_config_keeps_defaults() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");
    fs::write(
        &config_path,
        "[webhook]\nurl = \"http://localhost:9000/hook\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load(Some(config_path.as_path())).unwrap();

    assert_eq!(config.server.bind, "127.0.0.1:5000");
    assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
    assert_eq!(config.webhook.timeout_ms, 30_000);
    assert_eq!(config.analysis.summary_sentences, 3);
    assert_eq!(config.analysis.max_keywords, 15);
    assert_eq!(config.analysis.max_phrases, 8);
    assert!(config.webhook.headers.is_empty());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");
    fs::write(&config_path, FULL_CONFIG).unwrap();

    env::set_var("RELAY_BIND", "127.0.0.1:7000");
    env::set_var("RELAY_MAX_BODY_BYTES", "8192");
    env::set_var("RELAY_WEBHOOK_URL", "http://override.example.com/hook");
    env::set_var("RELAY_WEBHOOK_TIMEOUT_MS", "250");
    env::set_var("RELAY_WEBHOOK_AUTH_TOKEN", "from-env");

    let config = ConfigLoader::load(Some(config_path.as_path())).unwrap();
    clear_relay_env();

    assert_eq!(config.server.bind, "127.0.0.1:7000");
    assert_eq!(config.server.max_body_bytes, 8192);
    assert_eq!(
        config.webhook.url.as_deref(),
        Some("http://override.example.com/hook")
    );
    assert_eq!(config.webhook.timeout_ms, 250);
    assert_eq!(config.webhook.auth_token.as_deref(), Some("from-env"));
}

#[test]
#[serial]
fn test_unparseable_environment_values_are_ignored() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");
    fs::write(&config_path, FULL_CONFIG).unwrap();

    env::set_var("RELAY_WEBHOOK_TIMEOUT_MS", "soon");
    env::set_var("RELAY_MAX_BODY_BYTES", "-1");

    let (config, warnings) = ConfigLoader::load_with_warnings(Some(config_path.as_path())).unwrap();
    clear_relay_env();

    assert_eq!(config.webhook.timeout_ms, 1500);
    assert_eq!(config.server.max_body_bytes, 4096);
    assert_eq!(warnings.len(), 2);
    assert!(warnings
        .iter()
        .any(|w| w.starts_with("ignoring RELAY_WEBHOOK_TIMEOUT_MS=soon")));
    assert!(warnings
        .iter()
        .any(|w| w.starts_with("ignoring RELAY_MAX_BODY_BYTES=-1")));
}

#[test]
#[serial]
fn test_explicit_missing_file_is_an_error() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load(Some(temp_dir.path().join("absent.toml").as_path())).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigError);
}

#[test]
#[serial]
fn test_validator_requires_webhook_url() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");
    fs::write(&config_path, "[server]\nbind = \"127.0.0.1:5000\"\n").unwrap();

    let config = ConfigLoader::load(Some(config_path.as_path())).unwrap();
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
    assert!(err.message.contains("webhook.url is required"));
}

#[test]
#[serial]
fn test_validator_rejects_bad_values() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");

    for (body, needle) in [
        (
            "[server]\nbind = \"not-an-address\"\n[webhook]\nurl = \"http://localhost/hook\"\n",
            "server.bind",
        ),
        (
            "[webhook]\nurl = \"http://localhost/hook\"\ntimeout_ms = 0\n",
            "webhook.timeout_ms",
        ),
        (
            "[webhook]\nurl = \"http://localhost/hook\"\n[analysis]\nmax_keywords = 0\n",
            "analysis",
        ),
        (
            "[webhook]\nurl = \"http://localhost/hook\"\n[webhook.headers]\n\"bad header\" = \"x\"\n",
            "invalid header name",
        ),
    ] {
        fs::write(&config_path, body).unwrap();
        let config = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(
            err.message.contains(needle),
            "expected '{}' in '{}'",
            needle,
            err.message
        );
    }
}

#[test]
#[serial]
fn test_clean_environment_produces_no_warnings() {
    clear_relay_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("relay.toml");
    fs::write(&config_path, FULL_CONFIG).unwrap();

    let (_, warnings) = ConfigLoader::load_with_warnings(Some(config_path.as_path())).unwrap();
    assert!(warnings.is_empty());
}
