#![allow(clippy::result_large_err)]

use super::{RelayConfig, WebhookConfig};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use reqwest::header::{HeaderName, HeaderValue};
use std::net::SocketAddr;
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the settings needed to run the relay (serve or submit).
    pub fn validate(config: &RelayConfig) -> Result<(), AppError> {
        config.server.bind.parse::<SocketAddr>().map_err(|err| {
            invalid(format!(
                "server.bind '{}' is not a socket address: {}",
                config.server.bind, err
            ))
        })?;

        if config.server.max_body_bytes == 0 {
            return Err(invalid("server.max_body_bytes must be greater than zero"));
        }

        Self::validate_webhook(&config.webhook)?;

        let analysis = &config.analysis;
        if analysis.summary_sentences == 0 || analysis.max_keywords == 0 || analysis.max_phrases == 0
        {
            return Err(invalid(
                "analysis.summary_sentences, analysis.max_keywords and analysis.max_phrases must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Validate the webhook table and return the parsed endpoint.
    pub fn validate_webhook(webhook: &WebhookConfig) -> Result<Url, AppError> {
        let raw = webhook
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                invalid("webhook.url is required (set it in relay.toml or RELAY_WEBHOOK_URL)")
            })?;

        let url = Url::parse(raw)
            .map_err(|err| invalid(format!("webhook.url '{}' is invalid: {}", raw, err)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "webhook.url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if webhook.timeout_ms == 0 {
            return Err(invalid("webhook.timeout_ms must be greater than zero"));
        }

        for (name, value) in &webhook.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| invalid(format!("webhook.headers: invalid header name '{}'", name)))?;
            HeaderValue::from_str(value).map_err(|_| {
                invalid(format!("webhook.headers: invalid value for header '{}'", name))
            })?;
        }

        Ok(url)
    }
}

fn invalid<T: Into<String>>(message: T) -> AppError {
    AppError::new(ErrorCategory::ValidationError, message).with_code("RELAY-CONFIG-400")
}
