#![allow(clippy::result_large_err)]

use crate::core::config::{ConfigValidator, WebhookConfig};
use crate::core::entities::{CanonicalPayload, DispatchOutcome};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::error::Error as _;
use std::time::Duration;
use url::Url;

/// Delivers canonical payloads to the workflow webhook, one bounded attempt per call.
///
/// Built once at startup; the inner client is a shared connection pool and nothing
/// else is mutated across dispatches.
#[derive(Debug, Clone)]
pub struct WorkflowDispatcher {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl WorkflowDispatcher {
    /// Build a dispatcher from the validated webhook settings.
    pub fn from_config(config: &WebhookConfig) -> Result<Self, AppError> {
        let endpoint = ConfigValidator::validate_webhook(config)?;
        let headers = default_headers(config)?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| {
                AppError::with_source(
                    ErrorCategory::ConfigError,
                    "failed to build webhook HTTP client",
                    Box::new(err),
                )
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST the payload as JSON and classify what happened. Never retries.
    pub async fn dispatch(&self, payload: &CanonicalPayload) -> DispatchOutcome {
        tracing::debug!(
            "dispatching payload for {} to {} (timeout {} ms)",
            payload.domain,
            self.endpoint,
            self.timeout.as_millis()
        );

        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return classify_transport_error(&err),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => parse_body(&bytes),
            Err(err) => return classify_transport_error(&err),
        };

        if status.is_success() {
            DispatchOutcome::Delivered {
                status_code: status.as_u16(),
                body,
            }
        } else {
            DispatchOutcome::Rejected {
                status_code: status.as_u16(),
                body,
            }
        }
    }
}

fn default_headers(config: &WebhookConfig) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("invalid webhook header name '{}'", name),
            )
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("invalid value for webhook header '{}'", name),
            )
        })?;
        headers.insert(name, value);
    }

    if let Some(token) = config.auth_token.as_deref() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|_| {
            AppError::new(
                ErrorCategory::ConfigError,
                "webhook auth token contains characters not allowed in a header",
            )
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn classify_transport_error(err: &reqwest::Error) -> DispatchOutcome {
    if err.is_timeout() {
        return DispatchOutcome::TimedOut;
    }
    if err.is_connect() {
        tracing::debug!("webhook connection failed: {}", err);
    }
    DispatchOutcome::Unreachable {
        cause: describe(err),
    }
}

/// Error message plus any source messages it does not already include.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// JSON when the body parses, raw text otherwise, `null` when empty.
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
