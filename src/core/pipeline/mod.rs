//! Submission processing: validate, normalize, dispatch, aggregate.

#![allow(clippy::result_large_err)]

pub mod aggregator;
pub mod analysis;
pub mod dispatcher;
pub mod normalizer;
pub mod validator;

pub use aggregator::aggregate;
pub use dispatcher::WorkflowDispatcher;
pub use normalizer::{normalize, normalize_domain, word_count, Normalizer};
pub use validator::{validate, ValidationError};

use crate::core::config::RelayConfig;
use crate::core::entities::{CanonicalPayload, DispatchOutcome, ProcessingResult};
use crate::core::error::AppError;
use serde_json::Value;

/// Stateless request pipeline. Cheap to clone; holds only startup configuration.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline {
    normalizer: Normalizer,
    dispatcher: WorkflowDispatcher,
}

impl SubmissionPipeline {
    pub fn new(normalizer: Normalizer, dispatcher: WorkflowDispatcher) -> Self {
        Self {
            normalizer,
            dispatcher,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, AppError> {
        Ok(Self::new(
            Normalizer::new(config.analysis),
            WorkflowDispatcher::from_config(&config.webhook)?,
        ))
    }

    pub fn dispatcher(&self) -> &WorkflowDispatcher {
        &self.dispatcher
    }

    /// Validation and normalization only; no network access. CPU-bound for long articles.
    pub fn prepare(&self, raw: &Value) -> Result<CanonicalPayload, ValidationError> {
        let submission = validate(raw)?;
        Ok(self.normalizer.normalize(submission))
    }

    /// Dispatch an already prepared payload and fold the outcome into the result.
    pub async fn deliver(&self, payload: CanonicalPayload) -> ProcessingResult {
        let outcome = self.dispatcher.dispatch(&payload).await;
        log_outcome(&outcome, &payload);
        aggregate(outcome, payload)
    }

    /// Run the whole pipeline. Delivery failures live inside the returned result;
    /// only validation failures are errors.
    pub async fn process(&self, raw: &Value) -> Result<ProcessingResult, ValidationError> {
        let payload = self.prepare(raw)?;
        Ok(self.deliver(payload).await)
    }
}

fn log_outcome(outcome: &DispatchOutcome, payload: &CanonicalPayload) {
    match outcome {
        DispatchOutcome::Delivered { status_code, .. } => tracing::info!(
            "delivered '{}' from {} ({} words) with status {}",
            payload.article_title,
            payload.domain,
            payload.word_count,
            status_code
        ),
        DispatchOutcome::Rejected { status_code, .. } => tracing::warn!(
            "workflow rejected '{}' from {} with status {}",
            payload.article_title,
            payload.domain,
            status_code
        ),
        DispatchOutcome::Unreachable { cause } => {
            tracing::warn!("workflow endpoint unreachable: {}", cause)
        }
        DispatchOutcome::TimedOut => tracing::warn!("workflow endpoint timed out"),
    }
}
