use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A submission that passed validation. Fields are stored trimmed.
///
/// Only the validator constructs these, so holding one proves the input rules were met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSubmission {
    company_domain: String,
    article_title: String,
    article: String,
}

impl ArticleSubmission {
    pub(crate) fn new(company_domain: &str, article_title: &str, article: &str) -> Self {
        Self {
            company_domain: company_domain.to_string(),
            article_title: article_title.to_string(),
            article: article.to_string(),
        }
    }

    pub fn company_domain(&self) -> &str {
        &self.company_domain
    }

    pub fn article_title(&self) -> &str {
        &self.article_title
    }

    pub fn article(&self) -> &str {
        &self.article
    }
}

/// Normalized, enriched form of a submission sent to the workflow endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPayload {
    pub company_domain: String,
    pub article_title: String,
    pub article: String,
    pub domain: String,
    pub word_count: usize,
    pub char_count: usize,
    pub processed_at: DateTime<Utc>,
    pub summary: String,
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
}

/// Classified result of the single dispatch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Delivered { status_code: u16, body: Value },
    Rejected { status_code: u16, body: Value },
    Unreachable { cause: String },
    TimedOut,
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered { .. })
    }
}

/// Response returned to the caller for every submission that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub success: bool,
    pub message: String,
    pub processed_data: CanonicalPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downstream_response: Option<Value>,
}
