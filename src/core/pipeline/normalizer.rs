use crate::core::config::AnalysisConfig;
use crate::core::entities::{ArticleSubmission, CanonicalPayload};
use crate::core::pipeline::analysis;
use chrono::Utc;

/// Turns validated submissions into canonical payloads.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    limits: AnalysisConfig,
}

impl Normalizer {
    pub fn new(limits: AnalysisConfig) -> Self {
        Self { limits }
    }

    /// Derive metadata and analysis. Only the timestamp depends on the clock.
    pub fn normalize(&self, submission: ArticleSubmission) -> CanonicalPayload {
        let article = submission.article();
        let text = analysis::analyze(article, &self.limits);

        CanonicalPayload {
            domain: normalize_domain(submission.company_domain()),
            word_count: word_count(article),
            char_count: article.chars().count(),
            processed_at: Utc::now(),
            summary: text.summary,
            keywords: text.keywords,
            phrases: text.phrases,
            company_domain: submission.company_domain().to_string(),
            article_title: submission.article_title().to_string(),
            article: article.to_string(),
        }
    }
}

/// Normalize with the default analysis limits.
pub fn normalize(submission: ArticleSubmission) -> CanonicalPayload {
    Normalizer::default().normalize(submission)
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reduce a user-entered domain or URL to a bare, lower-cased host.
///
/// Idempotent: the output has no scheme, no path/query/fragment, no `www.` prefix and no
/// surrounding whitespace, so a second pass finds nothing to strip.
pub fn normalize_domain(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut host = lowered.trim();

    for scheme in ["https://", "http://"] {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest;
            break;
        }
    }

    if let Some(end) = host.find(&['/', '?', '#'][..]) {
        host = &host[..end];
    }

    loop {
        host = host.trim();
        match host.strip_prefix("www.") {
            Some(rest) => host = rest,
            None => break,
        }
    }

    host.to_string()
}
