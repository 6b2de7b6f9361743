//! Boundary validation: loosely-typed client JSON in, [`ArticleSubmission`] out.

use crate::core::entities::ArticleSubmission;
use serde_json::{Map, Value};
use thiserror::Error;

pub const MIN_ARTICLE_LENGTH: usize = 50;
pub const MAX_DOMAIN_LENGTH: usize = 255;
pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_ARTICLE_LENGTH: usize = 1_000_000;

pub const FIELD_COMPANY_DOMAIN: &str = "companyDomain";
pub const FIELD_ARTICLE_TITLE: &str = "articleTitle";
pub const FIELD_ARTICLE: &str = "article";

/// Client-caused rejection of a submission. Lengths count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid data format: expected a JSON object")]
    NotAnObject,
    #[error("Invalid field {0}: expected a string")]
    InvalidFieldType(&'static str),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Article too short (minimum {min_length} characters, got {actual})")]
    ArticleTooShort { min_length: usize, actual: usize },
    #[error("Field {field} too long (maximum {max_length} characters, got {actual})")]
    FieldTooLong {
        field: &'static str,
        max_length: usize,
        actual: usize,
    },
}

/// Check a raw submission; the first failing rule wins.
pub fn validate(raw: &Value) -> Result<ArticleSubmission, ValidationError> {
    let fields = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let company_domain = text_field(fields, FIELD_COMPANY_DOMAIN)?
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingField(FIELD_COMPANY_DOMAIN))?;

    let article_title = text_field(fields, FIELD_ARTICLE_TITLE)?
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingField(FIELD_ARTICLE_TITLE))?;

    let article = text_field(fields, FIELD_ARTICLE)?.unwrap_or_default();
    let article_length = article.chars().count();
    if article_length < MIN_ARTICLE_LENGTH {
        return Err(ValidationError::ArticleTooShort {
            min_length: MIN_ARTICLE_LENGTH,
            actual: article_length,
        });
    }

    check_max_length(FIELD_COMPANY_DOMAIN, company_domain, MAX_DOMAIN_LENGTH)?;
    check_max_length(FIELD_ARTICLE_TITLE, article_title, MAX_TITLE_LENGTH)?;
    check_max_length(FIELD_ARTICLE, article, MAX_ARTICLE_LENGTH)?;

    Ok(ArticleSubmission::new(
        company_domain,
        article_title,
        article,
    ))
}

/// Trimmed string value of `name`; `null` counts as absent.
fn text_field<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<Option<&'a str>, ValidationError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.trim())),
        Some(_) => Err(ValidationError::InvalidFieldType(name)),
    }
}

fn check_max_length(
    field: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max_length {
        return Err(ValidationError::FieldTooLong {
            field,
            max_length,
            actual,
        });
    }
    Ok(())
}
