use article_relay::core::pipeline::validator::{MAX_ARTICLE_LENGTH, MIN_ARTICLE_LENGTH};
use article_relay::core::pipeline::{validate, ValidationError};
use serde_json::{json, Value};

const ARTICLE: &str = "Artificial intelligence is rapidly transforming industries across the globe. Companies are investing heavily in machine learning.";

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[test]
fn test_accepts_complete_submission() {
    let raw = json!({
        "companyDomain": "example.com",
        "articleTitle": "AI Trends",
        "article": ARTICLE,
    });

    let submission = validate(&raw).unwrap();
    assert_eq!(submission.company_domain(), "example.com");
    assert_eq!(submission.article_title(), "AI Trends");
    assert_eq!(submission.article(), ARTICLE);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let raw = json!({
        "companyDomain": "example.com",
        "articleTitle": "AI Trends",
        "article": ARTICLE,
        "author": "someone",
    });
    assert!(validate(&raw).is_ok());
}

#[test]
fn test_missing_domain_message() {
    let raw = parse(r#"{"articleTitle": "T", "article": ""}"#);
    let err = validate(&raw).unwrap_err();
    assert_eq!(err.to_string(), "Missing required field: companyDomain");
}

#[test]
fn test_whitespace_title_is_missing() {
    let raw = json!({"companyDomain": "example.com", "articleTitle": " \n\t ", "article": ARTICLE});
    let err = validate(&raw).unwrap_err();
    assert_eq!(err.to_string(), "Missing required field: articleTitle");
}

#[test]
fn test_empty_article_message_names_minimum_and_actual() {
    let raw = json!({"companyDomain": "example.com", "articleTitle": "T", "article": ""});
    let err = validate(&raw).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Article too short (minimum 50 characters, got 0)"
    );
}

#[test]
fn test_article_length_boundary() {
    let just_short = "a".repeat(MIN_ARTICLE_LENGTH - 1);
    let raw = json!({"companyDomain": "example.com", "articleTitle": "T", "article": just_short});
    assert_eq!(
        validate(&raw),
        Err(ValidationError::ArticleTooShort {
            min_length: MIN_ARTICLE_LENGTH,
            actual: MIN_ARTICLE_LENGTH - 1,
        })
    );

    let exact = "a".repeat(MIN_ARTICLE_LENGTH);
    let raw = json!({"companyDomain": "example.com", "articleTitle": "T", "article": exact});
    assert!(validate(&raw).is_ok());
}

#[test]
fn test_padding_does_not_count_toward_minimum() {
    let padded = format!("{}{}{}", " ".repeat(40), "a".repeat(20), " ".repeat(40));
    let raw = json!({"companyDomain": "example.com", "articleTitle": "T", "article": padded});
    assert_eq!(
        validate(&raw),
        Err(ValidationError::ArticleTooShort {
            min_length: MIN_ARTICLE_LENGTH,
            actual: 20,
        })
    );
}

#[test]
fn test_oversized_article_is_rejected() {
    let huge = "a".repeat(MAX_ARTICLE_LENGTH + 1);
    let raw = json!({"companyDomain": "example.com", "articleTitle": "T", "article": huge});
    let err = validate(&raw).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::FieldTooLong {
            field: "article",
            ..
        }
    ));
}

#[test]
fn test_non_object_payloads() {
    for body in ["[]", "\"text\"", "42", "null", "true"] {
        assert_eq!(
            validate(&parse(body)),
            Err(ValidationError::NotAnObject),
            "body {}",
            body
        );
    }
}

#[test]
fn test_non_string_field_message() {
    let raw = json!({"companyDomain": "example.com", "articleTitle": ["T"], "article": ARTICLE});
    let err = validate(&raw).unwrap_err();
    assert_eq!(err.to_string(), "Invalid field articleTitle: expected a string");
}

#[test]
fn test_first_failing_rule_wins() {
    // Everything is wrong; the domain rule is checked first.
    let raw = json!({"article": 7});
    assert_eq!(
        validate(&raw),
        Err(ValidationError::MissingField("companyDomain"))
    );
}
