//! Model-output validation: parse, repair, and check the review JSON.
//!
//! The model is not adversarial but may be sloppy about exact formatting
//! (prose around the JSON, markdown fences). Parsing is a two-attempt
//! contract: strict parse first, then extract the largest `{...}` span and
//! retry, then fail with a typed error carrying the raw text. After parsing,
//! scores and comment shapes are validated; this is a repair step, not a
//! security boundary.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{EvaluationError, PrResult};
use crate::review::types::{PrReview, ReviewComment};

lazy_static! {
    /// Largest `{...}` span in the text (DOTALL: spans newlines).
    static ref JSON_SPAN: Regex = Regex::new(r"(?s)\{.*\}").expect("valid regex");
}

/// Loosely-typed mirror of the review shape; range checks happen after
/// deserialization so that an out-of-range score reports as a schema
/// violation instead of a serde error.
#[derive(Debug, Deserialize)]
struct RawReview {
    summary: String,
    creativity_score: i64,
    efficiency_score: i64,
    edge_case_handling_score: i64,
    #[serde(default)]
    review_comments: Vec<RawComment>,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    path: String,
    line: i64,
    body: String,
}

/// Parses the model's textual output into a validated [`PrReview`].
///
/// # Errors
/// - [`EvaluationError::UnparsableModelOutput`] when no JSON object can be
///   recovered from the text.
/// - [`EvaluationError::SchemaViolation`] when the JSON parses but a score is
///   outside 0..=10 or a comment is malformed.
pub fn parse_review_response(raw: &str) -> PrResult<PrReview> {
    let parsed: RawReview = match serde_json::from_str(raw.trim()) {
        Ok(v) => v,
        Err(_) => {
            // The model sometimes wraps the object in prose or code fences;
            // retry on the widest brace-delimited span.
            let span = JSON_SPAN
                .find(raw)
                .ok_or_else(|| EvaluationError::UnparsableModelOutput {
                    raw: raw.to_string(),
                })?;
            serde_json::from_str(span.as_str()).map_err(|_| {
                EvaluationError::UnparsableModelOutput {
                    raw: raw.to_string(),
                }
            })?
        }
    };

    let review = PrReview {
        summary: parsed.summary,
        creativity_score: validate_score("creativity_score", parsed.creativity_score)?,
        efficiency_score: validate_score("efficiency_score", parsed.efficiency_score)?,
        edge_case_handling_score: validate_score(
            "edge_case_handling_score",
            parsed.edge_case_handling_score,
        )?,
        review_comments: parsed
            .review_comments
            .into_iter()
            .map(validate_comment)
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(review)
}

fn validate_score(field: &'static str, value: i64) -> Result<u8, EvaluationError> {
    if (0..=10).contains(&value) {
        Ok(value as u8)
    } else {
        Err(EvaluationError::SchemaViolation {
            field,
            detail: format!("expected an integer in 0..=10, got {value}"),
        })
    }
}

fn validate_comment(raw: RawComment) -> Result<ReviewComment, EvaluationError> {
    if raw.path.trim().is_empty() {
        return Err(EvaluationError::SchemaViolation {
            field: "review_comments.path",
            detail: "path must not be empty".into(),
        });
    }
    if raw.line < 1 || raw.line > u32::MAX as i64 {
        return Err(EvaluationError::SchemaViolation {
            field: "review_comments.line",
            detail: format!("expected a positive line number, got {}", raw.line),
        });
    }
    Ok(ReviewComment {
        path: raw.path,
        line: raw.line as u32,
        body: raw.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    const VALID: &str = r#"{
        "summary": "Adds input validation to the parser.",
        "creativity_score": 7,
        "efficiency_score": 8,
        "edge_case_handling_score": 6,
        "review_comments": [
            {"path": "src/parse.rs", "line": 12, "body": "Consider bounds-checking here."}
        ]
    }"#;

    #[test]
    fn parses_strict_json() {
        let review = parse_review_response(VALID).unwrap();
        assert_eq!(review.creativity_score, 7);
        assert_eq!(review.review_comments.len(), 1);
        assert_eq!(review.review_comments[0].line, 12);
    }

    #[test]
    fn repairs_json_wrapped_in_prose() {
        let wrapped = format!("Here is my evaluation:\n\n{VALID}\n\nLet me know!");
        let review = parse_review_response(&wrapped).unwrap();
        assert_eq!(review.efficiency_score, 8);
    }

    #[test]
    fn repairs_json_in_code_fence() {
        let fenced = format!("```json\n{VALID}\n```");
        let review = parse_review_response(&fenced).unwrap();
        assert_eq!(review.edge_case_handling_score, 6);
    }

    #[test]
    fn unparsable_output_carries_raw_text() {
        let err = parse_review_response("I could not evaluate this PR.").unwrap_err();
        match err {
            Error::Evaluation(EvaluationError::UnparsableModelOutput { raw }) => {
                assert!(raw.contains("could not evaluate"));
            }
            other => panic!("expected UnparsableModelOutput, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_score_is_schema_violation() {
        let bad = r#"{"summary": "s", "creativity_score": 11, "efficiency_score": 8, "edge_case_handling_score": 6}"#;
        let err = parse_review_response(bad).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation(EvaluationError::SchemaViolation {
                field: "creativity_score",
                ..
            })
        ));
    }

    #[test]
    fn negative_score_is_schema_violation() {
        let bad = r#"{"summary": "s", "creativity_score": 5, "efficiency_score": -1, "edge_case_handling_score": 6}"#;
        let err = parse_review_response(bad).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation(EvaluationError::SchemaViolation {
                field: "efficiency_score",
                ..
            })
        ));
    }

    #[test]
    fn zero_line_comment_is_schema_violation() {
        let bad = r#"{
            "summary": "s", "creativity_score": 5, "efficiency_score": 5,
            "edge_case_handling_score": 5,
            "review_comments": [{"path": "a.rs", "line": 0, "body": "b"}]
        }"#;
        let err = parse_review_response(bad).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation(EvaluationError::SchemaViolation {
                field: "review_comments.line",
                ..
            })
        ));
    }

    #[test]
    fn missing_comments_defaults_to_empty() {
        let minimal = r#"{"summary": "s", "creativity_score": 1, "efficiency_score": 2, "edge_case_handling_score": 3}"#;
        let review = parse_review_response(minimal).unwrap();
        assert!(review.review_comments.is_empty());
    }
}
