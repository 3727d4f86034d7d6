use serde_json::Value;

use super::catalog::QuestionCatalog;
use super::domain::{Answer, CanonicalAnswer, Category};

/// Weight an answer falls back to when its question id matches no catalog
/// entry. Kept for parity with the legacy intake behavior.
const FALLBACK_WEIGHT: f64 = 1.0;

/// Failure normalizing one raw answer value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("answer must be a string, got {found}")]
    NotAString { found: &'static str },
    #[error("invalid answer '{raw}': expected one of yes, no, partial")]
    InvalidValue { raw: String },
    #[error("question id must be a non-empty string")]
    EmptyQuestionId,
    #[error("no answer supplied")]
    MissingValue,
}

/// A per-item failure with the question id it belongs to, so callers can show
/// every offending field at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerItemError {
    pub question_id: String,
    pub error: AnswerError,
}

impl std::fmt::Display for AnswerItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.question_id.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{}: {}", self.question_id, self.error)
        }
    }
}

/// Aggregate failure of a batch normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Every per-item validation failure encountered across the batch.
    Invalid(Vec<AnswerItemError>),
    /// A non-erroring pass produced no answers at all.
    EmptyResult,
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::Invalid(items) => {
                let details = items
                    .iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "{} answer(s) failed validation: {}", items.len(), details)
            }
            NormalizeError::EmptyResult => write!(f, "no valid answers were produced"),
        }
    }
}

impl std::error::Error for NormalizeError {}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reduces a free-form answer string to the canonical three-state enum.
pub fn normalize_str(raw: &str) -> Result<CanonicalAnswer, AnswerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(CanonicalAnswer::Yes),
        "no" => Ok(CanonicalAnswer::No),
        "partial" => Ok(CanonicalAnswer::Partial),
        _ => Err(AnswerError::InvalidValue {
            raw: raw.to_string(),
        }),
    }
}

/// Normalizes a raw JSON answer value. Only strings are accepted; anything
/// else is a type error, null is a missing value.
pub fn normalize(raw: &Value) -> Result<CanonicalAnswer, AnswerError> {
    match raw {
        Value::Null => Err(AnswerError::MissingValue),
        Value::String(text) => normalize_str(text),
        other => Err(AnswerError::NotAString {
            found: json_type_name(other),
        }),
    }
}

/// Boundary conversion for legacy payloads that mixed booleans with the
/// `"partial"` marker string. New surfaces submit strings only.
pub fn normalize_legacy(raw: &Value) -> Result<CanonicalAnswer, AnswerError> {
    match raw {
        Value::Bool(flag) => Ok(CanonicalAnswer::from_flag(*flag)),
        other => normalize(other),
    }
}

/// Validates a whole submission map, stamping each answer with its catalog
/// metadata. Per-item failures are collected and surfaced together.
pub fn normalize_all(
    raw: &serde_json::Map<String, Value>,
    catalog: &QuestionCatalog,
) -> Result<Vec<Answer>, NormalizeError> {
    let mut answers = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();

    for (question_id, value) in raw {
        if question_id.trim().is_empty() {
            errors.push(AnswerItemError {
                question_id: String::new(),
                error: AnswerError::EmptyQuestionId,
            });
            continue;
        }

        let answer = match normalize(value) {
            Ok(answer) => answer,
            Err(error) => {
                errors.push(AnswerItemError {
                    question_id: question_id.clone(),
                    error,
                });
                continue;
            }
        };

        let (category, weight, critical) = match catalog.lookup(question_id) {
            Some(question) => (
                question.category,
                question.weight,
                question.critical.as_ref().map(|violation| violation.grade),
            ),
            None => (Category::Unknown, FALLBACK_WEIGHT, None),
        };

        answers.push(Answer {
            question_id: question_id.clone(),
            answer,
            category,
            weight,
            critical,
        });
    }

    if !errors.is_empty() {
        return Err(NormalizeError::Invalid(errors));
    }

    if answers.is_empty() {
        return Err(NormalizeError::EmptyResult);
    }

    Ok(answers)
}
