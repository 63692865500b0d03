//! Answer parsing and validation

use super::definition::{Question, QuestionKind};
use serde_json::Value;

/// Accepted positive boolean responses (matched case-sensitively)
pub const POSITIVE: &[&str] = &["yes", "y", "1", "true", "t"];

/// Accepted negative boolean responses (matched case-sensitively)
pub const NEGATIVE: &[&str] = &["no", "n", "0", "false", "f"];

/// A typed, validated answer to a single question
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Flag(bool),
    Text(String),
}

impl Answer {
    /// An answer is positive when it is `true` or a non-empty string;
    /// positive answers trigger dependents and actions.
    pub fn is_positive(&self) -> bool {
        match self {
            Answer::Flag(flag) => *flag,
            Answer::Text(text) => !text.is_empty(),
        }
    }

    /// JSON form used when the answer itself is written by an action
    pub fn to_value(&self) -> Value {
        match self {
            Answer::Flag(flag) => Value::Bool(*flag),
            Answer::Text(text) => Value::String(text.clone()),
        }
    }
}

/// Outcome of validating one raw response
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(Answer),
    /// Rejected; the message tells the user what is accepted
    Invalid(String),
}

/// Validate a raw response against the question definition
///
/// An empty response is first replaced by the question's default, if any.
/// Boolean and loop questions accept only the fixed positive/negative
/// token sets. Option-restricted string questions accept one of the
/// declared option values, or the literal `none` to select the empty value
/// explicitly (an empty response already means "accept the default").
pub fn validate(question: &Question, raw: &str) -> Validation {
    let response = match (raw.is_empty(), &question.default) {
        (true, Some(default)) => default.as_str(),
        _ => raw,
    };

    match question.kind {
        QuestionKind::Boolean | QuestionKind::Loop => {
            if POSITIVE.contains(&response) {
                Validation::Valid(Answer::Flag(true))
            } else if NEGATIVE.contains(&response) {
                Validation::Valid(Answer::Flag(false))
            } else {
                Validation::Invalid(format!(
                    "You must answer either positively ({}) or negatively ({})",
                    POSITIVE.join(","),
                    NEGATIVE.join(",")
                ))
            }
        }
        QuestionKind::String => {
            let mut response = response.to_string();
            if !question.options.is_empty() {
                if response == "none" {
                    response.clear();
                } else if !question
                    .options
                    .iter()
                    .any(|choice| choice.value.as_deref().unwrap_or("") == response)
                {
                    return Validation::Invalid(
                        "Please answer with one of the listed option values, or \"none\""
                            .to_string(),
                    );
                }
            }
            if question.required && response.is_empty() {
                Validation::Invalid("An answer is required for this question".to_string())
            } else {
                Validation::Valid(Answer::Text(response))
            }
        }
    }
}
