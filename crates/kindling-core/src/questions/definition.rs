//! Question and action definitions loaded from the resource set

use serde::Deserialize;
use serde_json::Value;

/// A single interview question, with optional follow-ups and effects
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Prompt text shown to the user
    #[serde(rename = "question")]
    pub text: String,

    /// Additional notes printed under the question
    #[serde(default)]
    pub notes: Vec<String>,

    /// Allowed values for option-restricted string questions
    #[serde(default)]
    pub options: Vec<Choice>,

    #[serde(rename = "type")]
    pub kind: QuestionKind,

    #[serde(default)]
    pub required: bool,

    /// Raw textual default applied when the response is empty
    #[serde(default)]
    pub default: Option<String>,

    /// Follow-up questions asked only after a positive answer
    #[serde(default)]
    pub dependents: Vec<Question>,

    /// Effects applied once this question is answered positively
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// How a question's response is parsed
///
/// `Loop` questions parse like booleans, but the walker re-asks them after
/// processing dependents and actions for as long as the answer stays
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    String,
    Loop,
}

/// One selectable value for an option-restricted question
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Stored value; absent means "no selection"
    pub value: Option<String>,

    /// Human-readable description shown in the option listing
    pub label: String,
}

/// A declarative effect applied when a question is answered positively
///
/// Unknown action tags are rejected while the resource set is parsed, so a
/// corrupt definition fails the run before the interview starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Write the answer (or the literal `value`) into the named data
    /// document, either at a dotted `key` path or appended as a new
    /// collection entry when no key is given
    Data {
        name: String,
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        value: Option<Value>,
    },

    /// Append a node into the structure tree at a slash-separated path
    Structure { path: String, value: Value },

    /// Remember the answer (or the literal `value`) for later `%token%`
    /// substitution; never written to the output documents
    Store {
        name: String,
        #[serde(default)]
        value: Option<Value>,
    },
}
