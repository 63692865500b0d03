//! Applying question actions to the build session

use super::definition::{Action, Question};
use super::validate::Answer;
use crate::data::{merge, nest_at_path};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::structure::tree::{insert_at_path, StructureNode};
use serde_json::{Map, Value};

/// Apply the question's action list to the session
///
/// Runs only for positive answers. Actions run in declaration order; each
/// action value is token-substituted before it is applied, which is why
/// the walker processes dependents (and their `store` actions) first.
pub fn apply_actions(question: &Question, answer: &Answer, session: &mut Session) -> Result<()> {
    if !answer.is_positive() {
        return Ok(());
    }
    for action in &question.actions {
        match action {
            Action::Store { name, value } => {
                let raw = value.clone().unwrap_or_else(|| answer.to_value());
                let resolved = session.tokens.substitute(&raw);
                session.tokens.set(name.clone(), value_to_text(&resolved));
            }
            Action::Data { name, key, value } => {
                let raw = value.clone().unwrap_or_else(|| answer.to_value());
                let resolved = session.tokens.substitute(&raw);
                match key {
                    Some(key) => {
                        let key = session.tokens.substitute_str(key);
                        let branch = nest_at_path(&key, resolved);
                        let slot = session
                            .data
                            .entry(name.clone())
                            .or_insert_with(|| Value::Object(Map::new()));
                        merge(slot, branch);
                    }
                    None => {
                        let slot = session
                            .data
                            .entry(name.clone())
                            .or_insert_with(|| Value::Array(Vec::new()));
                        match slot {
                            Value::Array(entries) => entries.push(resolved),
                            _ => {
                                return Err(Error::Configuration(format!(
                                    "data action for question \"{}\" appends to \"{}\", \
                                     which is not a list",
                                    question.text, name
                                )))
                            }
                        }
                    }
                }
            }
            Action::Structure { path, value } => {
                let resolved = session.tokens.substitute(value);
                let node: StructureNode = serde_json::from_value(resolved).map_err(|err| {
                    Error::Configuration(format!(
                        "structure action for question \"{}\" carries an invalid entry: {}",
                        question.text, err
                    ))
                })?;
                insert_at_path(&mut session.structure, path, &node);
            }
        }
    }
    Ok(())
}

/// Textual form of a substituted value, for token storage
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
