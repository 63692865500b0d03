//! Interactive question traversal

use super::actions::apply_actions;
use super::definition::{Question, QuestionKind};
use super::validate::{validate, Answer, Validation};
use crate::console::{Console, Tone};
use crate::error::Result;
use crate::session::Session;

/// Walk the question list in declared order, prompting for each
///
/// For every question: prompt until a valid answer is given, recurse into
/// dependents when the answer is positive, then apply the question's own
/// actions. Dependents run first so that tokens they store are visible
/// when the parent's action values are substituted. Loop questions repeat
/// the whole cycle for as long as the answer stays positive.
pub fn walk(questions: &[Question], session: &mut Session, console: &dyn Console) -> Result<()> {
    for question in questions {
        loop {
            write_question(question, console);
            let answer = ask_until_valid(question, console)?;
            if answer.is_positive() && !question.dependents.is_empty() {
                walk(&question.dependents, session, console)?;
            }
            apply_actions(question, &answer, session)?;
            if question.kind != QuestionKind::Loop || !answer.is_positive() {
                break;
            }
        }
    }
    Ok(())
}

/// Print the question itself, its notes, and its option listing
fn write_question(question: &Question, console: &dyn Console) {
    console.say(Tone::Success, &format!("\n{}", question.text));
    if !question.notes.is_empty() {
        console.say(Tone::Info, "Notes:");
        for note in &question.notes {
            console.say(Tone::Info, &format!(" * {}", note));
        }
    }
    if !question.options.is_empty() {
        console.say(Tone::Info, "Options:");
        for choice in &question.options {
            console.say(
                Tone::Info,
                &format!(
                    " * {} ({})",
                    choice.value.as_deref().unwrap_or("none"),
                    choice.label
                ),
            );
        }
    }
}

fn ask_until_valid(question: &Question, console: &dyn Console) -> Result<Answer> {
    loop {
        let response = console.ask(&format!("Please give your answer ({}): ", hint(question)))?;
        match validate(question, &response) {
            Validation::Valid(answer) => return Ok(answer),
            Validation::Invalid(message) => console.say(Tone::Error, &message),
        }
    }
}

/// Hint shown in the prompt: whether an answer is required, and what an
/// empty response resolves to
fn hint(question: &Question) -> String {
    let default = match &question.default {
        Some(value) => format!("default = \"{}\"", value),
        None => "default = [empty]".to_string(),
    };
    match (question.required, &question.default) {
        (true, None) => "required".to_string(),
        (true, Some(_)) => format!("required; {}", default),
        (false, _) => default,
    }
}
