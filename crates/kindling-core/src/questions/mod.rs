//! The interactive interview: definitions, validation, traversal, actions

pub mod actions;
pub mod definition;
pub mod validate;
pub mod walker;

pub use actions::apply_actions;
pub use definition::{Action, Choice, Question, QuestionKind};
pub use validate::{validate, Answer, Validation};
pub use walker::walk;
