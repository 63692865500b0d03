//! Kindling Core - interactive website skeleton generation
//!
//! This library drives a question-based interview and turns the answers
//! into a generated website skeleton. A run moves through four stages:
//!
//! - **Resources** - fetch and parse the requirement documents (questions,
//!   structure, data) from a remote root or a local directory
//! - **Interview** - walk the question tree, validating answers and
//!   applying their actions to the shared [`Session`]
//! - **Build** - materialize the finished structure tree in a staging
//!   directory, generating JSON configuration files and downloading assets
//! - **Deploy** - move the staged skeleton into the target directory and
//!   install its dependencies
//!
//! All interactive I/O goes through the [`console::Console`] trait, so the
//! whole pipeline can be exercised in tests with scripted input.

pub mod console;
pub mod data;
pub mod error;
pub mod installer;
pub mod questions;
pub mod resources;
pub mod run;
pub mod session;
pub mod staging;
pub mod structure;
pub mod tokens;

pub use console::{Console, TermConsole, Tone};
pub use error::{Error, Result};
pub use run::{run, Profile, RunArgs};
pub use session::Session;
pub use tokens::TokenStore;
