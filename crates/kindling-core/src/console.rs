//! Terminal line input and output
//!
//! The interactive walker and the run orchestration talk to the terminal
//! through the [`Console`] trait, so tests can drive the interview with a
//! scripted console instead of a real terminal.

use crate::error::Result;
use colored::Colorize;
use console::Term;
use std::io::Write;

/// Output tone, mapped to a terminal colour by the terminal implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Error,
}

/// Line-oriented console used throughout a run
pub trait Console {
    /// Write a full line in the given tone
    fn say(&self, tone: Tone, text: &str);

    /// Write a prompt (no trailing newline) and read one line of input
    fn ask(&self, prompt: &str) -> Result<String>;
}

/// Console backed by the process terminal
pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn say(&self, tone: Tone, text: &str) {
        let line = match tone {
            Tone::Plain => text.normal(),
            Tone::Info => text.yellow(),
            Tone::Success => text.green(),
            Tone::Error => text.red(),
        };
        println!("{}", line);
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        Ok(self.term.read_line()?)
    }
}
