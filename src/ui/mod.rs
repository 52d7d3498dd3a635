//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [Prompter] seam and its console and scripted implementations

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::domain::BuildType;
use crate::error::{Result, TagNextError};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_version_report, display_warning,
};

/// Interactive questions the tagging workflow asks the operator.
pub trait Prompter {
    /// Ask a yes/no question. Returns `true` for yes.
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Ask for the `major.minor` base of the first tag of a build type.
    ///
    /// Returns the raw answer; an empty string means "use the default".
    fn ask_base_version(&self, build_type: BuildType, default_base: &str) -> Result<String>;
}

/// Interprets a yes/no reply by its first character.
///
/// Returns `None` when the reply is neither, so the caller can ask again.
pub fn interpret_answer(reply: &str) -> Option<bool> {
    match reply.trim().to_lowercase().chars().next() {
        Some('y') => Some(true),
        Some('n') => Some(false),
        _ => None,
    }
}

/// Prompter reading answers from a terminal (or any buffered reader).
pub struct ConsolePrompter<R> {
    input: RefCell<R>,
}

impl ConsolePrompter<io::StdinLock<'static>> {
    /// Prompter bound to the process's stdin
    pub fn stdin() -> Self {
        ConsolePrompter::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConsolePrompter<R> {
    pub fn new(input: R) -> Self {
        ConsolePrompter {
            input: RefCell::new(input),
        }
    }

    fn read_answer(&self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut answer = String::new();
        let read = self.input.borrow_mut().read_line(&mut answer)?;
        if read == 0 {
            return Err(TagNextError::prompt("no answer given (end of input)"));
        }
        Ok(answer.trim().to_string())
    }
}

impl<R: BufRead> Prompter for ConsolePrompter<R> {
    fn confirm(&self, question: &str) -> Result<bool> {
        let prompt = format!("{}\n\nAnswer (y/n): ", question);
        loop {
            let reply = self.read_answer(&prompt)?;
            if let Some(answer) = interpret_answer(&reply) {
                return Ok(answer);
            }
            println!("Please answer 'y' or 'n'");
        }
    }

    fn ask_base_version(&self, build_type: BuildType, default_base: &str) -> Result<String> {
        self.read_answer(&format!(
            "This is the first time {} build type tag is created.\nWhich base version to use? (default=\"{}\") ",
            build_type, default_base
        ))
    }
}

/// Prompter that replays canned answers, for driving the workflow headlessly.
///
/// Questions asked are recorded in order. Unrecognised yes/no replies are
/// skipped the way the console prompter would re-ask.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            questions: RefCell::new(Vec::new()),
        }
    }

    /// Every question asked so far
    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }

    fn next_answer(&self, question: &str) -> Result<String> {
        self.questions.borrow_mut().push(question.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TagNextError::prompt(format!("no scripted answer for '{}'", question)))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> Result<bool> {
        loop {
            if let Some(answer) = interpret_answer(&self.next_answer(question)?) {
                return Ok(answer);
            }
        }
    }

    fn ask_base_version(&self, build_type: BuildType, _default_base: &str) -> Result<String> {
        self.next_answer(&format!("base version for {}", build_type))
    }
}
