//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - the questions a release run asks, and where answers come from
//!
//! A run asks at most three [Question]s. Answers are raw text supplied by an
//! [AnswerSource]; the `prompt_*` functions validate them and ask again on
//! invalid input. Swapping the source (stdin, command-line presets, a script)
//! changes nothing else.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::domain::BumpLevel;
use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_latest_tag, display_plan, display_proposed_tag,
    display_push_hint, display_status, display_success,
};

/// Questions a release run can ask the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    BumpLevel,
    CommitMessage,
    ConfirmDirtyTree,
}

impl Question {
    /// Text shown to an interactive operator
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::BumpLevel => {
                "Select bump level:\n  1) major (X.0.0)\n  2) minor (x.Y.0)\n  3) patch (x.y.Z)\nEnter 1/2/3 or major/minor/patch: "
            }
            Question::CommitMessage => "Commit message: ",
            Question::ConfirmDirtyTree => "Continue? [y/N]: ",
        }
    }
}

/// Source of raw answers
pub trait AnswerSource {
    /// Answer `question`, or `Ok(None)` when no more input is available.
    fn answer(&mut self, question: Question) -> Result<Option<String>>;
}

/// Reads answers from a terminal (or any buffered reader)
pub struct StdinAnswers<R = io::StdinLock<'static>> {
    input: R,
}

impl StdinAnswers {
    pub fn new() -> Self {
        StdinAnswers {
            input: io::stdin().lock(),
        }
    }
}

impl Default for StdinAnswers {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinAnswers<R> {
    pub fn from_reader(input: R) -> Self {
        StdinAnswers { input }
    }
}

impl<R: BufRead> AnswerSource for StdinAnswers<R> {
    fn answer(&mut self, question: Question) -> Result<Option<String>> {
        print!("{}", question.prompt());
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Answers from a fixed script, in order; records what was asked
#[derive(Debug, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
    asked: Vec<Question>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedAnswers {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> &[Question] {
        &self.asked
    }
}

impl AnswerSource for ScriptedAnswers {
    fn answer(&mut self, question: Question) -> Result<Option<String>> {
        self.asked.push(question);
        Ok(self.answers.pop_front())
    }
}

/// Answers given up front on the command line, falling back to `inner`
///
/// Each preset answers its question once; if it is rejected the operator
/// is asked instead.
pub struct PresetAnswers<S> {
    bump: Option<String>,
    message: Option<String>,
    assume_yes: bool,
    inner: S,
}

impl<S: AnswerSource> PresetAnswers<S> {
    pub fn new(inner: S) -> Self {
        PresetAnswers {
            bump: None,
            message: None,
            assume_yes: false,
            inner,
        }
    }

    pub fn bump(mut self, level: Option<BumpLevel>) -> Self {
        self.bump = level.map(|l| l.to_string());
        self
    }

    pub fn message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

impl<S: AnswerSource> AnswerSource for PresetAnswers<S> {
    fn answer(&mut self, question: Question) -> Result<Option<String>> {
        let preset = match question {
            Question::BumpLevel => self.bump.take(),
            Question::CommitMessage => self.message.take(),
            Question::ConfirmDirtyTree if self.assume_yes => Some("y".to_string()),
            Question::ConfirmDirtyTree => None,
        };

        match preset {
            Some(answer) => Ok(Some(answer)),
            None => self.inner.answer(question),
        }
    }
}

/// Ask for a bump level until a valid one is given.
///
/// Accepts `1/2/3` or `major/minor/patch`, case-insensitive.
/// Returns `Ok(None)` if input runs out.
pub fn prompt_bump_level(source: &mut dyn AnswerSource) -> Result<Option<BumpLevel>> {
    while let Some(answer) = source.answer(Question::BumpLevel)? {
        match answer.parse::<BumpLevel>() {
            Ok(level) => return Ok(Some(level)),
            Err(_) => println!("Invalid selection. Try again.\n"),
        }
    }
    Ok(None)
}

/// Ask for a commit message until a non-empty one is given.
pub fn prompt_commit_message(source: &mut dyn AnswerSource) -> Result<Option<String>> {
    while let Some(answer) = source.answer(Question::CommitMessage)? {
        let message = answer.trim();
        if !message.is_empty() {
            return Ok(Some(message.to_string()));
        }
        println!("Commit message cannot be empty.\n");
    }
    Ok(None)
}

/// Yes/no confirmation; anything but `y`/`yes` (or no input) means no.
pub fn confirm(source: &mut dyn AnswerSource, question: Question) -> Result<bool> {
    Ok(source
        .answer(question)?
        .map(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false))
}
