//! The reflection session run by the pre-commit hook.
//!
//! A session gathers the commit context, asks the reflection questions and
//! appends the answers to the log. The git lookups and the prompt are
//! injected through [`GitContext`] and [`AnswerProvider`] so the flow can be
//! driven without a terminal or a real repository.

pub mod prompt;
pub mod questions;

use std::io;

use tracing::{debug, info, warn};

use crate::error::ReflectError;
use crate::storage::{Answers, LogEntry, ReflectionStore};

pub use prompt::TerminalPrompt;
pub use questions::{Question, QuestionKey, QUESTIONS};

/// Source of the branch name and pending commit message.
///
/// Implementations must not fail; they fall back to sentinel strings.
pub trait GitContext {
    fn branch_name(&self) -> String;
    fn commit_message(&self) -> String;
}

/// Collects answers to the reflection questions.
pub trait AnswerProvider {
    /// Asks `questions` and returns the answers, or `None` if the user
    /// cancelled.
    fn collect(&mut self, questions: &[Question]) -> io::Result<Option<Answers>>;
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The entry was written; the commit may proceed.
    Saved {
        entry: LogEntry,
        total_commits: usize,
    },
    /// The user cancelled the prompt; the commit must be aborted.
    Cancelled,
}

impl SessionOutcome {
    /// Whether git should be allowed to finish the commit.
    pub fn allows_commit(&self) -> bool {
        matches!(self, SessionOutcome::Saved { .. })
    }
}

/// One run of the pre-commit reflection.
pub struct ReflectionSession<'a, G, P> {
    store: &'a ReflectionStore,
    git: G,
    prompt: P,
}

impl<'a, G: GitContext, P: AnswerProvider> ReflectionSession<'a, G, P> {
    pub fn new(store: &'a ReflectionStore, git: G, prompt: P) -> Self {
        Self { store, git, prompt }
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::WriteFailure`] when the answers cannot be
    /// persisted. The commit must be aborted in that case too.
    pub fn run(mut self) -> Result<SessionOutcome, ReflectError> {
        let branch_name = self.git.branch_name();
        let commit_message = self.git.commit_message();
        debug!(branch = %branch_name, message = %commit_message, "Gathered commit context");

        let answers = match self.prompt.collect(&QUESTIONS) {
            Ok(Some(answers)) => answers,
            Ok(None) => {
                info!("Reflection cancelled by user");
                return Ok(SessionOutcome::Cancelled);
            }
            Err(e) => {
                warn!("Reflection prompt failed: {e}");
                return Ok(SessionOutcome::Cancelled);
            }
        };

        let entry = LogEntry::new(branch_name, commit_message, answers);
        let total_commits = self.store.add_entry(entry.clone())?;
        debug!(total_commits, "Saved reflection");

        Ok(SessionOutcome::Saved {
            entry,
            total_commits,
        })
    }
}
