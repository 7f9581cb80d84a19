//! Hook entry point - run the reflection session.
//!
//! Invoked as `git-reflect --hook` by the pre-commit script. Exit code 0
//! lets git finish the commit; anything else aborts it.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use tracing::warn;

use git_reflect::config::Config;
use git_reflect::git::RepoContext;
use git_reflect::session::{ReflectionSession, SessionOutcome, TerminalPrompt};
use git_reflect::storage::ReflectionStore;

use super::current_git_dir;

/// Executes the reflection session for the pending commit.
pub fn run() -> Result<ExitCode> {
    let git_dir = current_git_dir()?;

    // A broken config must not block the commit.
    let config = Config::load().unwrap_or_else(|e| {
        warn!("{e:#}; using default settings");
        Config::default()
    });

    let store = ReflectionStore::new(&git_dir);
    let session = ReflectionSession::new(
        &store,
        RepoContext::new(&git_dir, &config),
        TerminalPrompt::new(config.show_hints),
    );

    match session.run() {
        Ok(SessionOutcome::Saved { total_commits, .. }) => {
            println!(
                "{}",
                format!(
                    "📝 Reflection saved! Your entry has been added to {}",
                    store.log_path().display()
                )
                .green()
            );
            println!("{}", format!("{total_commits} reflections so far.").dimmed());
            println!();
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionOutcome::Cancelled) => {
            println!("{}", "❌ Reflection cancelled. Commit aborted.".red());
            println!();
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            println!("{}", "❌ Reflection could not be saved. Commit aborted.".red());
            Ok(ExitCode::FAILURE)
        }
    }
}
