//! CLI commands for git-reflect.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

use anyhow::{Context, Result};
use std::path::PathBuf;

use git_reflect::git;

/// Shell completion script generation.
pub mod completions;

/// Show configuration settings.
pub mod config;

/// Run the reflection prompt from the pre-commit hook.
pub mod hook;

/// Install the pre-commit hook.
pub mod install;

/// Show the latest reflection and log statistics.
pub mod show;

/// Remove the pre-commit hook.
pub mod uninstall;

/// Check the pre-commit hook.
pub mod verify;

/// Resolves the `.git` directory enclosing the current working directory.
fn current_git_dir() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(git::require_repo_root(&cwd)?)
}
