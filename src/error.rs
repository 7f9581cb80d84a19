//! Error types for git-reflect.
//!
//! Read-path problems (a missing or corrupted log) are recovered where they
//! happen and only logged. Everything that would lose a reflection or leave
//! the hook in an unknown state is returned to the caller as a
//! [`ReflectError`].

use std::io;

/// Errors produced by the hook manager, log store and reflection session.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    /// No `.git` directory was found walking up from the working directory.
    #[error("Not inside a git repository")]
    NotARepository,

    /// Writing, copying or chmod-ing the pre-commit hook failed.
    #[error("Failed to install hook: {0}")]
    InstallFailure(#[source] io::Error),

    /// Removing the pre-commit hook failed for a reason other than absence.
    #[error("Failed to uninstall hook: {0}")]
    UninstallFailure(#[source] io::Error),

    /// The reflection log could not be persisted.
    #[error("Failed to write log.json: {0}")]
    WriteFailure(#[source] io::Error),

    /// The reflection log on disk is not a valid log document.
    #[error("log.json is corrupted: {0}")]
    Corruption(#[source] serde_json::Error),

    /// The user aborted the reflection prompt.
    #[error("Reflection cancelled")]
    Cancelled,
}
