//! Git integration.
//!
//! Locates the repository metadata directory and gathers the commit context
//! (branch name and pending commit message) that a reflection entry records.
//! Every lookup in [`RepoContext`] falls back to a sentinel value instead of
//! failing, so a half-initialised repository never blocks a commit.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::Config;
use crate::error::ReflectError;
use crate::session::GitContext;

/// Name of the repository metadata directory.
pub const GIT_DIR_NAME: &str = ".git";

/// Branch name recorded when no strategy can determine one.
pub const UNKNOWN_BRANCH: &str = "initial-commit";

/// Commit message recorded when neither the message file nor the index helps.
pub const UNKNOWN_MESSAGE: &str = "[commit message]";

/// Finds the enclosing `.git` directory by walking up from `start`.
///
/// Returns the path of the metadata directory itself (not the working tree),
/// or `None` once the walk reaches the filesystem root without a match.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(GIT_DIR_NAME);
        if candidate.exists() {
            return Some(candidate);
        }

        // `parent()` is None at the root; the equality check covers prefixes
        // that are their own parent.
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}

/// Like [`find_repo_root`], but reports absence as [`ReflectError::NotARepository`].
pub fn require_repo_root(start: &Path) -> Result<PathBuf, ReflectError> {
    find_repo_root(start).ok_or(ReflectError::NotARepository)
}

/// Commit context read from a real repository.
pub struct RepoContext {
    git_dir: PathBuf,
    staged_summary_limit: usize,
    max_message_length: usize,
}

impl RepoContext {
    /// Creates a context for the repository whose metadata lives at `git_dir`.
    pub fn new(git_dir: &Path, config: &Config) -> Self {
        Self {
            git_dir: git_dir.to_path_buf(),
            staged_summary_limit: config.staged_summary_limit,
            max_message_length: config.max_message_length,
        }
    }

    /// Working tree the metadata directory belongs to.
    fn work_dir(&self) -> &Path {
        self.git_dir.parent().unwrap_or(self.git_dir.as_path())
    }

    /// Resolves the branch HEAD points at through libgit2.
    ///
    /// Fails on an unborn branch (no commits yet), which is why the
    /// `git branch --show-current` fallback exists.
    fn branch_from_head(&self) -> Option<String> {
        let repo = git2::Repository::open(&self.git_dir).ok()?;
        let head = repo.head().ok()?;
        head.shorthand()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
    }

    fn branch_from_cli(&self) -> Option<String> {
        let output = Command::new("git")
            .args(["branch", "--show-current"])
            .current_dir(self.work_dir())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!branch.is_empty()).then_some(branch)
    }

    /// First line of the in-progress commit message file, if any.
    fn message_from_editmsg(&self) -> Option<String> {
        let content = fs::read_to_string(self.git_dir.join("COMMIT_EDITMSG")).ok()?;
        let first_line = content.trim().lines().next()?.trim().to_string();
        (!first_line.is_empty()).then_some(first_line)
    }

    /// Paths staged in the index relative to HEAD (or to nothing before the
    /// first commit).
    pub fn staged_files(&self) -> Result<Vec<String>, git2::Error> {
        let repo = git2::Repository::open(&self.git_dir)?;
        let head_tree = repo.head().ok().and_then(|h| h.peel_to_tree().ok());
        let index = repo.index()?;
        let diff = repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;

        Ok(diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().to_string())
            })
            .collect())
    }

    fn message_from_staged(&self) -> Option<String> {
        let files = match self.staged_files() {
            Ok(files) => files,
            Err(e) => {
                debug!("Could not list staged files: {e}");
                return None;
            }
        };
        summarize_staged(&files, self.staged_summary_limit)
    }
}

impl GitContext for RepoContext {
    fn branch_name(&self) -> String {
        self.branch_from_head()
            .or_else(|| self.branch_from_cli())
            .unwrap_or_else(|| UNKNOWN_BRANCH.to_string())
    }

    fn commit_message(&self) -> String {
        let message = self
            .message_from_editmsg()
            .or_else(|| self.message_from_staged())
            .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string());
        truncate_message(&message, self.max_message_length)
    }
}

/// Builds the `Changes to: a, b, c` summary used when no message is available.
fn summarize_staged(files: &[String], limit: usize) -> Option<String> {
    if files.is_empty() {
        return None;
    }
    let shown: Vec<&str> = files.iter().take(limit.max(1)).map(String::as_str).collect();
    Some(format!("Changes to: {}", shown.join(", ")))
}

const ELLIPSIS: &str = "...";

/// Truncates `message` to at most `max_chars` characters, marking the cut with `...`.
///
/// Limits too small to hold the marker get a plain cut.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return message.chars().take(max_chars).collect();
    }
    let truncated: String = message.chars().take(max_chars - ELLIPSIS.len()).collect();
    format!("{truncated}{ELLIPSIS}")
}
