//! Verify command - check the pre-commit hook.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use git_reflect::hooks::HookManager;

use super::current_git_dir;

/// Executes the verify command.
///
/// Exits non-zero when the hook is missing or not executable.
pub fn run() -> Result<ExitCode> {
    let manager = HookManager::new(&current_git_dir()?);

    if !manager.verify() {
        println!(
            "{}",
            "git-reflect hook is not installed or not executable".red()
        );
        if manager.hook_exists() {
            println!(
                "{}",
                format!("Found {} without an executable bit.", manager.hook_path().display()).dimmed()
            );
        }
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", "git-reflect hook is installed and executable".green());
    if !manager.is_managed() {
        println!(
            "{}",
            "Warning: the pre-commit hook was not written by git-reflect. Run 'git-reflect install' to replace it."
                .yellow()
        );
    }

    Ok(ExitCode::SUCCESS)
}
