//! Install command - write the pre-commit hook.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use git_reflect::hooks::{HookManager, InstallStatus};

use super::current_git_dir;

/// Executes the install command.
///
/// Backs up any existing pre-commit hook before replacing it.
pub fn run() -> Result<ExitCode> {
    let manager = HookManager::new(&current_git_dir()?);

    match manager.install()? {
        InstallStatus::Installed => {
            println!("{} {}", "Installed".green(), manager.hook_path().display());
        }
        InstallStatus::Replaced { backup } => {
            println!(
                "{} {} (backed up existing hook to {})",
                "Replaced".yellow(),
                manager.hook_path().display(),
                backup.display()
            );
        }
    }

    println!();
    println!("{}", "git-reflect hook installed successfully!".green());
    println!(
        "{}",
        "Next time you commit, you will be prompted with reflection questions.".dimmed()
    );

    Ok(ExitCode::SUCCESS)
}
