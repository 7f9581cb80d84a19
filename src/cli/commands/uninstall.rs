//! Uninstall command - remove the pre-commit hook.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use git_reflect::hooks::{HookManager, UninstallStatus};

use super::current_git_dir;

/// Executes the uninstall command.
///
/// The reflection log is kept, and a `pre-commit.backup` left by install is
/// not restored automatically.
pub fn run() -> Result<ExitCode> {
    let manager = HookManager::new(&current_git_dir()?);

    match manager.uninstall()? {
        UninstallStatus::Removed => {
            println!("{} {}", "Removed".green(), manager.hook_path().display());
        }
        UninstallStatus::NotInstalled => {
            println!("{}", "No git-reflect hook found.".yellow());
        }
    }

    let backup = manager.backup_path();
    if backup.exists() {
        println!(
            "{}",
            format!(
                "A previous hook is saved at {}; move it back to restore it.",
                backup.display()
            )
            .dimmed()
        );
    }

    Ok(ExitCode::SUCCESS)
}
