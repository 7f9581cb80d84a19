//! Config command - show configuration

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use git_reflect::config::Config;

/// Executes the config command.
pub fn run() -> Result<ExitCode> {
    let path = Config::config_path()?;
    println!("{}", "git-reflect Configuration".bold());
    println!();

    let exists = path.exists();
    println!(
        "  {}  {}{}",
        "File:".dimmed(),
        path.display(),
        if exists { "" } else { " (not present, using defaults)" }
    );

    let config = match Config::load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            println!();
            println!("{} {e:#}", "Error:".red().bold());
            return Ok(ExitCode::FAILURE);
        }
    };

    println!();
    println!("  {:<22} {}", "show_hints:", config.show_hints.to_string().cyan());
    println!(
        "  {:<22} {}",
        "staged_summary_limit:",
        config.staged_summary_limit.to_string().cyan()
    );
    println!(
        "  {:<22} {}",
        "max_message_length:",
        config.max_message_length.to_string().cyan()
    );

    Ok(ExitCode::SUCCESS)
}
