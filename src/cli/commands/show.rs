//! Show command - display the latest reflection.
//!
//! Prints the most recent log entry together with the log statistics, as
//! colored text or as JSON.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use std::process::ExitCode;

use git_reflect::session::QUESTIONS;
use git_reflect::storage::{LogEntry, ReflectionLog, ReflectionStore};

use super::current_git_dir;

/// How `show` renders the log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Colored summary of the latest reflection.
    #[default]
    Text,
    /// `stats` and `latest` as pretty-printed JSON.
    Json,
}

/// Arguments for the show command.
#[derive(clap::Args)]
pub struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Text)]
    pub format: ShowFormat,
}

/// Executes the show command.
pub fn run(args: Args) -> Result<ExitCode> {
    let store = ReflectionStore::new(&current_git_dir()?);
    let log = store.read_log();

    match args.format {
        ShowFormat::Json => print_json(&log)?,
        ShowFormat::Text => print_text(&log),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json(log: &ReflectionLog) -> Result<()> {
    let output = serde_json::json!({
        "stats": log.stats,
        "latest": log.latest(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(log: &ReflectionLog) {
    println!("{}", "git-reflect".bold().cyan());
    println!(
        "  {}  {}",
        "Reflections:".dimmed(),
        log.stats.total_commits.to_string().green()
    );
    println!(
        "  {}  {}",
        "Since:".dimmed(),
        log.stats.project_start_date
    );
    println!();

    match log.latest() {
        Some(entry) => print_entry(entry),
        None => println!(
            "{}",
            "No reflections yet. Run 'git-reflect install' and make a commit.".yellow()
        ),
    }
}

fn print_entry(entry: &LogEntry) {
    println!("{}", "Latest reflection:".bold());
    println!(
        "  {}  {}",
        entry.timestamp.format("%Y-%m-%d %H:%M UTC").to_string().dimmed(),
        entry.branch_name.yellow()
    );
    println!("  {}", entry.commit_message);
    println!();

    for question in &QUESTIONS {
        println!("{}", question.prompt.bold());
        println!("  {}", entry.answers.get(question.key));
    }
}
