use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "git-reflect")]
#[command(version)]
#[command(about = "Integrate structured reflection into your git workflow")]
#[command(long_about = "git-reflect installs a pre-commit hook that asks a short set of\n\
    reflection questions before every commit. Answers are appended to\n\
    .git/git-reflect/log.json in the repository.")]
#[command(after_help = "EXAMPLES:\n    \
    git-reflect install      Set up the pre-commit hook\n    \
    git-reflect verify       Check the hook is installed and executable\n    \
    git-reflect show         Show the latest reflection\n    \
    git-reflect uninstall    Remove the pre-commit hook\n\n\
    For more information about a command, run 'git-reflect <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run the reflection prompt (invoked by the pre-commit hook)
    #[arg(long, hide = true)]
    hook: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Install the pre-commit hook
    #[command(long_about = "Writes the git-reflect pre-commit hook into .git/hooks/.\n\
        An existing pre-commit hook is copied to pre-commit.backup first.")]
    Install,

    /// Remove the pre-commit hook
    #[command(long_about = "Deletes .git/hooks/pre-commit. The reflection log and any\n\
        pre-commit.backup file are left in place.")]
    Uninstall,

    /// Check that the hook is installed and executable
    Verify,

    /// Show the latest reflection and log statistics
    Show(commands::show::Args),

    /// Show configuration settings
    #[command(long_about = "Prints the configuration file location and the effective\n\
        settings. Configuration is read from ~/.git-reflect/config.yaml.")]
    Config,

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "git_reflect=debug"
    } else {
        "git_reflect=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    let result = if cli.hook {
        commands::hook::run()
    } else {
        match cli.command {
            Some(Commands::Install) => commands::install::run(),
            Some(Commands::Uninstall) => commands::uninstall::run(),
            Some(Commands::Verify) => commands::verify::run(),
            Some(Commands::Show(args)) => commands::show::run(args),
            Some(Commands::Config) => commands::config::run(),
            Some(Commands::Completions(args)) => {
                commands::completions::generate_completions(&mut Cli::command(), args.shell);
                Ok(ExitCode::SUCCESS)
            }
            None => Cli::command()
                .print_help()
                .map(|_| ExitCode::SUCCESS)
                .map_err(Into::into),
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
