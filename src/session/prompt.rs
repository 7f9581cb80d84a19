//! Interactive terminal prompt for the reflection questions.
//!
//! Lines are read on a plain thread and handed to a small current-thread
//! runtime, which races each read against Ctrl+C. The reader thread may stay
//! blocked on stdin after a cancel; it dies with the process.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::thread;

use colored::Colorize;
use tokio::sync::mpsc;
use tracing::warn;

use super::questions::Question;
use super::AnswerProvider;
use crate::storage::Answers;

/// Asks the questions on stdout and reads answers from stdin.
pub struct TerminalPrompt {
    show_hints: bool,
}

impl TerminalPrompt {
    pub fn new(show_hints: bool) -> Self {
        Self { show_hints }
    }
}

impl AnswerProvider for TerminalPrompt {
    fn collect(&mut self, questions: &[Question]) -> io::Result<Option<Answers>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (tx, rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        runtime.block_on(ask_all(questions, rx, self.show_hints))
    }
}

async fn ask_all(
    questions: &[Question],
    mut lines: mpsc::UnboundedReceiver<io::Result<String>>,
    show_hints: bool,
) -> io::Result<Option<Answers>> {
    println!();
    println!("{}", "✨ Take a moment to reflect on your changes:".bold());
    println!();

    let mut answers = Answers::default();
    for question in questions {
        println!("{}", question.prompt.bold());
        if show_hints {
            println!("  {}", question.hint.dimmed());
        }

        loop {
            print!("{} ", ">".cyan());
            io::stdout().flush()?;

            let line = tokio::select! {
                line = lines.recv() => line,
                _ = interrupted(tokio::signal::ctrl_c()) => {
                    println!();
                    return Ok(None);
                }
            };

            let Some(line) = line else {
                // End of input.
                println!();
                return Ok(None);
            };

            match validate_answer(&line?) {
                Some(answer) => {
                    answers.set(question.key, answer);
                    break;
                }
                None => println!("{}", "Please provide an answer".yellow()),
            }
        }
        println!();
    }

    Ok(Some(answers))
}

/// Resolves once `signal` reports an interrupt.
///
/// A listener that fails to register never resolves, leaving the prompt
/// waiting on input alone.
async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Interrupt handler unavailable: {e}");
        std::future::pending::<()>().await;
    }
}

/// Trims an answer, rejecting blank input.
fn validate_answer(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
