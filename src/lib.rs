//! git-reflect - structured reflection for every commit
//!
//! A pre-commit hook asks a fixed set of reflection questions and appends
//! the answers to a per-repository log at `.git/git-reflect/log.json`.

pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod session;
pub mod storage;

pub use error::ReflectError;
