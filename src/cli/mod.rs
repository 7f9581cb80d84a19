//! Command-line interface for git-reflect.
//!
//! Each command maps to one operation of the hook manager, the log store
//! or the reflection session, and resolves to exit code 0 or 1.

/// Individual CLI command implementations.
pub mod commands;
