//! Storage layer for git-reflect

pub mod log;
pub mod models;

pub use log::ReflectionStore;
pub use models::*;
