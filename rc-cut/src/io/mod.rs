//! I/O helpers for the release workflow.

pub mod config;
pub mod git;
pub mod prompt;
