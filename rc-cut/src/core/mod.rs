//! Deterministic, pure logic for the release workflow.
//!
//! Core modules must be free of I/O side effects: they classify versions and
//! parse git output handed to them as text.

pub mod branch;
pub mod version;
