//! Interactive release-candidate branch cutter.
//!
//! Automates a fixed git branching workflow: major releases get a fresh
//! `rc-v<version>` branch from the integration branch, minor releases
//! cherry-pick a commit onto the matching RC branch or onto a hotfix branch
//! cut from the latest tag. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (version classification, branch
//!   listing parsing). No I/O.
//! - **[`io`]**: Side-effecting operations (git subprocesses, prompts,
//!   config files). Behind traits so tests can script them.
//!
//! [`release`] coordinates the two to implement the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod release;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
