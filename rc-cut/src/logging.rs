//! Tracing for debugging a release cut.
//!
//! What gets logged:
//!
//! - **`debug`**: every git invocation, as a `run` span carrying the command
//!   line, plus its exit code on failure. Branch checkouts, deletions and
//!   cherry-picks add their own events.
//! - **`info`**: release decisions: the parsed version and target branch, the
//!   inspected repository state, the pushed branch and which path cut it.
//! - **`warn`**: rollbacks after a failed step, abandoned cherry-picks, and a
//!   detached HEAD at start.
//!
//! Everything goes to stderr. Stdout carries only the prompts and the
//! success or failure line, so `RUST_LOG` never changes what a user sees.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset or unparsable: rollbacks show up, git
/// chatter does not.
const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. Call once, before the first git command.
///
/// ```bash
/// RUST_LOG=rc_cut=debug rc-cut      # every git command
/// RUST_LOG=rc_cut=info rc-cut       # just the release decisions
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();
}
