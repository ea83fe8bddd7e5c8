//! Stable exit codes for the `rc-cut` binary.

/// Branch pushed, or the version was rejected before anything ran.
pub const OK: i32 = 0;
/// A git step failed (after rollback), or input/config/inspection failed.
pub const FAILED: i32 = 1;
