//! Release version classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `MAJOR.SECOND` followed by any number of further numeric segments.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.([0-9]+)(?:\.[0-9]+)*$").expect("version pattern should be valid")
});

/// Kind of release implied by a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Second segment is zero: branch fresh from the integration branch.
    Major,
    /// Second segment is non-zero: cherry-pick onto an RC or a hotfix branch.
    Minor,
}

impl ReleaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseKind::Major => "major",
            ReleaseKind::Minor => "minor",
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated release version as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
    kind: ReleaseKind,
}

impl ReleaseVersion {
    /// Classify `input`, returning `None` when it is not a release version.
    ///
    /// Every dot-separated segment must be a non-empty digit run and there
    /// must be at least two. Segments past the second (`2.1.3`) are kept in
    /// the branch name and do not affect the classification.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        let second = VERSION_RE.captures(raw)?.get(1)?.as_str();
        let kind = if second.bytes().all(|b| b == b'0') {
            ReleaseKind::Major
        } else {
            ReleaseKind::Minor
        };
        Some(Self {
            raw: raw.to_string(),
            kind,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ReleaseKind {
        self.kind
    }

    /// Release-candidate branch name for this version, e.g. `rc-v2.1`.
    pub fn branch_name(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.raw)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(input: &str) -> Option<ReleaseKind> {
        ReleaseVersion::parse(input).map(|v| v.kind())
    }

    #[test]
    fn zero_second_segment_is_major() {
        assert_eq!(kind_of("2.0"), Some(ReleaseKind::Major));
        assert_eq!(kind_of("10.0"), Some(ReleaseKind::Major));
        assert_eq!(kind_of("3.00"), Some(ReleaseKind::Major));
        assert_eq!(kind_of("2.0.0"), Some(ReleaseKind::Major));
    }

    #[test]
    fn non_zero_second_segment_is_minor() {
        assert_eq!(kind_of("2.1"), Some(ReleaseKind::Minor));
        assert_eq!(kind_of("2.10"), Some(ReleaseKind::Minor));
        assert_eq!(kind_of("2.05"), Some(ReleaseKind::Minor));
        assert_eq!(kind_of("4.2.7"), Some(ReleaseKind::Minor));
    }

    #[test]
    fn rejects_non_versions() {
        for input in ["", "2", "abc", "v2.1", "2.x", "2..1", ".1", "2.1.", "2.1-beta", " . "] {
            assert_eq!(kind_of(input), None, "input {input:?}");
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let version = ReleaseVersion::parse("  2.1\n").expect("version");
        assert_eq!(version.as_str(), "2.1");
        assert_eq!(version.branch_name("rc-v"), "rc-v2.1");
    }
}
