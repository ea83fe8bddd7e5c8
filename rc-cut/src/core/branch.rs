//! Release-candidate branch discovery from `git branch --all` output.

use anyhow::{Result, bail};

/// Extract release-candidate branch names tracked under `remote`.
///
/// Accepts both `git branch --all` (`remotes/origin/rc-v2.1`) and
/// `git branch -r` (`origin/rc-v2.1`) line shapes. Symbolic entries such as
/// `origin/HEAD -> origin/main` are skipped.
pub fn remote_rc_branches(listing: &str, remote: &str, prefix: &str) -> Vec<String> {
    let remote_prefix = format!("{remote}/");
    let mut found = Vec::new();
    for line in listing.lines() {
        let entry = line.trim_start_matches(['*', ' ']).trim();
        if entry.is_empty() || entry.contains(" -> ") {
            continue;
        }
        let entry = entry.strip_prefix("remotes/").unwrap_or(entry);
        let Some(name) = entry.strip_prefix(&remote_prefix) else {
            continue;
        };
        if name.starts_with(prefix) && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}

/// Resolve the single release-candidate branch, if any.
///
/// More than one candidate on the remote is an error: there is no safe way
/// to choose which one to replace.
pub fn current_rc_branch(listing: &str, remote: &str, prefix: &str) -> Result<Option<String>> {
    let mut branches = remote_rc_branches(listing, remote, prefix);
    match branches.len() {
        0 => Ok(None),
        1 => Ok(branches.pop()),
        _ => bail!(
            "found {} release-candidate branches on {remote} ({}); delete the stale ones first",
            branches.len(),
            branches.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
* development
  rc-v2.1
  remotes/origin/HEAD -> origin/development
  remotes/origin/development
  remotes/origin/rc-v2.1
  remotes/upstream/rc-v9.9
";

    #[test]
    fn finds_remote_rc_branch() {
        let rc = current_rc_branch(LISTING, "origin", "rc-v").expect("listing");
        assert_eq!(rc.as_deref(), Some("rc-v2.1"));
    }

    #[test]
    fn ignores_local_and_other_remotes() {
        let listing = "  rc-v3.0\n  remotes/upstream/rc-v3.0\n";
        assert_eq!(current_rc_branch(listing, "origin", "rc-v").expect("listing"), None);
    }

    #[test]
    fn accepts_short_remote_listing() {
        let listing = "  origin/HEAD -> origin/main\n  origin/main\n  origin/rc-v1.0\n";
        assert_eq!(remote_rc_branches(listing, "origin", "rc-v"), vec!["rc-v1.0"]);
    }

    #[test]
    fn multiple_rc_branches_is_an_error() {
        let listing = "  remotes/origin/rc-v2.0\n  remotes/origin/rc-v2.1\n";
        let err = current_rc_branch(listing, "origin", "rc-v").expect_err("ambiguous");
        let msg = err.to_string();
        assert!(msg.contains("rc-v2.0"));
        assert!(msg.contains("rc-v2.1"));
    }
}
