//! Git adapter for the release workflow.
//!
//! Every repository operation is a `git` subprocess. [`Vcs`] exposes the
//! workflow's commands as provided methods over a single `run` primitive, so
//! tests can swap in a recording fake without spawning processes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow, bail};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// A git command that ran and exited non-zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("git {command} failed: {stderr}")]
pub struct GitCommandError {
    /// Arguments after `git`, space-joined.
    pub command: String,
    /// The command's stderr, trimmed.
    pub stderr: String,
}

impl GitCommandError {
    pub fn new(args: &[&str], stderr: &str) -> Self {
        Self {
            command: args.join(" "),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// Synchronous access to a git repository.
pub trait Vcs {
    /// Run `git <args>` to completion and return its stdout.
    ///
    /// A non-zero exit is a [`GitCommandError`] carrying the command's stderr.
    fn run(&self, args: &[&str]) -> Result<String>;

    /// Return the current branch name (errors on detached HEAD).
    fn current_branch(&self) -> Result<String> {
        let out = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = out.trim().to_string();
        if name == "HEAD" {
            warn!("detached HEAD detected");
            return Err(anyhow!(
                "detached HEAD (refuse to run: no branch to restore on failure)"
            ));
        }
        debug!(branch = %name, "current branch");
        Ok(name)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.run(&["fetch", remote])?;
        Ok(())
    }

    /// Raw `git branch --all` listing, local and remote-tracking.
    fn list_all_branches(&self) -> Result<String> {
        self.run(&["branch", "--all"])
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        debug!(branch, "checking out branch");
        self.run(&["checkout", branch])?;
        Ok(())
    }

    /// Create (or reset) `branch` at the current HEAD and check it out.
    fn checkout_fresh_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "recreating branch at HEAD");
        self.run(&["checkout", "-B", branch])?;
        Ok(())
    }

    /// Create (or reset) `branch` at `start_point` and check it out.
    ///
    /// A leftover local branch from an earlier run is overwritten, so the
    /// result always matches `start_point`.
    fn checkout_fresh_branch_at(&self, branch: &str, start_point: &str) -> Result<()> {
        debug!(branch, start_point, "recreating branch");
        self.run(&["checkout", "-B", branch, start_point])?;
        Ok(())
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["pull", remote, branch])?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, branch])?;
        Ok(())
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(remote, branch, "deleting remote branch");
        self.run(&["push", remote, "--delete", branch])?;
        Ok(())
    }

    /// Drop remote-tracking refs whose remote branch no longer exists.
    fn prune_remote(&self, remote: &str) -> Result<()> {
        self.run(&["remote", "prune", remote])?;
        Ok(())
    }

    fn cherry_pick(&self, commit: &str) -> Result<()> {
        debug!(commit, "cherry-picking");
        self.run(&["cherry-pick", commit])?;
        Ok(())
    }

    /// True when a stopped cherry-pick left `CHERRY_PICK_HEAD` behind.
    fn cherry_pick_in_progress(&self) -> bool {
        self.run(&["rev-parse", "-q", "--verify", "CHERRY_PICK_HEAD"])
            .map(|out| !out.trim().is_empty())
            .unwrap_or(false)
    }

    /// Drop a conflicted cherry-pick and restore the pre-pick index.
    fn abort_cherry_pick(&self) -> Result<()> {
        debug!("aborting cherry-pick");
        self.run(&["cherry-pick", "--abort"])?;
        Ok(())
    }

    /// Name of the tag on the most recently tagged commit.
    fn latest_tag(&self) -> Result<String> {
        let out = self.run(&["rev-list", "--tags", "--max-count=1"])?;
        let commit = out.trim();
        if commit.is_empty() {
            bail!("no tags found to branch the hotfix from");
        }
        let tag = self.run(&["describe", "--tags", commit])?;
        let tag = tag.trim().to_string();
        debug!(tag = %tag, commit, "latest tag");
        Ok(tag)
    }
}

/// [`Vcs`] backed by the `git` binary in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn spawn(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

impl Vcs for Git {
    #[instrument(skip_all, fields(cmd = %args.join(" ")))]
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.spawn(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(exit_code = ?output.status.code(), "git failed");
            return Err(GitCommandError::new(args, &stderr).into());
        }
        debug!("git finished");
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
