//! Orchestration for a single release-candidate cut.
//!
//! Prompts for the version (and, for minor releases, a commit), inspects the
//! repository, then runs one of three fixed git sequences:
//!
//! - **Major** (`X.0`): replace any RC branch with a fresh one cut from the
//!   integration branch.
//! - **Late addition** (minor, RC branch for this version exists):
//!   cherry-pick onto it and republish it.
//! - **Hotfix** (minor, no matching RC branch): branch from the latest tag,
//!   cherry-pick, replace any other RC branch.
//!
//! Any failing mutation stops the sequence, prints the git error, abandons a
//! stopped cherry-pick, and checks the starting branch back out.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{info, instrument, warn};

use crate::core::branch::current_rc_branch;
use crate::core::version::{ReleaseKind, ReleaseVersion};
use crate::io::config::ReleaseConfig;
use crate::io::git::{GitCommandError, Vcs};
use crate::io::prompt::Prompter;

pub const VERSION_PROMPT: &str = "What is the release version? ";
pub const COMMIT_PROMPT: &str = "What is the commit that you want? ";
pub const INVALID_VERSION: &str = "Invalid version";

/// Which git sequence a cut ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePath {
    Major,
    LateAddition,
    Hotfix,
}

/// Result of `run_release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Version was not recognised; nothing ran.
    InvalidVersion,
    /// Branch pushed to the remote.
    Pushed { branch: String, path: ReleasePath },
    /// A step failed and `restored` was checked out again.
    RolledBack { restored: String },
}

/// State gathered before any mutation.
#[derive(Debug, Clone)]
struct Inspection {
    original_branch: String,
    current_rc: Option<String>,
}

/// Run one interactive release cut against `vcs`.
///
/// User-facing lines go to `out`. Errors returned from here happen before
/// the repository is mutated (bad input, inspection failures) or when the
/// rollback checkout itself fails.
pub fn run_release<V, P, W>(
    vcs: &V,
    prompter: &mut P,
    out: &mut W,
    cfg: &ReleaseConfig,
) -> Result<ReleaseOutcome>
where
    V: Vcs,
    P: Prompter,
    W: Write,
{
    let answer = prompter.ask(VERSION_PROMPT)?;
    let Some(version) = ReleaseVersion::parse(&answer) else {
        info!(input = %answer, "rejected release version");
        writeln!(out, "{INVALID_VERSION}").context("write output")?;
        return Ok(ReleaseOutcome::InvalidVersion);
    };
    let target = version.branch_name(&cfg.branch_prefix);
    info!(%version, kind = %version.kind(), branch = %target, "release requested");

    let inspection = inspect(vcs, cfg)?;

    let result = match version.kind() {
        ReleaseKind::Major => cut_major(vcs, cfg, &target, inspection.current_rc.as_deref())
            .map(|()| ReleasePath::Major),
        ReleaseKind::Minor => {
            let commit = ask_commit(prompter)?;
            cut_minor(vcs, cfg, &target, inspection.current_rc.as_deref(), &commit)
        }
    };

    match result {
        Ok(path) => {
            info!(branch = %target, ?path, "release branch pushed");
            writeln!(
                out,
                "{target} is pushed to {remote}, beta build will automatically start, please verify on {url}, and search for {target}",
                remote = cfg.remote,
                url = cfg.dashboard_url,
            )
            .context("write output")?;
            Ok(ReleaseOutcome::Pushed {
                branch: target,
                path,
            })
        }
        Err(err) => {
            writeln!(out, "{}", failure_text(&err)).context("write output")?;
            rollback(vcs, &inspection.original_branch)?;
            Ok(ReleaseOutcome::RolledBack {
                restored: inspection.original_branch,
            })
        }
    }
}

/// Read-only discovery: starting branch, fetch, current RC branch.
#[instrument(skip_all)]
fn inspect<V: Vcs>(vcs: &V, cfg: &ReleaseConfig) -> Result<Inspection> {
    let original_branch = vcs.current_branch().context("determine current branch")?;
    vcs.fetch(&cfg.remote).context("fetch remote")?;
    let listing = vcs.list_all_branches().context("list branches")?;
    let current_rc = current_rc_branch(&listing, &cfg.remote, &cfg.branch_prefix)?;
    info!(original = %original_branch, current_rc = ?current_rc, "repository inspected");
    Ok(Inspection {
        original_branch,
        current_rc,
    })
}

fn ask_commit<P: Prompter>(prompter: &mut P) -> Result<String> {
    let commit = prompter.ask(COMMIT_PROMPT)?.trim().to_string();
    if commit.is_empty() {
        bail!("no commit given to cherry-pick");
    }
    Ok(commit)
}

#[instrument(skip_all, fields(branch = %target))]
fn cut_major<V: Vcs>(
    vcs: &V,
    cfg: &ReleaseConfig,
    target: &str,
    current_rc: Option<&str>,
) -> Result<()> {
    if let Some(rc) = current_rc {
        vcs.delete_remote_branch(&cfg.remote, rc)?;
    }
    vcs.checkout(&cfg.integration_branch)?;
    vcs.pull(&cfg.remote, &cfg.integration_branch)?;
    vcs.checkout_fresh_branch(target)?;
    vcs.prune_remote(&cfg.remote)?;
    vcs.push(&cfg.remote, target)?;
    Ok(())
}

#[instrument(skip_all, fields(branch = %target, commit = %commit))]
fn cut_minor<V: Vcs>(
    vcs: &V,
    cfg: &ReleaseConfig,
    target: &str,
    current_rc: Option<&str>,
    commit: &str,
) -> Result<ReleasePath> {
    if current_rc == Some(target) {
        // Start from what was just fetched; a local copy may be behind it.
        vcs.checkout_fresh_branch_at(target, &format!("{}/{target}", cfg.remote))?;
        vcs.cherry_pick(commit)?;
        vcs.delete_remote_branch(&cfg.remote, target)?;
        vcs.prune_remote(&cfg.remote)?;
        vcs.push(&cfg.remote, target)?;
        return Ok(ReleasePath::LateAddition);
    }

    let tag = vcs.latest_tag()?;
    vcs.checkout_fresh_branch_at(target, &tag)?;
    vcs.cherry_pick(commit)?;
    if let Some(rc) = current_rc {
        vcs.delete_remote_branch(&cfg.remote, rc)?;
        vcs.prune_remote(&cfg.remote)?;
    }
    vcs.push(&cfg.remote, target)?;
    Ok(ReleasePath::Hotfix)
}

/// What the user sees for a failed step: git's own stderr when there is any.
fn failure_text(err: &anyhow::Error) -> String {
    match err.downcast_ref::<GitCommandError>() {
        Some(git) if !git.stderr.is_empty() => git.stderr.clone(),
        _ => format!("{err:#}"),
    }
}

fn rollback<V: Vcs>(vcs: &V, original_branch: &str) -> Result<()> {
    warn!(branch = original_branch, "release step failed, restoring branch");
    if vcs.cherry_pick_in_progress() {
        warn!("abandoning stopped cherry-pick");
        vcs.abort_cherry_pick()
            .with_context(|| format!("restore original branch {original_branch}"))?;
    }
    vcs.checkout(original_branch)
        .with_context(|| format!("restore original branch {original_branch}"))
}
