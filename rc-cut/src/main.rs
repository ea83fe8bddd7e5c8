//! Interactive release-candidate branch cutter.
//!
//! Asks for a release version (and a commit for minor releases), then drives
//! `git` through the matching branch/cherry-pick/push sequence. On failure the
//! starting branch is checked out again and the process exits with status 1.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rc_cut::exit_codes;
use rc_cut::io::config::{CONFIG_FILE_NAME, load_config};
use rc_cut::io::git::Git;
use rc_cut::io::prompt::LinePrompter;
use rc_cut::logging;
use rc_cut::release::{ReleaseOutcome, run_release};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "rc-cut",
    version,
    about = "Cut, amend, or hotfix release-candidate branches"
)]
struct Cli {
    /// Repository to operate in.
    #[arg(short = 'C', long = "repo", value_name = "DIR", default_value = ".")]
    repo: PathBuf,

    /// Config file (defaults to `.rc-cut.toml` in the repository).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::FAILED
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| cli.repo.join(CONFIG_FILE_NAME));
    let cfg = load_config(&config_path).context("load release config")?;
    debug!(config = %config_path.display(), ?cfg, "config loaded");

    let git = Git::new(&cli.repo);
    let mut prompter = LinePrompter::stdio();
    let mut out = io::stdout();
    let outcome = run_release(&git, &mut prompter, &mut out, &cfg)?;
    debug!(?outcome, "release finished");

    Ok(match outcome {
        ReleaseOutcome::InvalidVersion | ReleaseOutcome::Pushed { .. } => exit_codes::OK,
        ReleaseOutcome::RolledBack { .. } => exit_codes::FAILED,
    })
}
