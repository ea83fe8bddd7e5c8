//! Test-only fakes and repository fixtures.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow, bail};
use tempfile::TempDir;

use crate::io::git::{Git, GitCommandError, Vcs};
use crate::io::prompt::Prompter;

/// [`Vcs`] that records every command instead of running git.
///
/// Unscripted commands succeed with empty stdout.
#[derive(Debug, Default)]
pub struct ScriptedVcs {
    responses: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `stdout` when `command` (space-joined args) runs.
    pub fn respond(mut self, command: &str, stdout: impl Into<String>) -> Self {
        self.responses.insert(command.to_string(), stdout.into());
        self
    }

    /// Fail `command` with `stderr`, like a non-zero git exit.
    pub fn fail(mut self, command: &str, stderr: impl Into<String>) -> Self {
        self.failures.insert(command.to_string(), stderr.into());
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Vcs for ScriptedVcs {
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());
        if let Some(stderr) = self.failures.get(&command) {
            return Err(GitCommandError::new(args, stderr).into());
        }
        Ok(self.responses.get(&command).cloned().unwrap_or_default())
    }
}

/// [`Prompter`] that replays canned answers and remembers the questions.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for {question:?}"))
    }
}

/// Working clone on `development` with a bare `origin`, both in a tempdir.
pub struct TestRepo {
    _temp: TempDir,
    work: PathBuf,
    remote: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("tempdir")?;
        let work = temp.path().join("work");
        let remote = temp.path().join("origin.git");

        git_in(temp.path(), &["init", "--bare", path_str(&remote)?])?;
        git_in(temp.path(), &["init", path_str(&work)?])?;
        git_in(&remote, &["symbolic-ref", "HEAD", "refs/heads/development"])?;

        let repo = Self {
            _temp: temp,
            work,
            remote,
        };
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/development"])?;
        repo.git(&["config", "user.name", "Release Bot"])?;
        repo.git(&["config", "user.email", "release-bot@example.test"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        repo.git(&["config", "tag.gpgsign", "false"])?;
        repo.git(&["config", "pull.rebase", "false"])?;
        repo.commit_file("README.md", "release tooling fixture\n", "initial commit")?;
        repo.git(&["remote", "add", "origin", path_str(&repo.remote)?])?;
        repo.git(&["push", "origin", "development"])?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.work
    }

    /// Run git in the working clone, returning trimmed stdout.
    pub fn git(&self, args: &[&str]) -> Result<String> {
        Ok(Git::new(&self.work).run(args)?.trim().to_string())
    }

    /// Write `name`, commit it, and return the new commit id.
    pub fn commit_file(&self, name: &str, contents: &str, message: &str) -> Result<String> {
        std::fs::write(self.work.join(name), contents)
            .with_context(|| format!("write {name}"))?;
        self.git(&["add", name])?;
        self.git(&["commit", "-m", message])?;
        self.git(&["rev-parse", "HEAD"])
    }

    pub fn current_branch(&self) -> Result<String> {
        Git::new(&self.work).current_branch()
    }

    /// Branch names on the bare remote, sorted.
    pub fn remote_branches(&self) -> Result<Vec<String>> {
        let out = git_in(&self.remote, &["for-each-ref", "--format=%(refname:short)", "refs/heads"])?;
        let mut names: Vec<String> = out.lines().map(|l| l.trim().to_string()).collect();
        names.sort();
        Ok(names)
    }

    /// Commit id of `rev` as seen by the bare remote.
    pub fn remote_rev(&self, rev: &str) -> Result<String> {
        git_in(&self.remote, &["rev-parse", rev]).map(|out| out.trim().to_string())
    }
}

fn git_in(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("non-utf8 path {}", path.display()))
}
