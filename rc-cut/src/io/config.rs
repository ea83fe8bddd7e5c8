//! Workflow configuration stored in `.rc-cut.toml` at the repository root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = ".rc-cut.toml";

/// Release workflow configuration (TOML).
///
/// Missing fields default to the conventional branching layout:
/// `origin`, `development`, `rc-v<version>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Remote that holds the release-candidate branches.
    pub remote: String,

    /// Integration branch major releases are cut from.
    pub integration_branch: String,

    /// Release-candidate branch prefix; the version is appended verbatim.
    pub branch_prefix: String,

    /// Build dashboard named in the success message.
    pub dashboard_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            integration_branch: "development".to_string(),
            branch_prefix: "rc-v".to_string(),
            dashboard_url: "https://jenkins.moveaws.com".to_string(),
        }
    }
}

impl ReleaseConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("remote", &self.remote),
            ("integration_branch", &self.integration_branch),
            ("branch_prefix", &self.branch_prefix),
            ("dashboard_url", &self.dashboard_url),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{field} must be non-empty"));
            }
        }
        if self.branch_prefix.chars().any(char::is_whitespace) {
            return Err(anyhow!("branch_prefix must not contain whitespace"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ReleaseConfig::default()`.
pub fn load_config(path: &Path) -> Result<ReleaseConfig> {
    if !path.exists() {
        let cfg = ReleaseConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ReleaseConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join(CONFIG_FILE_NAME)).expect("load");
        assert_eq!(cfg, ReleaseConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "integration_branch = \"main\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.integration_branch, "main");
        assert_eq!(cfg.remote, "origin");
        assert_eq!(cfg.branch_prefix, "rc-v");
    }

    #[test]
    fn empty_remote_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "remote = \"  \"\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("remote must be non-empty"));
    }

    #[test]
    fn prefix_with_whitespace_is_rejected() {
        let cfg = ReleaseConfig {
            branch_prefix: "rc v".to_string(),
            ..ReleaseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "remote = [").expect("write");
        let err = load_config(&path).expect_err("parse");
        assert!(err.to_string().starts_with("parse "));
    }
}
