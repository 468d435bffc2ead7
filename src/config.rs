//! Run configuration, loaded from `governator.toml` at the repo root.
//!
//! Follows the teacher-style config shape: a `#[serde(deny_unknown_fields)]`
//! struct with `default_*` helper functions for every field that has a
//! sensible fallback, so a missing `governator.toml` still produces a
//! usable config via `Config::default()`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Branch that completed work merges into.
    pub main_branch: String,
    pub retries: RetriesConfig,
    pub timeouts: TimeoutsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_branch: default_main_branch(),
            retries: RetriesConfig::default(),
            timeouts: TimeoutsConfig::default(),
        }
    }
}

/// Global retry policy (spec §4.6); overridden per-task by `Task.Retries`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RetriesConfig {
    pub max_attempts: u32,
}

impl Default for RetriesConfig {
    fn default() -> Self {
        Self { max_attempts: default_max_attempts() }
    }
}

/// Subprocess timeout policy (spec §5).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TimeoutsConfig {
    pub worker_seconds: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self { worker_seconds: default_worker_seconds() }
    }
}

fn default_main_branch() -> String {
    "main".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_worker_seconds() -> u64 {
    900
}

/// Errors loading or parsing `governator.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads config from `<repo_root>/governator.toml`, falling back to
    /// defaults if the file does not exist.
    pub fn load(repo_root: &Path) -> Result<Self, ConfigError> {
        let path = repo_root.join("governator.toml");
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_three_retries_and_main_branch() {
        let cfg = Config::default();
        assert_eq!(cfg.retries.max_attempts, 3);
        assert_eq!(cfg.main_branch, "main");
    }

    #[test]
    fn load_falls_back_to_default_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.timeouts.worker_seconds, 900);
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("governator.toml"), "bogus_field = 1\n").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn load_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("governator.toml"),
            "main_branch = \"trunk\"\n\n[retries]\nmax_attempts = 5\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.main_branch, "trunk");
        assert_eq!(cfg.retries.max_attempts, 5);
    }
}
