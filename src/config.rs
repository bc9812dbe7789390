use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::credentials::ENV_FILE;
use crate::flo_config::FloToml;

pub const LOG_FILE: &str = "flo.log";

/// Runtime configuration for flo.
///
/// Bridges `flo.toml` with the global CLI flags. The CLI flags win over the
/// file, and the file wins over built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub verbose: bool,
    pub dry_run: bool,
    pub skip_setup: bool,
    pub env_file: PathBuf,
    pub log_file: PathBuf,
    pub settings: FloToml,
}

impl Config {
    /// Build the runtime configuration rooted at `project_dir`.
    ///
    /// # Arguments
    /// * `project_dir`: working directory for the facade, `.env`, `flo.toml` and the log
    /// * `timeout_override`: `--timeout` in seconds; `0` disables the subprocess timeout
    pub fn new(
        project_dir: PathBuf,
        verbose: bool,
        dry_run: bool,
        skip_setup: bool,
        timeout_override: Option<u64>,
    ) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;

        let mut settings = FloToml::load_or_default(&project_dir)?;
        if let Some(secs) = timeout_override {
            settings.runner.timeout_secs = secs;
        }

        Ok(Self {
            env_file: project_dir.join(ENV_FILE),
            log_file: project_dir.join(LOG_FILE),
            project_dir,
            verbose,
            dry_run,
            skip_setup,
            settings,
        })
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.settings.runner.timeout()
    }

    /// Resolve a base directory for projects; relative paths hang off the project dir.
    pub fn projects_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        let base = override_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.settings.projects.base_dir));
        if base.is_absolute() {
            base
        } else {
            self.project_dir.join(base)
        }
    }

    /// Whether the bootstrap probes and installs should run.
    pub fn runs_setup(&self) -> bool {
        !self.skip_setup && !self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, false, false, None).unwrap();
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.project_dir, root);
        assert_eq!(config.env_file, root.join(".env"));
        assert_eq!(config.log_file, root.join("flo.log"));
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.settings.generator.timeout_secs, 60);
        assert!(config.runs_setup());
    }

    #[test]
    fn test_timeout_flag_overrides_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("flo.toml"), "[runner]\ntimeout_secs = 30\n").unwrap();

        let from_file = Config::new(dir.path().to_path_buf(), false, false, false, None).unwrap();
        assert_eq!(from_file.command_timeout(), Some(Duration::from_secs(30)));

        let unbounded =
            Config::new(dir.path().to_path_buf(), false, false, false, Some(0)).unwrap();
        assert_eq!(unbounded.command_timeout(), None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("flo.toml"), "[runner\n").unwrap();
        let result = Config::new(dir.path().to_path_buf(), false, false, false, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_projects_dir_resolution() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, false, false, None).unwrap();
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.projects_dir(None), root.join("projects"));
        assert_eq!(
            config.projects_dir(Some(Path::new("elsewhere"))),
            root.join("elsewhere")
        );
        assert_eq!(config.projects_dir(Some(Path::new("/abs"))), PathBuf::from("/abs"));
    }

    #[test]
    fn test_dry_run_and_skip_setup_disable_setup() {
        let dir = tempdir().unwrap();
        let dry = Config::new(dir.path().to_path_buf(), false, true, false, None).unwrap();
        assert!(!dry.runs_setup());
        let skip = Config::new(dir.path().to_path_buf(), true, false, true, None).unwrap();
        assert!(!skip.runs_setup());
        assert!(skip.verbose);
    }
}
