//! File-based configuration read from `flo.toml` in the working directory.
//!
//! Every section and key is optional; a missing file yields the defaults.
//!
//! # Configuration File Format
//!
//! ```toml
//! [runner]
//! executable = "npx"
//! prefix = ["claude-flow@alpha"]
//! timeout_secs = 15          # 0 disables the timeout
//! background_session_prefix = "claude_flow"
//!
//! [generator]
//! endpoint = "https://openrouter.ai/api/v1/chat/completions"
//! timeout_secs = 60
//! max_tokens = 1024
//! temperature = 0.3
//! on_error = "placeholder"   # or "propagate"
//! referer = "https://example.com/"
//! title = "FlowProjectPlanner"
//!
//! [projects]
//! base_dir = "projects"
//!
//! [heal]
//! keyword = "error"
//! query_limit = 3
//! correct_limit = 1
//!
//! [setup]
//! auto_install = true
//! expected_flow_version = "2.0.0-alpha.73"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "flo.toml";

/// What the document generator does when a request fails.
///
/// | Policy        | Behaviour                                                  |
/// |---------------|------------------------------------------------------------|
/// | `Placeholder` | Return a short Markdown stub naming the kind and the idea |
/// | `Propagate`   | Return the error; the orchestrator logs it and skips the file |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Placeholder,
    Propagate,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Placeholder => write!(f, "placeholder"),
            ErrorPolicy::Propagate => write!(f, "propagate"),
        }
    }
}

impl std::str::FromStr for ErrorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "placeholder" => Ok(ErrorPolicy::Placeholder),
            "propagate" => Ok(ErrorPolicy::Propagate),
            _ => anyhow::bail!(
                "Invalid error policy '{}'. Valid values: placeholder, propagate",
                s
            ),
        }
    }
}

/// How claude-flow is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSection {
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Tokens placed between the executable and every argument vector
    #[serde(default = "default_prefix")]
    pub prefix: Vec<String>,
    #[serde(default = "default_command_timeout")]
    pub timeout_secs: u64,
    /// `screen` session names are `<prefix>_<unix timestamp>`
    #[serde(default = "default_session_prefix")]
    pub background_session_prefix: String,
}

fn default_executable() -> String {
    "npx".to_string()
}

fn default_prefix() -> Vec<String> {
    vec!["claude-flow@alpha".to_string()]
}

fn default_command_timeout() -> u64 {
    15
}

fn default_session_prefix() -> String {
    "claude_flow".to_string()
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            prefix: default_prefix(),
            timeout_secs: default_command_timeout(),
            background_session_prefix: default_session_prefix(),
        }
    }
}

impl RunnerSection {
    /// The subprocess timeout, or `None` when disabled with `0`.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Chat-completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub on_error: ErrorPolicy,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_generator_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.3
}

fn default_referer() -> String {
    "https://example.com/".to_string()
}

fn default_title() -> String {
    "FlowProjectPlanner".to_string()
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_generator_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            on_error: ErrorPolicy::default(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsSection {
    /// Where `new-project` creates project directories
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
}

fn default_base_dir() -> String {
    "projects".to_string()
}

impl Default for ProjectsSection {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }
}

/// Keyword heuristic that decides whether a corrective swarm is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealSection {
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// `--limit` for the memory query made by monitor-and-heal
    #[serde(default = "default_query_limit")]
    pub query_limit: u32,
    /// `--limit` for the memory query made after each lifecycle phase
    #[serde(default = "default_correct_limit")]
    pub correct_limit: u32,
}

fn default_keyword() -> String {
    "error".to_string()
}

fn default_query_limit() -> u32 {
    3
}

fn default_correct_limit() -> u32 {
    1
}

impl Default for HealSection {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            query_limit: default_query_limit(),
            correct_limit: default_correct_limit(),
        }
    }
}

impl HealSection {
    /// Case-insensitive keyword test against captured command output.
    pub fn triggers(&self, output: &str) -> bool {
        !self.keyword.is_empty() && output.to_lowercase().contains(&self.keyword.to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupSection {
    /// Attempt package-manager installs for missing prerequisites
    #[serde(default = "default_auto_install")]
    pub auto_install: bool,
    #[serde(default = "default_expected_flow_version")]
    pub expected_flow_version: String,
}

fn default_auto_install() -> bool {
    true
}

fn default_expected_flow_version() -> String {
    "2.0.0-alpha.73".to_string()
}

impl Default for SetupSection {
    fn default() -> Self {
        Self {
            auto_install: default_auto_install(),
            expected_flow_version: default_expected_flow_version(),
        }
    }
}

/// The complete flo.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloToml {
    #[serde(default)]
    pub runner: RunnerSection,
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub projects: ProjectsSection,
    #[serde(default)]
    pub heal: HealSection,
    #[serde(default)]
    pub setup: SetupSection,
}

impl FloToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse flo.toml")
    }

    /// Load `flo.toml` from `dir`, or the defaults if it does not exist.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize flo.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = FloToml::default();
        assert_eq!(config.runner.executable, "npx");
        assert_eq!(config.runner.prefix, vec!["claude-flow@alpha"]);
        assert_eq!(config.runner.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.generator.timeout_secs, 60);
        assert_eq!(config.generator.max_tokens, 1024);
        assert_eq!(config.generator.on_error, ErrorPolicy::Placeholder);
        assert_eq!(config.projects.base_dir, "projects");
        assert_eq!(config.heal.keyword, "error");
        assert!(config.setup.auto_install);
    }

    #[test]
    fn test_parse_partial_file_keeps_other_defaults() {
        let config = FloToml::parse(
            r#"
[runner]
timeout_secs = 0

[generator]
on_error = "propagate"
"#,
        )
        .unwrap();
        assert_eq!(config.runner.timeout(), None);
        assert_eq!(config.runner.executable, "npx");
        assert_eq!(config.generator.on_error, ErrorPolicy::Propagate);
        assert_eq!(config.generator.endpoint, default_endpoint());
    }

    #[test]
    fn test_parse_invalid_policy_fails() {
        let result = FloToml::parse("[generator]\non_error = \"retry\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_policy_from_str() {
        assert_eq!(
            "PLACEHOLDER".parse::<ErrorPolicy>().unwrap(),
            ErrorPolicy::Placeholder
        );
        assert_eq!(
            "propagate".parse::<ErrorPolicy>().unwrap(),
            ErrorPolicy::Propagate
        );
        let err = "loud".parse::<ErrorPolicy>().unwrap_err();
        assert!(err.to_string().contains("Invalid error policy"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = FloToml::load_or_default(dir.path()).unwrap();
        assert_eq!(config.runner.timeout_secs, 15);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = FloToml::default();
        config.projects.base_dir = "work".to_string();
        config.heal.keyword = "failed".to_string();
        config.save(&dir.path().join(CONFIG_FILE)).unwrap();

        let loaded = FloToml::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.projects.base_dir, "work");
        assert_eq!(loaded.heal.keyword, "failed");
    }

    #[test]
    fn test_heal_trigger_is_case_insensitive() {
        let heal = HealSection::default();
        assert!(heal.triggers("ERROR: memory backend unavailable"));
        assert!(heal.triggers("3 Errors found"));
        assert!(!heal.triggers("all good"));
        assert!(!heal.triggers(""));
    }

    #[test]
    fn test_heal_trigger_custom_keyword() {
        let heal = HealSection {
            keyword: "Failed".to_string(),
            ..HealSection::default()
        };
        assert!(heal.triggers("task failed"));
        assert!(!heal.triggers("error"));
    }
}
