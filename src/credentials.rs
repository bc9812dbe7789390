//! Credential loading and saving.
//!
//! Credentials are read once at startup: the process environment wins, and
//! `.env` in the working directory fills the gaps. The resolved set is then
//! passed explicitly to whoever needs it. The process environment itself is
//! never modified; keys learned from `.env` reach child processes through
//! [`Credentials::child_env`].

use anyhow::{Context, Result};
use std::path::Path;

pub const ENV_FILE: &str = ".env";

pub const GIT_TOKEN: &str = "GIT_TOKEN";
pub const OPENROUTER_TOKEN: &str = "OPENROUTER_TOKEN";
pub const OPENROUTER_MODEL: &str = "OPENROUTER_MODEL";
pub const FLO_LANG: &str = "FLO_LANG";

pub const DEFAULT_MODEL: &str = "qwen/qwen3-coder:free";
pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub git_token: Option<String>,
    pub openrouter_token: Option<String>,
    pub openrouter_model: String,
    pub lang: String,
    /// Pairs read from `.env` whose keys were absent from the environment.
    pub seeded: Vec<(String, String)>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            git_token: None,
            openrouter_token: None,
            openrouter_model: DEFAULT_MODEL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            seeded: Vec::new(),
        }
    }
}

impl Credentials {
    /// Resolve credentials from the process environment and the dotenv file at `path`.
    pub fn load(path: &Path) -> Self {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Resolve credentials using `lookup` as the process environment.
    ///
    /// A missing or unreadable dotenv file is not an error; unparsable lines
    /// are logged and skipped.
    pub fn load_with<F>(path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut seeded: Vec<(String, String)> = Vec::new();

        if path.exists() {
            match dotenvy::from_path_iter(path) {
                Ok(iter) => {
                    for item in iter {
                        match item {
                            Ok((key, value)) => {
                                let key = key.trim().to_string();
                                let value = value.trim().to_string();
                                if key.is_empty() || value.is_empty() {
                                    continue;
                                }
                                if lookup(&key).is_some() || seeded.iter().any(|(k, _)| *k == key)
                                {
                                    continue;
                                }
                                seeded.push((key, value));
                            }
                            Err(e) => {
                                let path = path.display();
                                tracing::warn!("Skipping unreadable line in {}: {}", path, e)
                            }
                        }
                    }
                }
                Err(e) => tracing::warn!("Could not read {}: {}", path.display(), e),
            }
        }

        let get = |key: &str| -> Option<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| {
                    seeded
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v.clone())
                })
        };

        Self {
            git_token: get(GIT_TOKEN),
            openrouter_token: get(OPENROUTER_TOKEN),
            openrouter_model: get(OPENROUTER_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            lang: get(FLO_LANG).unwrap_or_else(|| DEFAULT_LANG.to_string()),
            seeded,
        }
    }

    /// Names of the tokens that are not configured.
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.git_token.is_none() {
            missing.push(GIT_TOKEN);
        }
        if self.openrouter_token.is_none() {
            missing.push(OPENROUTER_TOKEN);
        }
        missing
    }

    /// Environment to layer over the inherited one when spawning claude-flow.
    pub fn child_env(&self) -> Vec<(String, String)> {
        let mut env = self.seeded.clone();
        let mut set = |key: &str, value: Option<&str>| {
            if let Some(value) = value {
                env.retain(|(k, _)| k != key);
                env.push((key.to_string(), value.to_string()));
            }
        };
        set(GIT_TOKEN, self.git_token.as_deref());
        set(OPENROUTER_TOKEN, self.openrouter_token.as_deref());
        set(OPENROUTER_MODEL, Some(self.openrouter_model.as_str()));
        set(FLO_LANG, Some(self.lang.as_str()));
        env
    }

    /// Overwrite the dotenv file with the four known keys.
    ///
    /// The file is replaced wholesale; other keys it contained are dropped.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = String::new();
        let entries = [
            (GIT_TOKEN, self.git_token.as_deref()),
            (OPENROUTER_TOKEN, self.openrouter_token.as_deref()),
            (OPENROUTER_MODEL, Some(self.openrouter_model.as_str())),
            (FLO_LANG, Some(self.lang.as_str())),
        ];
        for (key, value) in entries {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            if value.contains(char::is_whitespace) || value.contains('#') {
                content.push_str(&format!("{key}=\"{value}\"\n"));
            } else {
                content.push_str(&format!("{key}={value}\n"));
            }
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_dotenv_fills_gaps_environment_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(ENV_FILE);
        fs::write(
            &path,
            "# tokens\n\nGIT_TOKEN=from-file\nOPENROUTER_TOKEN=or-file\nEXTRA=1\n",
        )
        .unwrap();
        let process = env(&[("GIT_TOKEN", "from-env")]);

        let creds = Credentials::load_with(&path, |k| process.get(k).cloned());
        assert_eq!(creds.git_token.as_deref(), Some("from-env"));
        assert_eq!(creds.openrouter_token.as_deref(), Some("or-file"));
        assert_eq!(creds.openrouter_model, DEFAULT_MODEL);
        assert_eq!(creds.lang, DEFAULT_LANG);
        assert!(creds.seeded.contains(&("EXTRA".to_string(), "1".to_string())));
        assert!(!creds.seeded.iter().any(|(k, _)| k == "GIT_TOKEN"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let creds = Credentials::load_with(&dir.path().join(ENV_FILE), |_| None);
        assert_eq!(creds, Credentials::default());
        assert_eq!(creds.missing_tokens(), vec![GIT_TOKEN, OPENROUTER_TOKEN]);
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(ENV_FILE);
        fs::write(&path, "OPENROUTER_TOKEN=\nOPENROUTER_MODEL=meta/llama\n").unwrap();

        let creds = Credentials::load_with(&path, |_| None);
        assert!(creds.openrouter_token.is_none());
        assert_eq!(creds.openrouter_model, "meta/llama");
    }

    #[test]
    fn test_save_rewrites_file_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(ENV_FILE);
        fs::write(&path, "UNRELATED=keep-me\n").unwrap();

        let creds = Credentials {
            git_token: Some("ghp_123".to_string()),
            openrouter_token: None,
            openrouter_model: "qwen/qwen3-coder:free".to_string(),
            lang: "de".to_string(),
            seeded: Vec::new(),
        };
        creds.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("GIT_TOKEN=ghp_123"));
        assert!(content.contains("FLO_LANG=de"));
        assert!(!content.contains("UNRELATED"));
        assert!(!content.contains("OPENROUTER_TOKEN"));

        let reloaded = Credentials::load_with(&path, |_| None);
        assert_eq!(reloaded.git_token.as_deref(), Some("ghp_123"));
        assert_eq!(reloaded.lang, "de");
    }

    #[test]
    fn test_child_env_includes_seeded_and_resolved() {
        let creds = Credentials {
            git_token: Some("g".to_string()),
            seeded: vec![("EXTRA".to_string(), "1".to_string())],
            ..Credentials::default()
        };
        let child = creds.child_env();
        assert!(child.contains(&("EXTRA".to_string(), "1".to_string())));
        assert!(child.contains(&("GIT_TOKEN".to_string(), "g".to_string())));
        assert!(child.contains(&(OPENROUTER_MODEL.to_string(), DEFAULT_MODEL.to_string())));
        assert!(!child.iter().any(|(k, _)| k == OPENROUTER_TOKEN));
    }
}
