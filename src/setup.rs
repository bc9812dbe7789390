//! Best-effort bootstrap of the external toolchain, then credential loading.
//!
//! ```text
//! node + npm   missing -> sudo apt-get update -y; sudo apt-get install -y nodejs npm
//! claude       missing -> sudo npm install -g @anthropic-ai/claude-code
//! claude-flow  present -> compare `claude-flow --version`; absent -> npx fetches on demand
//! screen       missing -> sudo apt-get install -y screen
//! ```
//!
//! Nothing here is fatal. Every failure is a warning and the bootstrap always
//! returns the resolved [`Credentials`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::flo_config::SetupSection;
use crate::runner::{CommandRunner, RunRequest};

/// Upper bound for a single install or probe command.
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Checks tools on the PATH and installs the missing ones.
pub struct Bootstrap<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a SetupSection,
    cwd: PathBuf,
    is_installed: Box<dyn Fn(&str) -> bool + Send + Sync + 'a>,
}

impl<'a> Bootstrap<'a> {
    /// Bootstrap that probes the real PATH with `which`.
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a SetupSection, cwd: &Path) -> Self {
        Self {
            runner,
            settings,
            cwd: cwd.to_path_buf(),
            is_installed: Box::new(|tool| which::which(tool).is_ok()),
        }
    }

    /// Replace the PATH probe, for tests.
    pub fn with_probe<F>(mut self, probe: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'a,
    {
        self.is_installed = Box::new(probe);
        self
    }

    pub async fn run(&self) {
        if self.has("node") && self.has("npm") {
            tracing::info!("Node.js and npm are available");
        } else {
            tracing::warn!("Node.js or npm not found");
            self.install(&["sudo", "apt-get", "update", "-y"]).await;
            self.install(&["sudo", "apt-get", "install", "-y", "nodejs", "npm"])
                .await;
        }

        if self.has("claude") {
            tracing::info!("'claude' is available");
        } else {
            tracing::warn!("'claude' not found");
            self.install(&["sudo", "npm", "install", "-g", "@anthropic-ai/claude-code"])
                .await;
        }

        if self.has("claude-flow") {
            self.check_flow_version().await;
        } else {
            tracing::warn!("'claude-flow' is not installed globally, npx will fetch it on demand");
        }

        if !self.has("screen") {
            tracing::warn!("'screen' not found, background sessions need it");
            self.install(&["sudo", "apt-get", "install", "-y", "screen"])
                .await;
        }
    }

    fn has(&self, tool: &str) -> bool {
        (self.is_installed)(tool)
    }

    async fn install(&self, command: &[&str]) {
        if !self.settings.auto_install {
            tracing::warn!("Automatic install disabled, skipping: {}", command.join(" "));
            return;
        }
        let Some((program, args)) = command.split_first() else {
            return;
        };
        let mut request = RunRequest::new(
            *program,
            args.iter().map(|a| a.to_string()).collect(),
            self.cwd.clone(),
        );
        request.timeout = Some(INSTALL_TIMEOUT);

        tracing::info!("Running: {}", request.command_line());
        match self.runner.run(&request).await {
            Ok(invocation) if invocation.success() => {}
            Ok(invocation) => tracing::warn!(
                "`{}` exited with code {:?}",
                request.command_line(),
                invocation.exit_code
            ),
            Err(e) => tracing::warn!("{}", e),
        }
    }

    /// Returns the version string reported by claude-flow, if any.
    async fn check_flow_version(&self) -> Option<String> {
        let mut request = RunRequest::new(
            "claude-flow",
            vec!["--version".to_string()],
            self.cwd.clone(),
        );
        request.capture = true;
        request.timeout = Some(Duration::from_secs(30));

        let version = match self.runner.run(&request).await {
            Ok(invocation) => invocation.stdout_trimmed().to_string(),
            Err(e) => {
                tracing::warn!("Could not read the claude-flow version: {}", e);
                return None;
            }
        };
        tracing::info!("claude-flow found (version {})", version);
        if !version.contains(&self.settings.expected_flow_version) {
            tracing::warn!(
                "claude-flow version '{}' is untested, expected {}",
                version,
                self.settings.expected_flow_version
            );
        }
        Some(version)
    }
}

/// Probe and install prerequisites unless disabled, then load credentials.
pub async fn ensure_environment(config: &Config, runner: &dyn CommandRunner) -> Credentials {
    if config.runs_setup() {
        Bootstrap::new(runner, &config.settings.setup, &config.project_dir)
            .run()
            .await;
    } else {
        tracing::debug!("Skipping environment setup");
    }

    let credentials = Credentials::load(&config.env_file);
    for key in credentials.missing_tokens() {
        tracing::warn!("{} is not set; add it to .env or the environment", key);
    }
    credentials
}
