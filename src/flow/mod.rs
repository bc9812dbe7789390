//! Command facade over `npx claude-flow@alpha`.
//!
//! [`FlowCli`] is the single chokepoint through which flo talks to claude-flow.
//! Each domain operation assembles a fixed-shape argument vector and hands it
//! to [`FlowCli::execute`] (fire-and-forget) or [`FlowCli::execute_capturing`]
//! (returns trimmed stdout). Neither ever fails: launch errors and timeouts
//! are logged and turned into diagnostic text. Callers that need the exit
//! code use [`FlowCli::run`], which returns the structured [`Invocation`].
//!
//! ```text
//! flow/
//! ├── mod.rs          FlowCli core: run, execute, capture, history, background
//! ├── args.rs         ArgList builder
//! ├── hive.rs         init, hive-mind, recovery and self-heal commands
//! ├── swarm.rs        swarm lifecycle and coordination
//! ├── memory.rs       memory namespace operations
//! ├── neural.rs       neural and cognitive models
//! ├── workflow.rs     workflows, batches and pipelines
//! ├── github.rs       GitHub integration modes
//! ├── daa.rs          dynamic agent architecture
//! ├── security.rs     scans, metrics and audits
//! ├── performance.rs  reports, benchmarks and health checks
//! ├── system.rs       backup, config, logs and hooks
//! └── sparc.rs        SPARC modes and composite workflows
//! ```

pub mod args;
mod daa;
mod github;
mod hive;
mod memory;
mod neural;
mod performance;
mod security;
mod sparc;
mod swarm;
mod system;
mod workflow;

pub use args::ArgList;
pub use daa::AgentSpec;
pub use hive::{HIVE_PATTERNS, HivePattern};
pub use neural::DEFAULT_EPOCHS;

use std::cell::RefCell;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::Config;
use crate::errors::RunError;
use crate::runner::{CommandRunner, Invocation, RunRequest};

/// Where the output of fire-and-forget calls goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Child processes write straight to the terminal.
    #[default]
    Inherit,
    /// Output is captured into the transcript; used when a TUI owns the screen.
    Collect,
}

tokio::task_local! {
    static JOB_TRANSCRIPT: RefCell<Vec<String>>;
}

/// Run `job` with a transcript of its own.
///
/// Output collected in [`OutputMode::Collect`] while `job` runs is returned
/// next to its result and never reaches the shared transcript, so concurrent
/// jobs cannot drain each other's lines.
pub async fn scoped_transcript<F: Future>(job: F) -> (F::Output, Vec<String>) {
    JOB_TRANSCRIPT
        .scope(RefCell::new(Vec::new()), async move {
            let output = job.await;
            let lines = JOB_TRANSCRIPT.with(|lines| lines.take());
            (output, lines)
        })
        .await
}

/// Facade over the claude-flow command line.
pub struct FlowCli {
    runner: Arc<dyn CommandRunner>,
    program: String,
    prefix: Vec<String>,
    working_dir: PathBuf,
    timeout: Option<Duration>,
    env: Mutex<Vec<(String, String)>>,
    output: OutputMode,
    session_prefix: String,
    history: Mutex<Vec<String>>,
    transcript: Mutex<Vec<String>>,
}

impl FlowCli {
    /// A facade with the stock `npx claude-flow@alpha` prefix and a 15 second timeout.
    pub fn new(runner: Arc<dyn CommandRunner>, working_dir: PathBuf) -> Self {
        Self {
            runner,
            program: "npx".to_string(),
            prefix: vec!["claude-flow@alpha".to_string()],
            working_dir,
            timeout: Some(Duration::from_secs(15)),
            env: Mutex::new(Vec::new()),
            output: OutputMode::Inherit,
            session_prefix: "claude_flow".to_string(),
            history: Mutex::new(Vec::new()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Build the facade from runtime configuration.
    ///
    /// # Arguments
    /// * `runner`: process runner, or a recorder under `--dry-run`
    /// * `env`: extra child environment, usually [`crate::credentials::Credentials::child_env`]
    pub fn from_config(
        config: &Config,
        runner: Arc<dyn CommandRunner>,
        env: Vec<(String, String)>,
    ) -> Self {
        let runner_settings = &config.settings.runner;
        Self {
            program: runner_settings.executable.clone(),
            prefix: runner_settings.prefix.clone(),
            timeout: config.command_timeout(),
            env: Mutex::new(env),
            session_prefix: runner_settings.background_session_prefix.clone(),
            ..Self::new(runner, config.project_dir.clone())
        }
    }

    pub fn with_output_mode(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_executable(mut self, program: impl Into<String>, prefix: Vec<String>) -> Self {
        self.program = program.into();
        self.prefix = prefix;
        self
    }

    /// Replace the extra child environment, e.g. after credentials change.
    pub fn set_child_env(&self, env: Vec<(String, String)>) {
        if let Ok(mut current) = self.env.lock() {
            *current = env;
        }
    }

    fn child_env(&self) -> Vec<(String, String)> {
        self.env
            .lock()
            .map(|env| env.clone())
            .unwrap_or_default()
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The command line that `args` would produce, prefix included.
    pub fn command_line(&self, args: &[String]) -> String {
        std::iter::once(&self.program)
            .chain(self.prefix.iter())
            .chain(args.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn request(&self, args: &[String], capture: bool) -> RunRequest {
        let mut full_args = self.prefix.clone();
        full_args.extend(args.iter().cloned());
        RunRequest {
            program: self.program.clone(),
            args: full_args,
            cwd: self.working_dir.clone(),
            env: self.child_env(),
            timeout: self.timeout,
            capture,
        }
    }

    /// Run one invocation and return its structured result.
    ///
    /// The argument list is appended to the history once the process has run
    /// to completion, whatever its exit code. Launch failures and timeouts
    /// leave the history untouched.
    pub async fn run(&self, args: Vec<String>, capture: bool) -> Result<Invocation, RunError> {
        let request = self.request(&args, capture);
        tracing::info!("Running: {}", request.command_line());

        let invocation = self.runner.run(&request).await?;
        tracing::debug!(
            "Finished in {:.1}s with exit code {:?}",
            invocation.elapsed.as_secs_f64(),
            invocation.exit_code
        );

        if let Ok(mut history) = self.history.lock() {
            history.push(args.join(" "));
        }
        Ok(invocation)
    }

    /// Fire-and-forget execution. Errors are logged, never returned.
    pub async fn execute(&self, args: impl Into<Vec<String>>) {
        let args = args.into();
        let collect = self.output == OutputMode::Collect;
        match self.run(args, collect).await {
            Ok(invocation) => {
                if collect {
                    self.collect(&invocation);
                }
                if !invocation.success() {
                    tracing::warn!(
                        "claude-flow exited with code {}",
                        invocation
                            .exit_code
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "none (signal)".to_string())
                    );
                }
            }
            Err(e) => tracing::error!("{}", e),
        }
    }

    /// Execute and return trimmed stdout, or a diagnostic line on failure.
    pub async fn execute_capturing(&self, args: impl Into<Vec<String>>) -> String {
        let args = args.into();
        let command_line = self.command_line(&args);
        match self.run(args, true).await {
            Ok(invocation) => invocation.stdout_trimmed().to_string(),
            Err(e) => {
                tracing::error!("{}", e);
                format!("[flo] failed to run {}: {}", command_line, e)
            }
        }
    }

    fn collect(&self, invocation: &Invocation) {
        let lines: Vec<String> = [invocation.stdout.trim(), invocation.stderr.trim()]
            .into_iter()
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();

        let scoped = JOB_TRANSCRIPT.try_with(|job| job.borrow_mut().extend(lines.iter().cloned()));
        if scoped.is_err()
            && let Ok(mut transcript) = self.transcript.lock()
        {
            transcript.extend(lines);
        }
    }

    /// Launch the invocation detached inside a new `screen` session.
    ///
    /// Returns the session name when screen could be started. Background
    /// runs have no timeout and are not recorded in the history.
    pub async fn run_background(&self, args: impl Into<Vec<String>>) -> Option<String> {
        let session = format!(
            "{}_{}",
            self.session_prefix,
            chrono::Utc::now().timestamp()
        );
        let mut screen_args = vec!["-dmS".to_string(), session.clone(), self.program.clone()];
        screen_args.extend(self.prefix.iter().cloned());
        screen_args.extend(args.into());

        let request = RunRequest {
            program: "screen".to_string(),
            args: screen_args,
            cwd: self.working_dir.clone(),
            env: self.child_env(),
            timeout: None,
            capture: false,
        };
        tracing::info!("Starting background session: {}", request.command_line());

        match self.runner.run(&request).await {
            Ok(_) => {
                tracing::info!("Background session '{}' started", session);
                Some(session)
            }
            Err(e) => {
                tracing::error!("{}", e);
                None
            }
        }
    }

    /// Previously issued argument lists, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    pub fn clear_history(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }

    /// Drain output collected in [`OutputMode::Collect`].
    pub fn take_transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|mut transcript| std::mem::take(&mut *transcript))
            .unwrap_or_default()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{argv, issued, recording_cli};
    use super::*;
    use crate::runner::{DryRunRunner, ProcessRunner};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_history_records_calls_in_order() {
        let (cli, _runner) = recording_cli();
        cli.execute(argv(&["hive-mind", "status"])).await;
        cli.execute(argv(&["swarm", "init"])).await;
        let _ = cli.execute_capturing(argv(&["memory", "stats"])).await;

        assert_eq!(
            cli.history(),
            vec!["hive-mind status", "swarm init", "memory stats"]
        );
        cli.clear_history();
        assert!(cli.history().is_empty());
    }

    #[tokio::test]
    async fn test_prefix_is_prepended() {
        let (cli, runner) = recording_cli();
        cli.execute(argv(&["hive-mind", "sessions"])).await;

        let requests = runner.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].program, "npx");
        assert_eq!(
            requests[0].args,
            vec!["claude-flow@alpha", "hive-mind", "sessions"]
        );
        assert_eq!(requests[0].timeout, Some(Duration::from_secs(15)));
        assert_eq!(issued(&runner), vec![argv(&["hive-mind", "sessions"])]);
    }

    #[tokio::test]
    async fn test_capture_returns_trimmed_stdout() {
        let (cli, runner) = recording_cli();
        runner.respond_with("\n  3 sessions active \n");
        let out = cli.execute_capturing(argv(&["hive-mind", "sessions"])).await;
        assert_eq!(out, "3 sessions active");
        assert!(runner.requests()[0].capture);
    }

    #[tokio::test]
    async fn test_real_process_capture_and_history() {
        let dir = tempdir().unwrap();
        let cli = FlowCli::new(Arc::new(ProcessRunner), dir.path().to_path_buf())
            .with_executable("echo", vec!["flow".to_string()]);

        let out = cli.execute_capturing(argv(&["hive-mind", "status"])).await;
        assert_eq!(out, "flow hive-mind status");
        assert_eq!(cli.history(), vec!["hive-mind status"]);
    }

    #[tokio::test]
    async fn test_nonzero_exit_still_recorded() {
        let dir = tempdir().unwrap();
        let cli = FlowCli::new(Arc::new(ProcessRunner), dir.path().to_path_buf())
            .with_executable("false", Vec::new());

        cli.execute(argv(&["anything"])).await;
        assert_eq!(cli.history(), vec!["anything"]);
    }

    #[tokio::test]
    async fn test_spawn_failure_skips_history() {
        let dir = tempdir().unwrap();
        let cli = FlowCli::new(Arc::new(ProcessRunner), dir.path().to_path_buf())
            .with_executable("flo-missing-executable", Vec::new());

        cli.execute(argv(&["swarm", "init"])).await;
        let out = cli.execute_capturing(argv(&["hive-mind", "status"])).await;

        assert!(out.starts_with("[flo] failed to run flo-missing-executable hive-mind status"));
        assert!(cli.history().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_skips_history() {
        let dir = tempdir().unwrap();
        let cli = FlowCli::new(Arc::new(ProcessRunner), dir.path().to_path_buf())
            .with_executable("sleep", Vec::new())
            .with_timeout(Some(Duration::from_millis(200)));

        let out = cli.execute_capturing(argv(&["5"])).await;
        assert!(out.contains("timed out"));
        assert!(cli.history().is_empty());
    }

    #[tokio::test]
    async fn test_collect_mode_fills_transcript() {
        let dir = tempdir().unwrap();
        let cli = FlowCli::new(Arc::new(ProcessRunner), dir.path().to_path_buf())
            .with_executable("echo", Vec::new())
            .with_output_mode(OutputMode::Collect);

        cli.execute(argv(&["swarm", "monitor"])).await;
        assert_eq!(cli.take_transcript(), vec!["swarm monitor"]);
        assert!(cli.take_transcript().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_jobs_keep_their_own_output() {
        let dir = tempdir().unwrap();
        let cli = FlowCli::new(Arc::new(ProcessRunner), dir.path().to_path_buf())
            .with_executable("sh", vec!["-c".to_string()])
            .with_output_mode(OutputMode::Collect);

        let slow = scoped_transcript(cli.execute(argv(&["sleep 0.3; echo job-A-output"])));
        let fast = scoped_transcript(cli.execute(argv(&["echo job-B-output"])));
        let (((), slow_lines), ((), fast_lines)) = tokio::join!(slow, fast);

        assert_eq!(slow_lines, vec!["job-A-output"]);
        assert_eq!(fast_lines, vec!["job-B-output"]);
        assert!(cli.take_transcript().is_empty());
    }

    #[tokio::test]
    async fn test_run_background_uses_screen() {
        let runner = Arc::new(DryRunRunner::new());
        let cli = FlowCli::new(runner.clone(), std::env::temp_dir());

        let session = cli
            .run_background(argv(&["swarm", "long task", "--claude"]))
            .await
            .unwrap();
        assert!(session.starts_with("claude_flow_"));

        let requests = runner.requests();
        assert_eq!(requests[0].program, "screen");
        assert_eq!(requests[0].timeout, None);
        assert_eq!(
            requests[0].args,
            vec![
                "-dmS".to_string(),
                session,
                "npx".to_string(),
                "claude-flow@alpha".to_string(),
                "swarm".to_string(),
                "long task".to_string(),
                "--claude".to_string(),
            ]
        );
        assert!(cli.history().is_empty());
    }

    #[tokio::test]
    async fn test_child_env_can_be_replaced() {
        let (cli, runner) = recording_cli();
        cli.execute(argv(&["hive-mind", "status"])).await;
        cli.set_child_env(vec![("GIT_TOKEN".to_string(), "ghp_new".to_string())]);
        cli.execute(argv(&["hive-mind", "status"])).await;

        let requests = runner.requests();
        assert!(requests[0].env.is_empty());
        assert_eq!(
            requests[1].env,
            vec![("GIT_TOKEN".to_string(), "ghp_new".to_string())]
        );
    }
}
