//! Process execution seam.
//!
//! Everything flo does to the outside world goes through a [`CommandRunner`].
//! [`ProcessRunner`] spawns real child processes through tokio, while
//! [`DryRunRunner`] only records what would have run. The latter backs the
//! `--dry-run` flag and the unit tests.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::errors::RunError;

/// Environment variable that keeps npm from prompting before fetching a package.
pub const NPM_YES_VAR: &str = "npm_config_yes";

/// A fully-resolved command line plus execution options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Extra environment variables, layered over the inherited environment.
    pub env: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    /// Pipe stdout/stderr instead of inheriting the terminal.
    pub capture: bool,
}

impl RunRequest {
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: PathBuf) -> Self {
        Self {
            program: program.into(),
            args,
            cwd,
            env: Vec::new(),
            timeout: None,
            capture: false,
        }
    }

    /// The full command line as a single display string.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Structured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, request: &RunRequest) -> Result<Invocation, RunError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, request: &RunRequest) -> Result<Invocation, RunError> {
        let started = Instant::now();

        let mut command = Command::new(&request.program);
        command
            .args(&request.args)
            .current_dir(&request.cwd)
            .kill_on_drop(true);

        if std::env::var_os(NPM_YES_VAR).is_none() {
            command.env(NPM_YES_VAR, "true");
        }
        for (key, value) in &request.env {
            command.env(key, value);
        }

        // Uncaptured runs share the terminal so the interactive wizard and
        // chat commands can prompt.
        if request.capture {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        } else {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }

        let child = command.spawn().map_err(|source| RunError::SpawnFailed {
            program: request.program.clone(),
            source,
        })?;

        let output = match request.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result.map_err(RunError::Wait)?,
                // Dropping the future drops the child, and kill_on_drop reaps it.
                Err(_) => {
                    return Err(RunError::Timeout {
                        command: request.command_line(),
                        timeout: limit,
                    });
                }
            },
            None => child.wait_with_output().await.map_err(RunError::Wait)?,
        };

        Ok(Invocation {
            args: request.args.clone(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed: started.elapsed(),
        })
    }
}

/// Records requests instead of executing them.
///
/// Every request is pushed onto an internal log and answered with exit code 0
/// and the configured canned stdout. When `echo` is on, each command line is
/// printed with a `[dry-run]` prefix so `flo --dry-run ...` shows what it
/// would have spawned.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    requests: Mutex<Vec<RunRequest>>,
    stdout: Mutex<String>,
    echo: bool,
}

impl DryRunRunner {
    /// A silent recorder, for tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that prints every command line it receives.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Set the stdout returned for every subsequent request.
    pub fn respond_with(&self, stdout: impl Into<String>) {
        if let Ok(mut guard) = self.stdout.lock() {
            *guard = stdout.into();
        }
    }

    pub fn requests(&self) -> Vec<RunRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Argument vectors of every recorded request, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.requests().into_iter().map(|r| r.args).collect()
    }
}

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, request: &RunRequest) -> Result<Invocation, RunError> {
        if self.echo {
            println!("[dry-run] {}", request.command_line());
        }
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }
        let stdout = self
            .stdout
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        Ok(Invocation {
            args: request.args.clone(),
            exit_code: Some(0),
            stdout,
            stderr: String::new(),
            elapsed: Duration::ZERO,
        })
    }
}
