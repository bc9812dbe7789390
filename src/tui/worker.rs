//! Background execution of TUI actions.
//!
//! Each job gets its own `std::thread` that drives the shared tokio runtime
//! with `block_on` and reports back over an mpsc channel. Jobs are never
//! cancelled; they run to completion or to the subprocess timeout.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tokio::runtime::Handle;

use super::app::{Action, Job, WorkerEvent};
use crate::catalog::DEFAULT_BACKUP_FILE;
use crate::chat::ChatSession;
use crate::config::Config;
use crate::credentials::Credentials;
use crate::flow::{FlowCli, scoped_transcript};
use crate::menu::{LOG_TAIL_LINES, tail_lines};
use crate::monitor;
use crate::palette::{self, PaletteArgs};
use crate::project::ProjectManager;

/// Everything a job may touch.
pub struct Services {
    config: Config,
    cli: Arc<FlowCli>,
    credentials: Credentials,
    projects: Arc<ProjectManager>,
}

impl Services {
    pub fn new(config: Config, cli: Arc<FlowCli>, credentials: Credentials) -> Self {
        let projects = Arc::new(ProjectManager::from_config(
            &config,
            cli.clone(),
            &credentials,
            None,
        ));
        Self {
            config,
            cli,
            credentials,
            projects,
        }
    }

    /// Run a job on a worker thread.
    pub fn spawn(&self, job: Job, handle: Handle, events: Sender<WorkerEvent>) {
        let cli = self.cli.clone();
        let projects = self.projects.clone();
        let log_file = self.config.log_file.clone();
        thread::spawn(move || {
            let title = job.action.label().to_string();
            let (mut output, collected) =
                handle.block_on(scoped_transcript(perform(&cli, &projects, &log_file, &job)));
            output.extend(collected);
            if output.is_empty() {
                output.push("(done)".to_string());
            }
            // The receiver is gone once the UI has quit.
            let _ = events.send(WorkerEvent::Finished { title, output });
        });
    }

    /// Apply a UI-thread action and return the lines to show.
    pub fn apply_local(&mut self, job: &Job) -> Result<Vec<String>> {
        let value = job.input(0).map(str::to_string);
        let mut updated = self.credentials.clone();
        match job.action {
            Action::ShowConfig => return Ok(self.describe()),
            Action::SetGitToken => updated.git_token = value,
            Action::SetOpenRouterToken => updated.openrouter_token = value,
            Action::SetModel => {
                if let Some(model) = value {
                    updated.openrouter_model = model;
                }
            }
            Action::SetLang => {
                if let Some(lang) = value {
                    updated.lang = lang;
                }
            }
            other => anyhow::bail!("'{}' does not run on the UI thread", other.label()),
        }

        updated.save(&self.config.env_file)?;
        self.credentials = updated;
        self.cli.set_child_env(self.credentials.child_env());
        self.projects = Arc::new(ProjectManager::from_config(
            &self.config,
            self.cli.clone(),
            &self.credentials,
            None,
        ));
        Ok(vec![format!(
            "Saved to {}",
            self.config.env_file.display()
        )])
    }

    fn describe(&self) -> Vec<String> {
        let mask = |token: &Option<String>| match token {
            Some(_) => "set".to_string(),
            None => "not set".to_string(),
        };
        vec![
            format!("Project dir:      {}", self.config.project_dir.display()),
            format!("Projects base:    {}", self.projects.base_dir().display()),
            format!("GIT_TOKEN:        {}", mask(&self.credentials.git_token)),
            format!("OPENROUTER_TOKEN: {}", mask(&self.credentials.openrouter_token)),
            format!("OPENROUTER_MODEL: {}", self.credentials.openrouter_model),
            format!("FLO_LANG:         {}", self.credentials.lang),
            format!("Log file:         {}", self.config.log_file.display()),
        ]
    }
}

/// Run one job to completion and collect its display lines.
pub async fn perform(
    cli: &FlowCli,
    projects: &ProjectManager,
    log_file: &Path,
    job: &Job,
) -> Vec<String> {
    match job.action {
        Action::CreateProject => {
            let Some(idea) = job.input(0) else {
                return vec!["An idea is required".to_string()];
            };
            match projects.create_project(idea, job.input(1)).await {
                Ok(path) => vec![format!("Project ready at {}", path.display())],
                Err(e) => vec![format!("{:#}", e)],
            }
        }
        Action::FullAutomation => {
            let Some(idea) = job.input(0) else {
                return vec!["An idea is required".to_string()];
            };
            match projects.run_full_automation(idea, job.input(1)).await {
                Ok(outcome) => vec![
                    format!("Project ready at {}", outcome.project_dir.display()),
                    outcome.performance_report,
                ],
                Err(e) => vec![format!("{:#}", e)],
            }
        }
        Action::ListProjects => match projects.list_projects() {
            Ok(names) if names.is_empty() => {
                vec![format!("No projects in {}", projects.base_dir().display())]
            }
            Ok(names) => names,
            Err(e) => vec![format!("{:#}", e)],
        },
        Action::InitProject => {
            cli.init(job.input(0), false, false).await;
            Vec::new()
        }
        Action::Dashboard => vec![monitor::render_dashboard(&monitor::dashboard(cli).await)],
        Action::HiveStatus => vec![cli.hive_status().await],
        Action::HiveSessions => vec![cli.hive_sessions().await],
        Action::MonitorHeal => {
            if let Some(session) = job.input(0) {
                projects.monitor_and_self_heal(session).await;
            }
            Vec::new()
        }
        Action::SelfHeal => {
            cli.health_auto_heal().await;
            cli.fault_tolerance_retry().await;
            cli.bottleneck_auto_optimize().await;
            Vec::new()
        }
        Action::SendChat => {
            let (Some(session), Some(message)) = (job.input(0), job.input(1)) else {
                return vec!["Nothing to send".to_string()];
            };
            ChatSession::new(session).send(cli, message).await;
            vec![format!("you: {}", message)]
        }
        Action::Palette => {
            let request = job.input(0).unwrap_or_default();
            let Some(action) = palette::resolve(request) else {
                return vec!["No matching command".to_string()];
            };
            let args = PaletteArgs {
                description: Some(request.to_string()),
                ..PaletteArgs::default()
            };
            let mut lines = vec![format!("→ {}", action)];
            lines.extend(palette::perform(cli, action, &args).await);
            lines
        }
        Action::SecurityScan => {
            cli.security_scan_full(true, true, true).await;
            Vec::new()
        }
        Action::MetricsCollect => cli
            .metrics_collect_full()
            .await
            .into_iter()
            .map(|(title, body)| format!("[{}]\n{}", title, body))
            .collect(),
        Action::Backup => {
            cli.backup_create(job.input(0).unwrap_or(DEFAULT_BACKUP_FILE))
                .await;
            Vec::new()
        }
        Action::ShowHistory => {
            let history = cli.history();
            if history.is_empty() {
                vec!["No commands issued yet".to_string()]
            } else {
                history
            }
        }
        Action::ShowLogs => match tail_lines(log_file, LOG_TAIL_LINES) {
            Ok(lines) => lines,
            Err(e) => vec![format!("{:#}", e)],
        },
        Action::PerformanceReport => vec![cli.performance_report().await],
        Action::MonitoringReport => vec![monitor::report(cli).await],
        Action::SaveReport => {
            let Some(file) = job.input(0) else {
                return vec!["A file name is required".to_string()];
            };
            let report = monitor::report(cli).await;
            match monitor::save_report(&report, Path::new(file)) {
                Ok(()) => vec![format!("Report written to {}", file)],
                Err(e) => vec![format!("{:#}", e)],
            }
        }
        Action::SetChatSession
        | Action::ShowConfig
        | Action::SetGitToken
        | Action::SetOpenRouterToken
        | Action::SetModel
        | Action::SetLang => vec![format!("'{}' is handled by the UI", job.action.label())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::OutputMode;
    use crate::flow::testing::{argv, issued};
    use crate::runner::DryRunRunner;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn job(action: Action, inputs: &[&str]) -> Job {
        Job {
            action,
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn collecting_cli(dir: &Path) -> (Arc<FlowCli>, Arc<DryRunRunner>) {
        let runner = Arc::new(DryRunRunner::new());
        let cli = FlowCli::new(runner.clone(), dir.to_path_buf())
            .with_output_mode(OutputMode::Collect);
        (Arc::new(cli), runner)
    }

    #[tokio::test]
    async fn test_chat_job() {
        let dir = tempdir().unwrap();
        let (cli, runner) = collecting_cli(dir.path());
        let projects = ProjectManager::new(cli.clone(), dir.path().join("projects"));

        let lines = perform(
            &cli,
            &projects,
            &dir.path().join("flo.log"),
            &job(Action::SendChat, &["s1", "hello"]),
        )
        .await;
        assert_eq!(lines, vec!["you: hello"]);
        assert_eq!(
            issued(&runner),
            vec![
                argv(&["swarm", "hello", "--claude", "--continue-session"]),
                argv(&["memory", "store", "chat-s1", "hello"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_palette_job_uses_request_as_task() {
        let dir = tempdir().unwrap();
        let (cli, runner) = collecting_cli(dir.path());
        let projects = ProjectManager::new(cli.clone(), dir.path().join("projects"));

        let lines = perform(
            &cli,
            &projects,
            &dir.path().join("flo.log"),
            &job(Action::Palette, &["start swarm for docs"]),
        )
        .await;
        assert_eq!(lines, vec!["→ start swarm"]);
        assert_eq!(issued(&runner), vec![argv(&["swarm", "start swarm for docs", "--claude"])]);
    }

    #[tokio::test]
    async fn test_list_projects_job() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("projects/b-app")).unwrap();
        fs::create_dir_all(dir.path().join("projects/a-app")).unwrap();
        let (cli, _runner) = collecting_cli(dir.path());
        let projects = ProjectManager::new(cli.clone(), dir.path().join("projects"));

        let lines = perform(
            &cli,
            &projects,
            &dir.path().join("flo.log"),
            &job(Action::ListProjects, &[]),
        )
        .await;
        assert_eq!(lines, vec!["a-app", "b-app"]);
    }

    #[test]
    fn test_spawned_job_reports_transcript() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, true, true, None).unwrap();
        let (cli, _runner) = collecting_cli(dir.path());
        let services = Services::new(config, cli, Credentials::default());

        let rt = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = mpsc::channel();
        services.spawn(job(Action::SelfHeal, &[]), rt.handle().clone(), tx);

        let WorkerEvent::Finished { title, output } = rx.recv().unwrap();
        assert_eq!(title, "Self-heal now");
        // the recorder produces no output
        assert_eq!(output, vec!["(done)"]);
    }

    #[test]
    fn test_local_credential_update_saves_env() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, true, true, None).unwrap();
        let (cli, runner) = collecting_cli(dir.path());
        let mut services = Services::new(config, cli.clone(), Credentials::default());

        let lines = services
            .apply_local(&job(Action::SetModel, &["openai/gpt-4o"]))
            .unwrap();
        assert!(lines[0].starts_with("Saved to"));

        let saved = fs::read_to_string(dir.path().join(".env")).unwrap();
        assert!(saved.contains("OPENROUTER_MODEL=openai/gpt-4o"));

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(cli.hive_status());
        assert!(
            runner.requests()[0]
                .env
                .contains(&("OPENROUTER_MODEL".to_string(), "openai/gpt-4o".to_string()))
        );
    }

    #[test]
    fn test_show_config_masks_tokens() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), false, true, true, None).unwrap();
        let (cli, _runner) = collecting_cli(dir.path());
        let credentials = Credentials {
            git_token: Some("ghp_secret".to_string()),
            ..Credentials::default()
        };
        let mut services = Services::new(config, cli, credentials);

        let lines = services.apply_local(&job(Action::ShowConfig, &[])).unwrap();
        let text = lines.join("\n");
        assert!(text.contains("GIT_TOKEN:        set"));
        assert!(text.contains("OPENROUTER_TOKEN: not set"));
        assert!(!text.contains("ghp_secret"));
    }
}
