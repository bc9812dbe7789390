//! Project orchestration: from a free-text idea to a populated directory and
//! a fixed sequence of claude-flow calls.
//!
//! ```text
//! create_project(idea, template)
//!   1. slugify(idea)                      -> <base>/<slug>
//!   2. create the directory (reused if present)
//!   3. concept/requirements/design/testing documents, if a generator is set
//!   4. scaffold src/, tests/ and template starter files
//!   5. init, unless <slug>/.hive-mind exists
//!   6. SPARC full workflow
//!   7. lifecycle: requirements, design, implementation, testing, deployment
//!   8. template steps
//!   9. monitor and self-heal
//! ```
//!
//! Every step after the directory creation is best-effort: failures are
//! logged and the next step runs anyway.

pub mod scaffold;
pub mod slug;
pub mod template;

pub use scaffold::scaffold;
pub use slug::slugify;
pub use template::{Template, TemplateChoice, TemplateStep, infer_template};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::flo_config::{ErrorPolicy, HealSection};
use crate::flow::FlowCli;
use crate::generator::{
    DocumentGenerator, DocumentKind, OpenRouterClient, condense_idea, generate_with_policy,
};

/// Marker directory claude-flow leaves behind after `init`.
pub const HIVE_MARKER: &str = ".hive-mind";

/// Session id handed to the monitor at the end of project creation.
pub const PLACEHOLDER_SESSION: &str = "session-placeholder";

pub struct ProjectManager {
    cli: Arc<FlowCli>,
    generator: Option<Arc<dyn DocumentGenerator>>,
    policy: ErrorPolicy,
    base_dir: PathBuf,
    heal: HealSection,
}

/// What the full automation run produced.
#[derive(Debug, Clone)]
pub struct AutomationOutcome {
    pub project_dir: PathBuf,
    pub performance_report: String,
}

impl ProjectManager {
    pub fn new(cli: Arc<FlowCli>, base_dir: PathBuf) -> Self {
        Self {
            cli,
            generator: None,
            policy: ErrorPolicy::default(),
            base_dir,
            heal: HealSection::default(),
        }
    }

    /// Wire the manager from runtime configuration.
    ///
    /// A document generator is attached only when an OpenRouter token is
    /// available; otherwise document generation is skipped with a warning.
    pub fn from_config(
        config: &Config,
        cli: Arc<FlowCli>,
        credentials: &Credentials,
        base_dir: Option<&Path>,
    ) -> Self {
        let settings = &config.settings;
        let mut manager = Self::new(cli, config.projects_dir(base_dir))
            .with_heal(settings.heal.clone());
        manager.policy = settings.generator.on_error;

        match credentials.openrouter_token.as_deref() {
            Some(token) => match OpenRouterClient::from_settings(
                &settings.generator,
                token,
                credentials.openrouter_model.as_str(),
            ) {
                Ok(client) => {
                    manager.generator = Some(Arc::new(client));
                }
                Err(e) => tracing::warn!("Document generation disabled: {}", e),
            },
            None => tracing::warn!(
                "No OPENROUTER_TOKEN found, project documents will not be generated"
            ),
        }
        manager
    }

    pub fn with_generator(
        mut self,
        generator: Arc<dyn DocumentGenerator>,
        policy: ErrorPolicy,
    ) -> Self {
        self.generator = Some(generator);
        self.policy = policy;
        self
    }

    pub fn with_heal(mut self, heal: HealSection) -> Self {
        self.heal = heal;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn cli(&self) -> &FlowCli {
        &self.cli
    }

    /// Create or reuse the project directory for `idea` and run the whole
    /// orchestration sequence against it.
    ///
    /// Only a failure to create the project directory is returned as an
    /// error. Everything else is logged and skipped.
    pub async fn create_project(&self, idea: &str, template: Option<&str>) -> Result<PathBuf> {
        let slug = slugify(idea);
        let project_dir = self.base_dir.join(&slug);

        if project_dir.exists() {
            tracing::info!(
                "Project directory {} already exists, files may be overwritten",
                project_dir.display()
            );
        }
        fs::create_dir_all(&project_dir).with_context(|| {
            format!(
                "Failed to create project directory {}",
                project_dir.display()
            )
        })?;
        tracing::info!("Project directory: {}", project_dir.display());

        self.write_documents(&project_dir, idea).await;

        let choice = TemplateChoice::resolve(template);
        let written = scaffold(&project_dir, choice.template());
        for path in &written {
            tracing::debug!("Scaffolded {}", path.display());
        }

        if project_dir.join(HIVE_MARKER).exists() {
            tracing::info!(
                "Hive-mind already initialised in {}, skipping init",
                project_dir.display()
            );
        } else {
            self.cli.init(Some(&slug), true, true).await;
        }

        tracing::info!("Starting SPARC workflow for '{}'", idea);
        self.cli.sparc_full_workflow(idea, true, true).await;
        self.run_sdlc_workflow(idea).await;

        if let Some(notice) = choice.notice() {
            tracing::warn!("{}", notice);
        }
        if let TemplateChoice::Known(template) = choice {
            tracing::info!("Applying template '{}'", template.tag());
            self.apply_template(template, idea).await;
        }

        self.monitor_and_self_heal(PLACEHOLDER_SESSION).await;
        Ok(project_dir)
    }

    async fn write_documents(&self, project_dir: &Path, idea: &str) {
        let Some(generator) = &self.generator else {
            return;
        };
        let prompt = condense_idea(idea);

        for kind in DocumentKind::ALL {
            let result =
                generate_with_policy(generator.as_ref(), self.policy, &prompt, idea, kind).await;
            let text = match result {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Could not generate {} document: {}", kind, e);
                    continue;
                }
            };
            let path = project_dir.join(kind.file_name());
            match fs::write(&path, text) {
                Ok(()) => tracing::info!("Saved {} to {}", kind.title(), path.display()),
                Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
            }
        }
    }

    async fn apply_template(&self, template: Template, feature: &str) {
        for step in template.steps(feature) {
            match step {
                TemplateStep::Sparc {
                    mode,
                    task,
                    batch_optimize,
                } => {
                    self.cli.sparc_run(mode, &task, true, batch_optimize).await;
                }
                TemplateStep::Release { version } => {
                    self.cli.github_release_coord(version, true).await;
                }
                TemplateStep::PullRequests => {
                    self.cli.github_pr_manage(None, true).await;
                }
            }
        }
    }

    /// Requirements, design, implementation, testing and deployment, each
    /// followed by an [`auto_correct`](Self::auto_correct) check.
    pub async fn run_sdlc_workflow(&self, feature: &str) {
        tracing::info!("Lifecycle: requirements");
        self.cli
            .sparc_run(
                "spec-pseudocode",
                &format!("Analyse requirements for {}", feature),
                true,
                false,
            )
            .await;
        self.auto_correct().await;

        tracing::info!("Lifecycle: design");
        self.cli
            .sparc_run(
                "architect",
                &format!("Design architecture for {}", feature),
                true,
                false,
            )
            .await;
        self.auto_correct().await;

        tracing::info!("Lifecycle: implementation");
        self.cli
            .sparc_tdd(&format!("implement {}", feature), true)
            .await;
        self.auto_correct().await;

        tracing::info!("Lifecycle: testing");
        self.cli
            .sparc_run("testing", &format!("Run tests for {}", feature), true, false)
            .await;
        self.auto_correct().await;

        tracing::info!("Lifecycle: deployment");
        self.cli.github_release_coord("0.1.0", true).await;
        self.cli
            .sparc_run("ci-cd", &format!("deploy {}", feature), true, false)
            .await;
        self.auto_correct().await;
    }

    /// Launch a fix swarm when the memory holds entries matching the heal keyword.
    ///
    /// Returns whether the corrective swarm was started.
    pub async fn auto_correct(&self) -> bool {
        let found = self
            .cli
            .memory_query(&self.heal.keyword, None, Some(self.heal.correct_limit))
            .await;
        if self.heal.triggers(&found) {
            tracing::warn!("Errors found in memory, starting fix swarm");
            self.cli.swarm("Fix detected errors", true, None).await;
            true
        } else {
            false
        }
    }

    /// Check a session for errors, then run the retry and optimisation passes.
    pub async fn monitor_and_self_heal(&self, session_id: &str) {
        tracing::info!("Monitoring session {} for errors", session_id);
        let found = self
            .cli
            .memory_query(&self.heal.keyword, None, Some(self.heal.query_limit))
            .await;
        if self.heal.triggers(&found) {
            tracing::warn!("Errors found, starting fix swarm");
            self.cli.swarm("Fix detected errors", true, None).await;
        } else {
            tracing::info!("No errors found in memory");
        }

        self.cli.fault_tolerance_retry().await;
        self.cli.bottleneck_auto_optimize().await;
        tracing::info!("Self-heal pass finished");
    }

    /// Project creation followed by the AI-guided SPARC pass, self-healing,
    /// a performance report and a 1.0.0 release.
    pub async fn run_full_automation(
        &self,
        idea: &str,
        template: Option<&str>,
    ) -> Result<AutomationOutcome> {
        let project_dir = self.create_project(idea, template).await?;

        self.cli.sparc_workflow_all(true, true).await;
        self.cli.sparc_mode("neural-tdd", true).await;
        self.cli.health_auto_heal().await;
        self.cli.bottleneck_auto_optimize().await;
        let performance_report = self.cli.performance_report().await;
        self.cli.github_release_coord("1.0.0", true).await;

        Ok(AutomationOutcome {
            project_dir,
            performance_report,
        })
    }

    /// Names of the project directories under the base dir, sorted.
    pub fn list_projects(&self) -> Result<Vec<String>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.base_dir).with_context(|| {
            format!("Failed to read projects directory {}", self.base_dir.display())
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
