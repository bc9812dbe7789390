//! Interactive terminal manager (`flo manager`).
//!
//! The first prompt picks a mode:
//!
//! | Mode   | Entries                                                          |
//! |--------|------------------------------------------------------------------|
//! | simple | create, list, monitor & heal, logs, tokens, wizard, exit          |
//! | expert | every facade area through submenus, see [`expert`]                |
//!
//! Prompts validate nothing beyond non-empty strings. Long-running actions
//! run behind a spinner.

mod expert;

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::catalog;
use crate::chat::ChatSession;
use crate::config::Config;
use crate::credentials::Credentials;
use crate::flow::FlowCli;
use crate::monitor;
use crate::palette::{self, PaletteAction, PaletteArgs};
use crate::project::{ProjectManager, Template, infer_template};
use crate::quick::QuickCommands;
use crate::ui::icons::{CHAT, CHECK, FOLDER, REPORT, WARN};
use crate::ui::prompt::{confirm, non_empty, optional, print_section, select, split_params, text};
use crate::ui::{Spinner, with_spinner};

const TEMPLATE_PROMPT: &str = "Template (Agile, DDD, HighPerformance, CICD, WebApp, CLI-Tool, \
                               DataPipeline, Microservices)";

/// Number of log lines shown by the logs entry.
pub const LOG_TAIL_LINES: usize = 20;

pub struct Manager {
    config: Config,
    cli: Arc<FlowCli>,
    pm: ProjectManager,
    credentials: Credentials,
    quick: QuickCommands,
}

const SIMPLE_ITEMS: [&str; 7] = [
    "Create a new project",
    "List projects",
    "Monitor a session and self-heal",
    "Show logs",
    "Configure tokens and model",
    "Project wizard",
    "Exit",
];

impl Manager {
    pub fn new(config: Config, cli: Arc<FlowCli>, credentials: Credentials) -> Self {
        let pm = ProjectManager::from_config(&config, cli.clone(), &credentials, None);
        Self {
            config,
            cli,
            pm,
            credentials,
            quick: QuickCommands::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mode = select(
            "Choose a mode",
            &["Simple mode (core features)", "Expert mode (everything)"],
        )?;
        if mode == 0 {
            self.run_simple().await
        } else {
            self.run_expert().await
        }
    }

    async fn run_simple(&mut self) -> Result<()> {
        loop {
            println!();
            match select("flo", &SIMPLE_ITEMS)? {
                0 => self.create_project().await?,
                1 => self.list_projects(),
                2 => self.monitor_and_heal().await?,
                3 => self.show_logs(),
                4 => self.configure_tokens()?,
                5 => self.wizard().await?,
                _ => break,
            }
        }
        Ok(())
    }

    fn cli(&self) -> &FlowCli {
        &self.cli
    }

    /// Idea, optional template (inferred and confirmed when left blank), create.
    async fn create_project(&self) -> Result<()> {
        let idea = text("Describe the program you want to build")?;
        let mut template = optional(TEMPLATE_PROMPT)?;
        if template.is_none()
            && let Some(suggestion) = infer_template(&idea)
            && confirm(&format!("Use the suggested template '{}'?", suggestion), true)?
        {
            template = Some(suggestion.display_name().to_string());
        }
        self.run_create(&idea, template.as_deref()).await;
        Ok(())
    }

    async fn run_create(&self, idea: &str, template: Option<&str>) {
        println!("{}Creating project for '{}'", FOLDER, style(idea).cyan());
        let spinner = Spinner::start("flo", "Creating project");
        match self.pm.create_project(idea, template).await {
            Ok(path) => spinner.finish_ok(&format!("Project ready at {}", path.display())),
            Err(e) => spinner.finish_err(&format!("{:#}", e)),
        }
    }

    fn list_projects(&self) {
        let projects = match self.pm.list_projects() {
            Ok(projects) => projects,
            Err(e) => {
                println!("{}{:#}", WARN, e);
                return;
            }
        };
        if projects.is_empty() {
            println!("No projects in {}", self.pm.base_dir().display());
            return;
        }
        println!("{}", style("Projects:").bold());
        for name in projects {
            println!("  {}{}", FOLDER, name);
        }
    }

    async fn monitor_and_heal(&self) -> Result<()> {
        let session = text("Session id to monitor")?;
        with_spinner("Monitoring", self.pm.monitor_and_self_heal(&session)).await;
        println!("{}Self-heal pass finished", CHECK);
        Ok(())
    }

    fn show_logs(&self) {
        match tail_lines(&self.config.log_file, LOG_TAIL_LINES) {
            Ok(lines) if lines.is_empty() => println!("The log file is empty."),
            Ok(lines) => {
                let title = format!("Last lines of {}", self.config.log_file.display());
                print_section(&title, "");
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => println!("{}{:#}", WARN, e),
        }
    }

    /// Prompt for the four credential keys, save `.env` and rewire the generator.
    fn configure_tokens(&mut self) -> Result<()> {
        println!("Leave a value blank to keep the current one.");
        let mut updated = self.credentials.clone();
        if let Some(token) = optional("GitHub token (GIT_TOKEN)")? {
            updated.git_token = Some(token);
        }
        if let Some(token) = optional("OpenRouter token (OPENROUTER_TOKEN)")? {
            updated.openrouter_token = Some(token);
        }
        if let Some(model) = optional(&format!(
            "OpenRouter model (currently {})",
            updated.openrouter_model
        ))? {
            updated.openrouter_model = model;
        }
        if let Some(lang) = optional(&format!("Language (currently {})", updated.lang))? {
            updated.lang = lang;
        }
        if self.save_credentials(updated) {
            println!("{}Tokens and model saved to {}", CHECK, self.config.env_file.display());
        }
        Ok(())
    }

    /// Write `.env` and rewire the facade and generator. A failed write is
    /// reported and leaves the current credentials in place.
    fn save_credentials(&mut self, credentials: Credentials) -> bool {
        if let Err(e) = credentials.save(&self.config.env_file) {
            println!("{}{:#}", WARN, e);
            return false;
        }
        self.credentials = credentials;
        self.cli.set_child_env(self.credentials.child_env());
        self.pm =
            ProjectManager::from_config(&self.config, self.cli.clone(), &self.credentials, None);
        true
    }

    /// Idea, template from the catalog list, model, then create.
    async fn wizard(&mut self) -> Result<()> {
        println!("{}", style("Project wizard").bold());
        let idea = text("1) What should the application do? One sentence")?;
        let labels = catalog::wizard_labels();
        let choice = select("2) Pick a template", &labels)?;
        let template: Option<Template> = catalog::wizard_templates()
            .get(choice)
            .copied()
            .flatten();
        if let Some(model) = optional(&format!(
            "3) OpenRouter model (currently {})",
            self.credentials.openrouter_model
        ))? {
            let mut updated = self.credentials.clone();
            updated.openrouter_model = model;
            self.save_credentials(updated);
        }
        self.run_create(&idea, template.map(|t| t.display_name()))
            .await;
        Ok(())
    }

    async fn dashboard(&self) {
        let sections =
            with_spinner("Collecting monitor data", monitor::dashboard(self.cli())).await;
        println!("{}", monitor::render_dashboard(&sections));
    }

    async fn chat(&self) -> Result<()> {
        let session = ChatSession::new(text("Session id to chat with")?);
        println!("{}Chatting with the queen of {}. Type 'exit' to leave.", CHAT, session.id);
        loop {
            let message: String = dialoguer::Input::new()
                .with_prompt("you")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read chat message")?;
            if ChatSession::is_exit(&message) {
                println!("Chat ended.");
                return Ok(());
            }
            if session.send(self.cli(), &message).await {
                println!("{}", style("Message sent; the session processes it.").dim());
            }
        }
    }

    async fn report(&self) -> Result<()> {
        let report = with_spinner("Building report", monitor::report(self.cli())).await;
        println!("{}{}", REPORT, report);
        if let Some(file) = optional("Save the report to file")? {
            write_report(&report, Path::new(&file));
        }
        Ok(())
    }

    async fn palette(&self) -> Result<()> {
        let input = text("What do you want to do? (e.g. 'show status', 'start swarm')")?;
        let Some(action) = palette::resolve(&input) else {
            println!("No matching command. Use the menus for detailed options.");
            return Ok(());
        };
        println!("{} {}", style("→").dim(), action);
        let mut args = PaletteArgs::default();
        match action {
            PaletteAction::InitProject => args.project_name = optional("Project name")?,
            PaletteAction::SpawnHive => {
                args.description = Some(text("Hive description")?);
                args.namespace = optional("Namespace")?;
                args.agents = optional("Agents (count or comma list)")?;
            }
            PaletteAction::StartSwarm => args.description = Some(text("Swarm task")?),
            _ => {}
        }
        if let Some(output) = palette::perform(self.cli(), action, &args).await {
            print_section(&action.to_string(), &output);
        }
        Ok(())
    }

    async fn quick_commands(&mut self) -> Result<()> {
        let items = [
            "Add quick command",
            "Run quick command",
            "List quick commands",
            "Delete quick command",
            "Show history",
            "Clear history",
            "Back",
        ];
        loop {
            match select("Quick commands and history", &items)? {
                0 => {
                    let name = text("Name")?;
                    let line = text("claude-flow arguments (without npx claude-flow@alpha)")?;
                    self.quick.add(&name, &line);
                    println!("{}Saved '{}'", CHECK, name);
                }
                1 => {
                    if self.quick.is_empty() {
                        println!("No quick commands yet.");
                        continue;
                    }
                    let names: Vec<&str> =
                        self.quick.list().iter().map(|(n, _)| n.as_str()).collect();
                    let index = select("Run which?", &names)?;
                    let name = names[index].to_string();
                    if let Err(e) = self.quick.run(&name, &self.cli).await {
                        println!("{}{:#}", WARN, e);
                    }
                }
                2 => {
                    if self.quick.is_empty() {
                        println!("No quick commands yet.");
                    }
                    for (name, args) in self.quick.list() {
                        println!("  {} {}", style(name).bold(), args.join(" "));
                    }
                }
                3 => {
                    let name = text("Name to delete")?;
                    if self.quick.remove(&name) {
                        println!("{}Deleted '{}'", CHECK, name);
                    } else {
                        println!("Quick command not found.");
                    }
                }
                4 => {
                    let history = self.cli.history();
                    if history.is_empty() {
                        println!("No commands issued yet.");
                    }
                    for (i, entry) in history.iter().enumerate() {
                        println!("{:>3}. {}", i + 1, entry);
                    }
                }
                5 => {
                    self.cli.clear_history();
                    println!("{}History cleared", CHECK);
                }
                _ => return Ok(()),
            }
        }
    }

    async fn rollback_recovery(&self) -> Result<()> {
        let items = [
            "Init rollback",
            "Recover to the last safe state",
            "Recover to a named point",
            "Back",
        ];
        loop {
            match select("Rollback and recovery", &items)? {
                0 => self.cli.init_rollback().await,
                1 => self.cli.recovery(catalog::DEFAULT_RECOVERY_POINT).await,
                2 => {
                    let point = optional("Recovery point")?
                        .unwrap_or_else(|| catalog::DEFAULT_RECOVERY_POINT.to_string());
                    self.cli.recovery(&point).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn hooks(&self) -> Result<()> {
        let mut items: Vec<&str> = catalog::HOOK_EVENTS.to_vec();
        items.push("fix-hook-variables");
        items.push("Back");
        let choice = select("Hooks", &items)?;
        if let Some(event) = catalog::HOOK_EVENTS.get(choice) {
            let params = optional("Extra parameters")?.unwrap_or_default();
            self.cli.hook(event, &split_params(&params)).await;
        } else if choice == catalog::HOOK_EVENTS.len() {
            let target = optional("Settings file (blank to search automatically)")?;
            let test = confirm("Dry test run?", false)?;
            self.cli.fix_hook_variables(target.as_deref(), test).await;
        }
        Ok(())
    }
}

/// Save a report, printing the outcome. Returns whether the file was written.
fn write_report(report: &str, path: &Path) -> bool {
    match monitor::save_report(report, path) {
        Ok(()) => {
            println!("{}Report written to {}", CHECK, path.display());
            true
        }
        Err(e) => {
            println!("{}{:#}", WARN, e);
            false
        }
    }
}

/// Last `count` lines of the file at `path`.
pub fn tail_lines(path: &Path, count: usize) -> Result<Vec<String>> {
    let content = fs::read(path).with_context(|| format!("No log file at {}", path.display()))?;
    let content = String::from_utf8_lossy(&content);
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(count);
    Ok(lines[start..].iter().map(|l| l.to_string()).collect())
}

/// Parse a positive count, falling back to `default` on blank or bad input.
pub fn parse_count(input: &str, default: u32) -> u32 {
    non_empty(input)
        .and_then(|v| v.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
