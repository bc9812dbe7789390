//! Expert mode: every facade area behind a submenu.

use anyhow::Result;
use console::style;

use super::{Manager, parse_count};
use crate::catalog::{self, HIVE_PATTERNS};
use crate::flow::{AgentSpec, DEFAULT_EPOCHS};
use crate::ui::icons::{CHECK, HEAL, HIVE, WARN};
use crate::ui::prompt::{confirm, optional, print_section, select, text, text_or};
use crate::ui::with_spinner;

const EXPERT_ITEMS: [&str; 37] = [
    "Create a new project",
    "List projects",
    "Monitor a session and self-heal",
    "Monitoring dashboard",
    "Chat with a hive session",
    "Show logs",
    "Configure tokens and model",
    "Project wizard",
    "Self-heal now",
    "Neural TDD workflow",
    "Collect all metrics",
    "Full security scan",
    "Full development swarm",
    "Research swarm",
    "Hooks",
    "Backup and restore",
    "Create a DAA agent",
    "Hive wizard and custom spawn",
    "DAA operations",
    "Neural operations",
    "Workflow automation",
    "Memory management",
    "Security and compliance",
    "Performance and monitoring",
    "GitHub integration",
    "System configuration",
    "Concurrency guidelines",
    "Swarm tools",
    "SPARC batch and pipelines",
    "Hive patterns",
    "Quick commands and history",
    "Rollback and recovery",
    "Command palette",
    "Hive status",
    "Monitoring report",
    "Full automation run",
    "Exit",
];

impl Manager {
    pub(super) async fn run_expert(&mut self) -> Result<()> {
        loop {
            println!();
            match select("flo (expert)", &EXPERT_ITEMS)? {
                0 => self.create_project().await?,
                1 => self.list_projects(),
                2 => self.monitor_and_heal().await?,
                3 => self.dashboard().await,
                4 => self.chat().await?,
                5 => self.show_logs(),
                6 => self.configure_tokens()?,
                7 => self.wizard().await?,
                8 => self.self_heal().await,
                9 => {
                    self.cli.sparc_mode("neural-tdd", true).await;
                    self.cli.sparc_workflow_all(true, true).await;
                }
                10 => {
                    let sections =
                        with_spinner("Collecting metrics", self.cli.metrics_collect_full()).await;
                    for (title, body) in sections {
                        print_section(title, &body);
                    }
                }
                11 => {
                    with_spinner("Scanning", self.cli.security_scan_full(true, true, true)).await;
                }
                12 => {
                    let description = text_or("Description", "Full development swarm")?;
                    let agents = parse_count(
                        &optional("Agents")?.unwrap_or_default(),
                        catalog::DEFAULT_FULL_DEV_AGENTS,
                    );
                    self.cli.deploy_full_development_swarm(&description, agents).await;
                }
                13 => {
                    let domain = text("Research domain")?;
                    self.cli.research_swarm(&domain).await;
                }
                14 => self.hooks().await?,
                15 => self.backup_restore().await?,
                16 => self.daa_agent_create().await?,
                17 => self.hive_wizard().await?,
                18 => self.daa_menu().await?,
                19 => self.neural_menu().await?,
                20 => self.workflow_menu().await?,
                21 => self.memory_menu().await?,
                22 => self.security_menu().await?,
                23 => self.performance_menu().await?,
                24 => self.github_menu().await?,
                25 => self.system_menu().await?,
                26 => print_section("Concurrency guidelines", catalog::CONCURRENCY_GUIDELINES),
                27 => self.swarm_menu().await?,
                28 => self.sparc_menu().await?,
                29 => self.patterns_menu().await?,
                30 => self.quick_commands().await?,
                31 => self.rollback_recovery().await?,
                32 => self.palette().await?,
                33 => {
                    print_section("Hive status", &self.cli.hive_status().await);
                    print_section("Hive sessions", &self.cli.hive_sessions().await);
                }
                34 => self.report().await?,
                35 => self.full_automation().await?,
                _ => break,
            }
        }
        Ok(())
    }

    async fn self_heal(&self) {
        println!("{}Running self-heal", HEAL);
        with_spinner("Healing", async {
            self.cli.health_auto_heal().await;
            self.cli.fault_tolerance_retry().await;
            self.cli.bottleneck_auto_optimize().await;
        })
        .await;
        println!("{}Self-heal finished", CHECK);
    }

    async fn full_automation(&self) -> Result<()> {
        let idea = text("Describe the program you want to build")?;
        let template = optional("Template")?;
        match self.pm.run_full_automation(&idea, template.as_deref()).await {
            Ok(outcome) => {
                println!("{}Project ready at {}", CHECK, outcome.project_dir.display());
                print_section("Performance report", &outcome.performance_report);
            }
            Err(e) => println!("{}{:#}", WARN, e),
        }
        Ok(())
    }

    async fn backup_restore(&self) -> Result<()> {
        match select("Backup and restore", &["Create backup", "Restore system", "Back"])? {
            0 => {
                let file = text_or("Backup file", catalog::DEFAULT_BACKUP_FILE)?;
                self.cli.backup_create(&file).await;
            }
            1 => {
                let file = text_or("Backup file", catalog::DEFAULT_BACKUP_FILE)?;
                if confirm(&format!("Restore the system from {}?", file), false)? {
                    self.cli.restore_system(&file).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn daa_agent_create(&self) -> Result<()> {
        let agent_type = text("Agent type")?;
        let capabilities = text_or("Capabilities (JSON)", "[]")?;
        let resources = text_or("Resources (JSON)", "{}")?;
        let security_level = optional("Security level")?;
        let sandbox = confirm("Run in a sandbox?", false)?;
        self.cli
            .daa_agent_create(&AgentSpec {
                agent_type: &agent_type,
                capabilities: &capabilities,
                resources: &resources,
                security_level: security_level.as_deref(),
                sandbox,
            })
            .await;
        Ok(())
    }

    async fn hive_wizard(&self) -> Result<()> {
        println!("{}Starting the hive-mind wizard", HIVE);
        self.cli.hive_wizard().await;
        if confirm("Spawn a custom hive as well?", false)? {
            let description = text("Hive description")?;
            let namespace = optional("Namespace")?;
            let agents = optional("Agents (count or comma list)")?;
            let temp = confirm("Temporary session?", false)?;
            self.cli
                .hive_spawn(&description, namespace.as_deref(), agents.as_deref(), temp)
                .await;
        }
        Ok(())
    }

    async fn daa_menu(&self) -> Result<()> {
        let items = [
            "Capability match",
            "Lifecycle management",
            "Resource allocation",
            "Agent communication",
            "Consensus",
            "Back",
        ];
        loop {
            match select("DAA operations", &items)? {
                0 => {
                    let requirements = text("Task requirements")?;
                    self.cli.daa_capability_match(&requirements).await;
                }
                1 => {
                    let agent = text("Agent id")?;
                    let action = text("Action (start, stop, restart, ...)")?;
                    self.cli.daa_lifecycle_manage(&agent, &action).await;
                }
                2 => {
                    let agent = text("Agent id")?;
                    let cpu = text("CPU")?;
                    let memory = text("Memory")?;
                    self.cli.daa_resource_alloc(&agent, &cpu, &memory).await;
                }
                3 => {
                    let source = text("From agent")?;
                    let target = text("To agent")?;
                    let message = text("Message")?;
                    self.cli.daa_communication(&source, &target, &message).await;
                }
                4 => {
                    let proposal = text("Proposal")?;
                    self.cli.daa_consensus(&proposal).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn neural_menu(&self) -> Result<()> {
        let items = [
            "Train",
            "Predict",
            "Cognitive analysis",
            "Pattern recognition",
            "Adaptive learning",
            "Compress model",
            "Create ensemble",
            "Transfer learning",
            "Explain prediction",
            "Back",
        ];
        loop {
            match select("Neural operations", &items)? {
                0 => {
                    let pattern = text("Pattern type")?;
                    let epochs =
                        parse_count(&optional("Epochs")?.unwrap_or_default(), DEFAULT_EPOCHS);
                    let data = optional("Training data file")?;
                    self.cli.neural_train(&pattern, epochs, data.as_deref()).await;
                }
                1 => {
                    let model = text("Model")?;
                    let input = text("Input")?;
                    self.cli.neural_predict(&model, &input).await;
                }
                2 => {
                    let behavior = text("Behavior to analyse")?;
                    self.cli.cognitive_analyze(&behavior).await;
                }
                3 => {
                    let pattern = text("Pattern")?;
                    let input = optional("Input")?;
                    self.cli.pattern_recognize(&pattern, input.as_deref()).await;
                }
                4 => {
                    let model = text("Model")?;
                    let data = optional("Data")?;
                    self.cli.learning_adapt(&model, data.as_deref()).await;
                }
                5 => {
                    let model = text("Model")?;
                    let output = optional("Output file")?;
                    self.cli.neural_compress(&model, output.as_deref()).await;
                }
                6 => {
                    let models = text("Models (comma separated)")?;
                    let output = text("Output")?;
                    self.cli.ensemble_create(&models, &output).await;
                }
                7 => {
                    let base = text("Base model")?;
                    let data = text("Data")?;
                    self.cli.transfer_learn(&base, &data).await;
                }
                8 => {
                    let model = text("Model")?;
                    let input = text("Input")?;
                    self.cli.neural_explain(&model, &input).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn workflow_menu(&self) -> Result<()> {
        let items = [
            "Create workflow",
            "Batch process",
            "Create pipeline",
            "Execute workflow",
            "Export workflow",
            "Automation setup",
            "Scheduler",
            "Trigger setup",
            "Parallel execute",
            "Back",
        ];
        loop {
            match select("Workflow automation", &items)? {
                0 => {
                    let name = text("Workflow name")?;
                    let parallel = confirm("Run steps in parallel?", true)?;
                    self.cli.workflow_create(&name, parallel).await;
                }
                1 => {
                    let batch = text("Items (comma separated)")?;
                    let concurrent = confirm("Concurrent?", true)?;
                    self.cli.batch_process(&batch, concurrent).await;
                }
                2 => {
                    let config = text("Pipeline config")?;
                    self.cli.pipeline_create(&config).await;
                }
                3 => {
                    let name = text("Workflow name")?;
                    self.cli.workflow_execute(&name).await;
                }
                4 => {
                    let name = text("Workflow name")?;
                    let output = text_or("Output file", "workflow.json")?;
                    self.cli.workflow_export(&name, &output).await;
                }
                5 => {
                    let config = text("Automation config")?;
                    self.cli.automation_setup(&config).await;
                }
                6 => {
                    let schedule = text("Schedule")?;
                    let action = text("Action")?;
                    self.cli.scheduler_manage(&schedule, &action).await;
                }
                7 => {
                    let name = text("Trigger name")?;
                    let target = text("Target")?;
                    self.cli.trigger_setup(&name, &target).await;
                }
                8 => {
                    let tasks = text("Tasks (comma separated)")?;
                    self.cli.parallel_execute(&tasks).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn memory_menu(&self) -> Result<()> {
        let items = [
            "Stats",
            "List",
            "Query",
            "Store",
            "Export",
            "Import",
            "Search",
            "Backup",
            "Restore",
            "Maintenance (usage, persist, compress, sync, analytics)",
            "Back",
        ];
        loop {
            match select("Memory management", &items)? {
                0 => print_section("Memory stats", &self.cli.memory_stats().await),
                1 => print_section("Memory list", &self.cli.memory_list().await),
                2 => {
                    let term = text("Query")?;
                    let namespace = optional("Namespace")?;
                    let limit = optional("Limit")?.and_then(|l| l.parse().ok());
                    let result = self.cli.memory_query(&term, namespace.as_deref(), limit).await;
                    print_section("Query result", &result);
                }
                3 => {
                    let key = text("Key")?;
                    let value = text("Value")?;
                    let namespace = optional("Namespace")?;
                    self.cli.memory_store(&key, &value, namespace.as_deref()).await;
                }
                4 => {
                    let file = text_or("Export file", "memory_export.json")?;
                    let namespace = optional("Namespace")?;
                    self.cli.memory_export(&file, namespace.as_deref()).await;
                }
                5 => {
                    let file = text_or("Import file", "memory_export.json")?;
                    let namespace = optional("Namespace")?;
                    self.cli.memory_import(&file, namespace.as_deref()).await;
                }
                6 => {
                    let term = text("Search term")?;
                    let namespace = optional("Namespace")?;
                    self.cli.memory_search(&term, namespace.as_deref()).await;
                }
                7 => {
                    let file = text("Backup file")?;
                    self.cli.memory_backup(&file).await;
                }
                8 => {
                    let file = text("Backup file")?;
                    self.cli.memory_restore(&file).await;
                }
                9 => {
                    self.cli.memory_usage().await;
                    self.cli.memory_persist().await;
                    self.cli.memory_compress().await;
                    self.cli.memory_sync().await;
                    self.cli.memory_analytics().await;
                    if let Some(namespace) = optional("Switch namespace")? {
                        self.cli.memory_namespace(&namespace).await;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    async fn security_menu(&self) -> Result<()> {
        let items = [
            "Analyse repository security",
            "Security-focused repo architecture",
            "Spawn a compliance hive",
            "Security metrics and audit",
            "Back",
        ];
        loop {
            match select("Security and compliance", &items)? {
                0 => {
                    let target = text_or("Target", "./src")?;
                    self.cli.github_repo_analyze(Some("security"), Some(&target)).await;
                }
                1 => {
                    let compliance = optional("Compliance standard (e.g. SOC2)")?;
                    self.cli
                        .github_repo_architect_optimize(true, compliance.as_deref())
                        .await;
                }
                2 => {
                    self.cli
                        .hive_spawn("security audit and compliance review", None, None, false)
                        .await;
                }
                3 => {
                    let last = optional("Time window (e.g. 24h)")?;
                    self.cli.security_metrics(last.as_deref()).await;
                    self.cli.security_audit(true).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn performance_menu(&self) -> Result<()> {
        let items = [
            "Performance report",
            "Bottleneck analysis",
            "Token usage",
            "Run benchmark",
            "Collect metrics",
            "Trend analysis",
            "Health check",
            "Diagnostics",
            "Usage stats",
            "Back",
        ];
        loop {
            match select("Performance and monitoring", &items)? {
                0 => print_section("Performance report", &self.cli.performance_report().await),
                1 => self.cli.bottleneck_analyze().await,
                2 => self.cli.token_usage().await,
                3 => {
                    let name = text("Benchmark")?;
                    self.cli.benchmark_run(&name).await;
                }
                4 => print_section("Metrics", &self.cli.metrics_collect().await),
                5 => self.cli.trend_analysis().await,
                6 => {
                    let components = optional("Components")?;
                    self.cli.health_check(components.as_deref()).await;
                }
                7 => self.cli.diagnostic_run().await,
                8 => self.cli.usage_stats().await,
                _ => return Ok(()),
            }
        }
    }

    async fn github_menu(&self) -> Result<()> {
        let items = [
            "Run a GitHub mode",
            "Analyse repository",
            "Manage pull requests",
            "Track issues",
            "Coordinate a release",
            "Automate workflow",
            "Code review",
            "Back",
        ];
        loop {
            match select("GitHub integration", &items)? {
                0 => {
                    let mode = text("Mode")?;
                    let extra = optional("Extra arguments")?.unwrap_or_default();
                    self.cli
                        .github_mode(&mode, &crate::ui::prompt::split_params(&extra))
                        .await;
                }
                1 => {
                    let analysis = optional("Analysis type")?;
                    let target = optional("Target")?;
                    self.cli
                        .github_repo_analyze(analysis.as_deref(), target.as_deref())
                        .await;
                }
                2 => {
                    let reviewers = optional("Reviewers")?;
                    let ai = confirm("AI-powered review?", true)?;
                    self.cli.github_pr_manage(reviewers.as_deref(), ai).await;
                }
                3 => {
                    let project = optional("Project")?;
                    self.cli.github_issue_track(project.as_deref()).await;
                }
                4 => {
                    let version = text_or("Version", "1.0.0")?;
                    let changelog = confirm("Generate the changelog?", true)?;
                    self.cli.github_release_coord(&version, changelog).await;
                }
                5 => {
                    let file = text("Workflow file")?;
                    self.cli.github_workflow_auto(&file).await;
                }
                6 => {
                    let multi = confirm("Multiple reviewers?", true)?;
                    let ai = confirm("AI-powered?", true)?;
                    self.cli.github_code_review(multi, ai).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn system_menu(&self) -> Result<()> {
        let items = [
            "Manage configuration",
            "Detect features",
            "Analyse a log",
            "Back",
        ];
        loop {
            match select("System configuration", &items)? {
                0 => {
                    let operation = text("Operation (get, set, validate, ...)")?;
                    let file = optional("Config file")?;
                    self.cli.config_manage(&operation, file.as_deref()).await;
                }
                1 => self.cli.features_detect().await,
                2 => {
                    let file = text_or("Log file", &self.config.log_file.display().to_string())?;
                    self.cli.log_analysis(&file).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn swarm_menu(&self) -> Result<()> {
        let items = [
            "Initialise swarm",
            "Spawn agent",
            "Orchestrate task",
            "Monitor",
            "Optimise topology",
            "Load balance",
            "Coordination sync",
            "Scale",
            "Destroy",
            "Back",
        ];
        loop {
            match select("Swarm tools", &items)? {
                0 => {
                    let description = optional("Description")?;
                    self.cli.swarm_init(description.as_deref()).await;
                }
                1 => {
                    let agent_type = text("Agent type")?;
                    let capabilities = text_or("Capabilities (JSON)", "[]")?;
                    let resources = text_or("Resources (JSON)", "{}")?;
                    self.cli.agent_spawn(&agent_type, &capabilities, &resources).await;
                }
                2 => {
                    let description = text("Task description")?;
                    self.cli.task_orchestrate(&description).await;
                }
                3 => print_section("Swarm monitor", &self.cli.swarm_monitor(true, true).await),
                4 => print_section("Topology", &self.cli.topology_optimize().await),
                5 => print_section("Load balance", &self.cli.load_balance().await),
                6 => self.cli.coordination_sync().await,
                7 => {
                    let size = text("Target size")?;
                    self.cli.swarm_scale(&size).await;
                }
                8 => {
                    if confirm("Destroy the swarm?", false)? {
                        self.cli.swarm_destroy().await;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    async fn sparc_menu(&self) -> Result<()> {
        let items = [
            "List modes",
            "Mode info",
            "Batch",
            "Pipeline",
            "Concurrent",
            "Back",
        ];
        loop {
            match select("SPARC batch and pipelines", &items)? {
                0 => print_section("SPARC modes", &self.cli.sparc_modes().await),
                1 => {
                    let mode = text("Mode")?;
                    print_section(&mode, &self.cli.sparc_info(&mode).await);
                }
                2 => {
                    let modes = text("Modes (comma separated)")?;
                    let task = text("Task")?;
                    self.cli.sparc_batch(&modes, &task).await;
                }
                3 => {
                    let task = text("Task")?;
                    self.cli.sparc_pipeline(&task).await;
                }
                4 => {
                    let mode = text("Mode")?;
                    let tasks_file = text("Tasks file")?;
                    self.cli.sparc_concurrent(&mode, &tasks_file).await;
                }
                _ => return Ok(()),
            }
        }
    }

    async fn patterns_menu(&self) -> Result<()> {
        let mut items: Vec<&str> = HIVE_PATTERNS.iter().map(|p| p.label).collect();
        items.push("Custom");
        items.push("Back");
        let choice = select("Hive patterns", &items)?;
        if let Some(pattern) = HIVE_PATTERNS.get(choice) {
            println!(
                "{}{} {}",
                HIVE,
                pattern.label,
                style(format!("({})", pattern.agents)).dim()
            );
            self.cli.hive_pattern(pattern).await;
        } else if choice == HIVE_PATTERNS.len() {
            let description = text("Hive description")?;
            let namespace = optional("Namespace")?;
            let agents = optional("Agents (comma list)")?;
            self.cli
                .hive_spawn(&description, namespace.as_deref(), agents.as_deref(), false)
                .await;
        }
        Ok(())
    }
}
