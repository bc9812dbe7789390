//! One subcommand per facade operation.
//!
//! Capturing queries print their output; everything else streams straight to
//! the terminal.

use clap::Subcommand;

use flo::catalog::DEFAULT_RECOVERY_POINT;
use flo::flow::{AgentSpec, DEFAULT_EPOCHS, FlowCli};

#[derive(Subcommand, Clone, Debug)]
pub enum FlowCommand {
    // Init / hive / swarm
    /// Initialise claude-flow in the working directory
    Init {
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        hive_mind: bool,
        #[arg(long)]
        neural_enhanced: bool,
    },
    /// Roll back the last init
    InitRollback,
    /// Spawn a hive
    Spawn {
        description: String,
        #[arg(long)]
        namespace: Option<String>,
        /// Agent count or comma-separated roles
        #[arg(long)]
        agents: Option<String>,
        #[arg(long)]
        temp: bool,
    },
    /// Resume a hive session
    Resume { session_id: String },
    /// Show hive status
    Status,
    /// List hive sessions
    Sessions,
    /// Launch claude-flow's hive wizard
    HiveWizard,
    /// Start or continue a swarm on a task
    Swarm {
        task: String,
        #[arg(long)]
        continue_session: bool,
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Recover to a named point
    Recovery {
        #[arg(long, default_value = DEFAULT_RECOVERY_POINT)]
        point: String,
    },

    // Memory
    MemoryStats,
    MemoryList,
    MemoryQuery {
        term: String,
        #[arg(long)]
        namespace: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    MemoryStore {
        key: String,
        value: String,
        #[arg(long)]
        namespace: Option<String>,
    },
    MemoryExport {
        file: String,
        #[arg(long)]
        namespace: Option<String>,
    },
    MemoryImport {
        file: String,
        #[arg(long)]
        namespace: Option<String>,
    },
    MemoryUsage,
    MemorySearch {
        term: String,
        #[arg(long)]
        namespace: Option<String>,
    },
    MemoryPersist,
    MemoryNamespace { namespace: String },
    MemoryBackup { file: String },
    MemoryRestore { file: String },
    MemoryCompress,
    MemorySync,
    MemoryAnalytics,

    // Neural
    NeuralTrain {
        #[arg(long)]
        pattern: String,
        #[arg(long, default_value_t = DEFAULT_EPOCHS)]
        epochs: u32,
        #[arg(long)]
        data: Option<String>,
    },
    NeuralPredict {
        #[arg(long)]
        model: String,
        #[arg(long)]
        input: String,
    },
    CognitiveAnalyze {
        #[arg(long)]
        behavior: String,
    },
    PatternRecognize {
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        input: Option<String>,
    },
    LearningAdapt {
        #[arg(long)]
        model: String,
        #[arg(long)]
        data: Option<String>,
    },
    NeuralCompress {
        #[arg(long)]
        model: String,
        #[arg(long)]
        output: Option<String>,
    },
    EnsembleCreate {
        #[arg(long)]
        models: String,
        #[arg(long)]
        output: String,
    },
    TransferLearn {
        #[arg(long)]
        base: String,
        #[arg(long)]
        data: String,
    },
    NeuralExplain {
        #[arg(long)]
        model: String,
        #[arg(long)]
        input: String,
    },

    // Workflow
    WorkflowCreate {
        #[arg(long)]
        name: String,
        #[arg(long)]
        parallel: bool,
    },
    BatchProcess {
        #[arg(long)]
        items: String,
        #[arg(long)]
        concurrent: bool,
    },
    PipelineCreate {
        #[arg(long)]
        config: String,
    },
    WorkflowExecute {
        #[arg(long)]
        name: String,
    },
    WorkflowExport {
        #[arg(long)]
        name: String,
        #[arg(long)]
        output: String,
    },
    AutomationSetup {
        #[arg(long)]
        config: String,
    },
    SchedulerManage {
        #[arg(long)]
        schedule: String,
        #[arg(long)]
        action: String,
    },
    TriggerSetup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        target: String,
    },
    ParallelExecute {
        #[arg(long)]
        tasks: String,
    },

    // GitHub
    /// Run a GitHub mode with arbitrary trailing arguments
    Github {
        mode: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
    GithubRepoAnalyze {
        #[arg(long)]
        analysis_type: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },
    GithubPrManage {
        #[arg(long)]
        reviewers: Option<String>,
        #[arg(long)]
        ai_powered: bool,
    },
    GithubIssueTrack {
        #[arg(long)]
        project: Option<String>,
    },
    GithubReleaseCoord {
        #[arg(value_name = "VERSION")]
        release: String,
        #[arg(long)]
        auto_changelog: bool,
    },
    GithubWorkflowAuto {
        #[arg(long)]
        file: String,
    },
    GithubCodeReview {
        #[arg(long)]
        multi_reviewer: bool,
        #[arg(long)]
        ai_powered: bool,
    },
    GithubSyncCoordinator {
        #[arg(long)]
        multi_package: bool,
    },

    // DAA
    DaaCreate {
        #[arg(long)]
        agent_type: String,
        #[arg(long, default_value = "[]")]
        capabilities: String,
        #[arg(long, default_value = "{}")]
        resources: String,
        #[arg(long)]
        security_level: Option<String>,
        #[arg(long)]
        sandbox: bool,
    },
    DaaMatch {
        #[arg(long)]
        requirements: String,
    },
    DaaLifecycle {
        #[arg(long)]
        agent_id: String,
        #[arg(long)]
        action: String,
    },
    DaaResourceAlloc {
        #[arg(long)]
        agent_id: String,
        #[arg(long)]
        cpu: String,
        #[arg(long)]
        memory: String,
    },
    DaaCommunication {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        message: String,
    },
    DaaConsensus {
        #[arg(long)]
        proposal: String,
    },

    // Security
    SecurityScan {
        #[arg(long)]
        deep: bool,
        #[arg(long)]
        report: bool,
    },
    SecurityMetrics {
        #[arg(long)]
        last: Option<String>,
    },
    SecurityAudit {
        #[arg(long)]
        full_trace: bool,
    },

    // Swarm tools
    SwarmInit { description: Option<String> },
    AgentSpawn {
        #[arg(long)]
        agent_type: String,
        #[arg(long, default_value = "[]")]
        capabilities: String,
        #[arg(long, default_value = "{}")]
        resources: String,
    },
    TaskOrchestrate { description: String },
    SwarmMonitor {
        #[arg(long)]
        dashboard: bool,
        #[arg(long)]
        real_time: bool,
    },
    TopologyOptimize,
    LoadBalance,
    CoordinationSync,
    SwarmScale { size: String },
    SwarmDestroy,

    // Performance
    PerformanceReport,
    BottleneckAnalyze,
    TokenUsage,
    BenchmarkRun {
        #[arg(long)]
        name: String,
    },
    MetricsCollect,
    TrendAnalysis,
    HealthCheck {
        #[arg(long)]
        components: Option<String>,
    },
    DiagnosticRun,
    UsageStats,

    // System
    BackupCreate { file: String },
    RestoreSystem { file: String },
    ConfigManage {
        operation: String,
        file: Option<String>,
    },
    FeaturesDetect,
    LogAnalysis { file: String },

    // Hooks
    /// Run a hook with arbitrary trailing parameters
    Hook {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
    FixHookVariables {
        target: Option<String>,
        #[arg(long)]
        test: bool,
    },

    // SPARC
    SparcModes,
    SparcInfo { mode: String },
    SparcRun {
        mode: String,
        task: String,
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        batch_optimize: bool,
    },
    SparcTdd {
        feature: String,
        #[arg(long)]
        batch_tdd: bool,
    },
    SparcBatch { modes: String, task: String },
    SparcPipeline { task: String },
    SparcConcurrent { mode: String, tasks_file: String },
    /// Specification, architecture, TDD and integration for one feature
    SparcFull {
        feature: String,
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        batch_tdd: bool,
    },
}

fn show(text: String) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

pub async fn cmd_flow(cli: &FlowCli, command: &FlowCommand) {
    use FlowCommand as C;

    match command {
        C::Init {
            project_name,
            hive_mind,
            neural_enhanced,
        } => {
            cli.init(project_name.as_deref(), *hive_mind, *neural_enhanced)
                .await
        }
        C::InitRollback => cli.init_rollback().await,
        C::Spawn {
            description,
            namespace,
            agents,
            temp,
        } => {
            cli.hive_spawn(description, namespace.as_deref(), agents.as_deref(), *temp)
                .await
        }
        C::Resume { session_id } => cli.hive_resume(session_id).await,
        C::Status => show(cli.hive_status().await),
        C::Sessions => show(cli.hive_sessions().await),
        C::HiveWizard => cli.hive_wizard().await,
        C::Swarm {
            task,
            continue_session,
            strategy,
        } => cli.swarm(task, *continue_session, strategy.as_deref()).await,
        C::Recovery { point } => cli.recovery(point).await,

        C::MemoryStats => show(cli.memory_stats().await),
        C::MemoryList => show(cli.memory_list().await),
        C::MemoryQuery {
            term,
            namespace,
            limit,
        } => show(cli.memory_query(term, namespace.as_deref(), *limit).await),
        C::MemoryStore {
            key,
            value,
            namespace,
        } => cli.memory_store(key, value, namespace.as_deref()).await,
        C::MemoryExport { file, namespace } => {
            cli.memory_export(file, namespace.as_deref()).await
        }
        C::MemoryImport { file, namespace } => {
            cli.memory_import(file, namespace.as_deref()).await
        }
        C::MemoryUsage => cli.memory_usage().await,
        C::MemorySearch { term, namespace } => {
            cli.memory_search(term, namespace.as_deref()).await
        }
        C::MemoryPersist => cli.memory_persist().await,
        C::MemoryNamespace { namespace } => cli.memory_namespace(namespace).await,
        C::MemoryBackup { file } => cli.memory_backup(file).await,
        C::MemoryRestore { file } => cli.memory_restore(file).await,
        C::MemoryCompress => cli.memory_compress().await,
        C::MemorySync => cli.memory_sync().await,
        C::MemoryAnalytics => cli.memory_analytics().await,

        C::NeuralTrain {
            pattern,
            epochs,
            data,
        } => cli.neural_train(pattern, *epochs, data.as_deref()).await,
        C::NeuralPredict { model, input } => cli.neural_predict(model, input).await,
        C::CognitiveAnalyze { behavior } => cli.cognitive_analyze(behavior).await,
        C::PatternRecognize { pattern, input } => {
            cli.pattern_recognize(pattern, input.as_deref()).await
        }
        C::LearningAdapt { model, data } => cli.learning_adapt(model, data.as_deref()).await,
        C::NeuralCompress { model, output } => {
            cli.neural_compress(model, output.as_deref()).await
        }
        C::EnsembleCreate { models, output } => cli.ensemble_create(models, output).await,
        C::TransferLearn { base, data } => cli.transfer_learn(base, data).await,
        C::NeuralExplain { model, input } => cli.neural_explain(model, input).await,

        C::WorkflowCreate { name, parallel } => cli.workflow_create(name, *parallel).await,
        C::BatchProcess { items, concurrent } => cli.batch_process(items, *concurrent).await,
        C::PipelineCreate { config } => cli.pipeline_create(config).await,
        C::WorkflowExecute { name } => cli.workflow_execute(name).await,
        C::WorkflowExport { name, output } => cli.workflow_export(name, output).await,
        C::AutomationSetup { config } => cli.automation_setup(config).await,
        C::SchedulerManage { schedule, action } => {
            cli.scheduler_manage(schedule, action).await
        }
        C::TriggerSetup { name, target } => cli.trigger_setup(name, target).await,
        C::ParallelExecute { tasks } => cli.parallel_execute(tasks).await,

        C::Github { mode, extra } => cli.github_mode(mode, extra).await,
        C::GithubRepoAnalyze {
            analysis_type,
            target,
        } => {
            cli.github_repo_analyze(analysis_type.as_deref(), target.as_deref())
                .await
        }
        C::GithubPrManage {
            reviewers,
            ai_powered,
        } => cli.github_pr_manage(reviewers.as_deref(), *ai_powered).await,
        C::GithubIssueTrack { project } => cli.github_issue_track(project.as_deref()).await,
        C::GithubReleaseCoord {
            release,
            auto_changelog,
        } => cli.github_release_coord(release, *auto_changelog).await,
        C::GithubWorkflowAuto { file } => cli.github_workflow_auto(file).await,
        C::GithubCodeReview {
            multi_reviewer,
            ai_powered,
        } => cli.github_code_review(*multi_reviewer, *ai_powered).await,
        C::GithubSyncCoordinator { multi_package } => {
            cli.github_sync_coordinator(*multi_package).await
        }

        C::DaaCreate {
            agent_type,
            capabilities,
            resources,
            security_level,
            sandbox,
        } => {
            cli.daa_agent_create(&AgentSpec {
                agent_type,
                capabilities,
                resources,
                security_level: security_level.as_deref(),
                sandbox: *sandbox,
            })
            .await
        }
        C::DaaMatch { requirements } => cli.daa_capability_match(requirements).await,
        C::DaaLifecycle { agent_id, action } => cli.daa_lifecycle_manage(agent_id, action).await,
        C::DaaResourceAlloc {
            agent_id,
            cpu,
            memory,
        } => cli.daa_resource_alloc(agent_id, cpu, memory).await,
        C::DaaCommunication {
            source,
            target,
            message,
        } => cli.daa_communication(source, target, message).await,
        C::DaaConsensus { proposal } => cli.daa_consensus(proposal).await,

        C::SecurityScan { deep, report } => cli.security_scan(*deep, *report).await,
        C::SecurityMetrics { last } => cli.security_metrics(last.as_deref()).await,
        C::SecurityAudit { full_trace } => cli.security_audit(*full_trace).await,

        C::SwarmInit { description } => cli.swarm_init(description.as_deref()).await,
        C::AgentSpawn {
            agent_type,
            capabilities,
            resources,
        } => cli.agent_spawn(agent_type, capabilities, resources).await,
        C::TaskOrchestrate { description } => cli.task_orchestrate(description).await,
        C::SwarmMonitor {
            dashboard,
            real_time,
        } => show(cli.swarm_monitor(*dashboard, *real_time).await),
        C::TopologyOptimize => show(cli.topology_optimize().await),
        C::LoadBalance => show(cli.load_balance().await),
        C::CoordinationSync => cli.coordination_sync().await,
        C::SwarmScale { size } => cli.swarm_scale(size).await,
        C::SwarmDestroy => cli.swarm_destroy().await,

        C::PerformanceReport => show(cli.performance_report().await),
        C::BottleneckAnalyze => cli.bottleneck_analyze().await,
        C::TokenUsage => cli.token_usage().await,
        C::BenchmarkRun { name } => cli.benchmark_run(name).await,
        C::MetricsCollect => show(cli.metrics_collect().await),
        C::TrendAnalysis => cli.trend_analysis().await,
        C::HealthCheck { components } => cli.health_check(components.as_deref()).await,
        C::DiagnosticRun => cli.diagnostic_run().await,
        C::UsageStats => cli.usage_stats().await,

        C::BackupCreate { file } => cli.backup_create(file).await,
        C::RestoreSystem { file } => cli.restore_system(file).await,
        C::ConfigManage { operation, file } => {
            cli.config_manage(operation, file.as_deref()).await
        }
        C::FeaturesDetect => cli.features_detect().await,
        C::LogAnalysis { file } => cli.log_analysis(file).await,

        C::Hook { name, params } => cli.hook(name, params).await,
        C::FixHookVariables { target, test } => {
            cli.fix_hook_variables(target.as_deref(), *test).await
        }

        C::SparcModes => show(cli.sparc_modes().await),
        C::SparcInfo { mode } => show(cli.sparc_info(mode).await),
        C::SparcRun {
            mode,
            task,
            parallel,
            batch_optimize,
        } => cli.sparc_run(mode, task, *parallel, *batch_optimize).await,
        C::SparcTdd { feature, batch_tdd } => cli.sparc_tdd(feature, *batch_tdd).await,
        C::SparcBatch { modes, task } => cli.sparc_batch(modes, task).await,
        C::SparcPipeline { task } => cli.sparc_pipeline(task).await,
        C::SparcConcurrent { mode, tasks_file } => cli.sparc_concurrent(mode, tasks_file).await,
        C::SparcFull {
            feature,
            parallel,
            batch_tdd,
        } => cli.sparc_full_workflow(feature, *parallel, *batch_tdd).await,
    }
}
