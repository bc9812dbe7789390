//! Natural-language command palette.
//!
//! Input is lower-cased and tested against an ordered rule table. The first
//! rule whose predicate holds decides the action; later rules are not
//! consulted.

use std::fmt;

use crate::flow::FlowCli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    HiveStatus,
    HiveSessions,
    MemoryStats,
    /// Needs a project name from the presenter.
    InitProject,
    /// Needs a description, and optionally a namespace and agents.
    SpawnHive,
    /// Needs a task description.
    StartSwarm,
    PerformanceReport,
    HealthCheck,
}

impl fmt::Display for PaletteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaletteAction::HiveStatus => "hive status",
            PaletteAction::HiveSessions => "hive sessions",
            PaletteAction::MemoryStats => "memory stats",
            PaletteAction::InitProject => "init project",
            PaletteAction::SpawnHive => "spawn hive",
            PaletteAction::StartSwarm => "start swarm",
            PaletteAction::PerformanceReport => "performance report",
            PaletteAction::HealthCheck => "health check",
        };
        f.write_str(name)
    }
}

type Predicate = fn(&str) -> bool;

fn rules() -> [(Predicate, PaletteAction); 8] {
    [
        (|s: &str| s.contains("status"), PaletteAction::HiveStatus),
        (
            |s: &str| s.contains("session") && s.contains("list"),
            PaletteAction::HiveSessions,
        ),
        (
            |s: &str| s.contains("memory") && (s.contains("stats") || s.contains("statistic")),
            PaletteAction::MemoryStats,
        ),
        (|s: &str| s.contains("init"), PaletteAction::InitProject),
        (
            |s: &str| s.contains("spawn") && s.contains("hive"),
            PaletteAction::SpawnHive,
        ),
        (
            |s: &str| s.contains("swarm") && s.contains("start"),
            PaletteAction::StartSwarm,
        ),
        (|s: &str| s.contains("performance"), PaletteAction::PerformanceReport),
        (|s: &str| s.contains("health"), PaletteAction::HealthCheck),
    ]
}

/// Map free text to an action, first match wins.
pub fn resolve(input: &str) -> Option<PaletteAction> {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    rules()
        .into_iter()
        .find(|(matches, _)| matches(&text))
        .map(|(_, action)| action)
}

/// Details an action may need beyond the request itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteArgs {
    pub project_name: Option<String>,
    /// Hive description or swarm task.
    pub description: Option<String>,
    pub namespace: Option<String>,
    pub agents: Option<String>,
}

/// Run `action` through the facade. Returns captured output for the
/// read-only actions, `None` for the fire-and-forget ones.
///
/// SpawnHive and StartSwarm do nothing without a description.
pub async fn perform(cli: &FlowCli, action: PaletteAction, args: &PaletteArgs) -> Option<String> {
    match action {
        PaletteAction::HiveStatus => Some(cli.hive_status().await),
        PaletteAction::HiveSessions => Some(cli.hive_sessions().await),
        PaletteAction::MemoryStats => Some(cli.memory_stats().await),
        PaletteAction::PerformanceReport => Some(cli.performance_report().await),
        PaletteAction::InitProject => {
            cli.init(args.project_name.as_deref(), false, false).await;
            None
        }
        PaletteAction::SpawnHive => {
            if let Some(description) = args.description.as_deref() {
                cli.hive_spawn(
                    description,
                    args.namespace.as_deref(),
                    args.agents.as_deref(),
                    false,
                )
                .await;
            }
            None
        }
        PaletteAction::StartSwarm => {
            if let Some(task) = args.description.as_deref() {
                cli.swarm(task, false, None).await;
            }
            None
        }
        PaletteAction::HealthCheck => {
            cli.health_auto_heal().await;
            cli.health_check(None).await;
            None
        }
    }
}
