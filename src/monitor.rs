//! Monitoring dashboard and plain-text status report.
//!
//! Both gather captured claude-flow output and show it verbatim; nothing is
//! parsed.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::flow::FlowCli;

/// One titled block of captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: String,
}

impl Section {
    fn new(title: &'static str, body: String) -> Self {
        Self { title, body }
    }

    /// The body, or a `(no <title> available)` line when nothing was captured.
    pub fn body_or_fallback(&self) -> String {
        if self.body.trim().is_empty() {
            format!("(no {} available)", self.title.to_lowercase())
        } else {
            self.body.clone()
        }
    }
}

/// Sessions, hive status, swarm monitor, topology and load balance.
pub async fn dashboard(cli: &FlowCli) -> Vec<Section> {
    vec![
        Section::new("Hive Sessions", cli.hive_sessions().await),
        Section::new("Hive Status", cli.hive_status().await),
        Section::new("Swarm Monitor", cli.swarm_monitor(true, true).await),
        Section::new("Topology", cli.topology_optimize().await),
        Section::new("Load Balance", cli.load_balance().await),
    ]
}

pub fn render_dashboard(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "[{}]", section.title);
        let _ = writeln!(out, "{}", section.body_or_fallback());
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Sessions, status, memory statistics and the performance report as one text.
pub async fn report(cli: &FlowCli) -> String {
    let sections = [
        ("Hive Sessions", cli.hive_sessions().await),
        ("Hive Status", cli.hive_status().await),
        ("Memory Stats", cli.memory_stats().await),
        ("Performance Report", cli.performance_report().await),
    ];
    sections
        .iter()
        .map(|(title, body)| format!("==== {} ====\n{}", title, body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn save_report(text: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write report to {}", path.display()))
}
