//! Project initialisation, hive-mind sessions and recovery commands.

use super::{ArgList, FlowCli};

/// A preset hive: a fixed description, namespace and agent roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HivePattern {
    pub name: &'static str,
    pub label: &'static str,
    pub namespace: &'static str,
    pub agents: &'static str,
}

pub const HIVE_PATTERNS: [HivePattern; 4] = [
    HivePattern {
        name: "full-stack-development",
        label: "Full-Stack Development",
        namespace: "full-stack swarm",
        agents: "architect,coder,tester,devops,planner",
    },
    HivePattern {
        name: "frontend-development",
        label: "Front-End Development",
        namespace: "front-end swarm",
        agents: "frontend-developer,designer,tester",
    },
    HivePattern {
        name: "backend-development",
        label: "Back-End Development",
        namespace: "back-end swarm",
        agents: "backend-developer,db-admin,security",
    },
    HivePattern {
        name: "distributed-system",
        label: "Distributed System",
        namespace: "distributed system swarm",
        agents: "architect,backend-developer,network-engineer,security,devops,tester",
    },
];

impl FlowCli {
    /// `init --force`, optionally naming the project and enabling hive/neural features.
    pub async fn init(&self, project_name: Option<&str>, hive_mind: bool, neural_enhanced: bool) {
        let args = ArgList::new(["init", "--force"])
            .opt_if("--project-name", project_name)
            .flag("--hive-mind", hive_mind)
            .flag("--neural-enhanced", neural_enhanced);
        self.execute(args).await;
    }

    pub async fn init_rollback(&self) {
        self.execute(ArgList::new(["init", "--rollback"])).await;
    }

    /// Spawn a hive. `agents` is either a count or a comma-separated role list.
    pub async fn hive_spawn(
        &self,
        description: &str,
        namespace: Option<&str>,
        agents: Option<&str>,
        temp: bool,
    ) {
        let args = ArgList::new(["hive-mind", "spawn"])
            .arg(description)
            .arg("--claude")
            .opt_if("--namespace", namespace)
            .opt_if("--agents", agents)
            .flag("--temp", temp);
        self.execute(args).await;
    }

    pub async fn hive_resume(&self, session_id: &str) {
        self.execute(ArgList::new(["hive-mind", "resume"]).arg(session_id))
            .await;
    }

    pub async fn hive_status(&self) -> String {
        self.execute_capturing(ArgList::new(["hive-mind", "status"]))
            .await
    }

    /// claude-flow's own interactive hive wizard.
    pub async fn hive_wizard(&self) {
        self.execute(ArgList::new(["hive-mind", "wizard"])).await;
    }

    pub async fn hive_sessions(&self) -> String {
        self.execute_capturing(ArgList::new(["hive-mind", "sessions"]))
            .await
    }

    /// A large development hive in the `full-dev` namespace.
    pub async fn deploy_full_development_swarm(&self, description: &str, agents: u32) {
        self.hive_spawn(description, Some("full-dev"), Some(&agents.to_string()), false)
            .await;
    }

    /// A researcher/analyst hive for exploring `domain`.
    pub async fn research_swarm(&self, domain: &str) {
        self.hive_spawn(
            &format!("Research {}", domain),
            None,
            Some("researcher,analyst"),
            false,
        )
        .await;
    }

    pub async fn hive_pattern(&self, pattern: &HivePattern) {
        self.hive_spawn(pattern.name, Some(pattern.namespace), Some(pattern.agents), false)
            .await;
    }

    /// Roll back to a recovery point, `last-safe-state` by default in the menus.
    pub async fn recovery(&self, point: &str) {
        self.execute(ArgList::new(["recovery"]).opt("--point", point))
            .await;
    }

    pub async fn health_auto_heal(&self) {
        self.execute(ArgList::new([
            "health",
            "check",
            "--components",
            "all",
            "--auto-heal",
        ]))
        .await;
    }

    pub async fn fault_tolerance_retry(&self) {
        self.execute(ArgList::new([
            "fault",
            "tolerance",
            "--strategy",
            "retry-with-learning",
        ]))
        .await;
    }

    pub async fn bottleneck_auto_optimize(&self) {
        self.execute(ArgList::new(["bottleneck", "analyze", "--auto-optimize"]))
            .await;
    }
}
