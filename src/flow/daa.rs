//! Dynamic agent architecture (DAA) commands.

use super::{ArgList, FlowCli};

/// Parameters for `daa agent-create`.
#[derive(Debug, Clone, Default)]
pub struct AgentSpec<'a> {
    pub agent_type: &'a str,
    pub capabilities: &'a str,
    pub resources: &'a str,
    pub security_level: Option<&'a str>,
    pub sandbox: bool,
}

impl FlowCli {
    pub async fn daa_agent_create(&self, spec: &AgentSpec<'_>) {
        let args = ArgList::new(["daa", "agent-create"])
            .opt("--type", spec.agent_type)
            .opt("--capabilities", spec.capabilities)
            .opt("--resources", spec.resources)
            .opt_if("--security-level", spec.security_level)
            .flag("--sandbox", spec.sandbox);
        self.execute(args).await;
    }

    pub async fn daa_capability_match(&self, requirements: &str) {
        let args =
            ArgList::new(["daa", "capability-match"]).opt("--task-requirements", requirements);
        self.execute(args).await;
    }

    pub async fn daa_lifecycle_manage(&self, agent_id: &str, action: &str) {
        let args = ArgList::new(["daa", "lifecycle-manage"])
            .opt("--agentId", agent_id)
            .opt("--action", action);
        self.execute(args).await;
    }

    pub async fn daa_resource_alloc(&self, agent_id: &str, cpu: &str, memory: &str) {
        let args = ArgList::new(["daa", "resource-alloc"])
            .opt("--agentId", agent_id)
            .opt("--cpu", cpu)
            .opt("--memory", memory);
        self.execute(args).await;
    }

    pub async fn daa_communication(&self, source: &str, target: &str, message: &str) {
        let args = ArgList::new(["daa", "communication"])
            .opt("--source", source)
            .opt("--target", target)
            .opt("--message", message);
        self.execute(args).await;
    }

    pub async fn daa_consensus(&self, proposal: &str) {
        self.execute(ArgList::new(["daa", "consensus"]).opt("--proposal", proposal))
            .await;
    }
}
