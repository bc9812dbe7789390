//! Swarm lifecycle and coordination commands.

use super::{ArgList, FlowCli};

impl FlowCli {
    /// Start (or continue) a swarm working on `task`.
    pub async fn swarm(&self, task: &str, continue_session: bool, strategy: Option<&str>) {
        let args = ArgList::new(["swarm"])
            .arg(task)
            .arg("--claude")
            .flag("--continue-session", continue_session)
            .opt_if("--strategy", strategy);
        self.execute(args).await;
    }

    pub async fn swarm_init(&self, description: Option<&str>) {
        self.execute(ArgList::new(["swarm", "init"]).arg_opt(description))
            .await;
    }

    pub async fn agent_spawn(&self, agent_type: &str, capabilities: &str, resources: &str) {
        let args = ArgList::new(["swarm", "agent-spawn"])
            .opt("--type", agent_type)
            .opt("--capabilities", capabilities)
            .opt("--resources", resources);
        self.execute(args).await;
    }

    pub async fn task_orchestrate(&self, description: &str) {
        self.execute(ArgList::new(["swarm", "task-orchestrate"]).arg(description))
            .await;
    }

    pub async fn swarm_monitor(&self, dashboard: bool, real_time: bool) -> String {
        let args = ArgList::new(["swarm", "monitor"])
            .flag("--dashboard", dashboard)
            .flag("--real-time", real_time);
        self.execute_capturing(args).await
    }

    pub async fn topology_optimize(&self) -> String {
        self.execute_capturing(ArgList::new(["swarm", "topology-optimize"]))
            .await
    }

    pub async fn load_balance(&self) -> String {
        self.execute_capturing(ArgList::new(["swarm", "load-balance"]))
            .await
    }

    pub async fn coordination_sync(&self) {
        self.execute(ArgList::new(["swarm", "coordination-sync"]))
            .await;
    }

    pub async fn swarm_scale(&self, size: &str) {
        self.execute(ArgList::new(["swarm", "scale"]).arg(size)).await;
    }

    pub async fn swarm_destroy(&self) {
        self.execute(ArgList::new(["swarm", "destroy"])).await;
    }
}

#[cfg(test)]
mod tests {
    use crate::flow::testing::{argv, issued, recording_cli};

    #[tokio::test]
    async fn test_swarm_flags() {
        let (cli, runner) = recording_cli();
        cli.swarm("Fix detected errors", true, None).await;
        cli.swarm("research", false, Some("research")).await;

        assert_eq!(
            issued(&runner),
            vec![
                argv(&["swarm", "Fix detected errors", "--claude", "--continue-session"]),
                argv(&["swarm", "research", "--claude", "--strategy", "research"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_swarm_tools() {
        let (cli, runner) = recording_cli();
        cli.swarm_init(None).await;
        cli.swarm_init(Some("mesh for api")).await;
        cli.agent_spawn("coder", "rust,sql", "cpu=2").await;
        cli.task_orchestrate("ship v2").await;
        cli.swarm_monitor(true, false).await;
        cli.topology_optimize().await;
        cli.load_balance().await;
        cli.coordination_sync().await;
        cli.swarm_scale("12").await;
        cli.swarm_destroy().await;

        assert_eq!(
            issued(&runner),
            vec![
                argv(&["swarm", "init"]),
                argv(&["swarm", "init", "mesh for api"]),
                argv(&[
                    "swarm",
                    "agent-spawn",
                    "--type",
                    "coder",
                    "--capabilities",
                    "rust,sql",
                    "--resources",
                    "cpu=2"
                ]),
                argv(&["swarm", "task-orchestrate", "ship v2"]),
                argv(&["swarm", "monitor", "--dashboard"]),
                argv(&["swarm", "topology-optimize"]),
                argv(&["swarm", "load-balance"]),
                argv(&["swarm", "coordination-sync"]),
                argv(&["swarm", "scale", "12"]),
                argv(&["swarm", "destroy"]),
            ]
        );
    }
}
