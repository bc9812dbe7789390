//! SPARC development modes and the composite SPARC workflow.

use super::{ArgList, FlowCli};

impl FlowCli {
    pub async fn sparc_mode(&self, mode_type: &str, auto_learn: bool) {
        let args = ArgList::new(["sparc", "mode"])
            .opt("--type", mode_type)
            .flag("--auto-learn", auto_learn);
        self.execute(args).await;
    }

    /// Run every SPARC phase in one go.
    pub async fn sparc_workflow_all(&self, ai_guided: bool, memory_enhanced: bool) {
        let args = ArgList::new(["sparc", "workflow", "--phases", "all"])
            .flag("--ai-guided", ai_guided)
            .flag("--memory-enhanced", memory_enhanced);
        self.execute(args).await;
    }

    pub async fn sparc_modes(&self) -> String {
        self.execute_capturing(ArgList::new(["sparc", "modes"]))
            .await
    }

    pub async fn sparc_info(&self, mode: &str) -> String {
        self.execute_capturing(ArgList::new(["sparc", "info"]).arg(mode))
            .await
    }

    pub async fn sparc_run(&self, mode: &str, task: &str, parallel: bool, batch_optimize: bool) {
        let args = ArgList::new(["sparc", "run"])
            .arg(mode)
            .arg(task)
            .flag("--parallel", parallel)
            .flag("--batch-optimize", batch_optimize);
        self.execute(args).await;
    }

    pub async fn sparc_tdd(&self, feature: &str, batch_tdd: bool) {
        let args = ArgList::new(["sparc", "tdd"])
            .arg(feature)
            .flag("--batch-tdd", batch_tdd);
        self.execute(args).await;
    }

    pub async fn sparc_batch(&self, modes: &str, task: &str) {
        self.execute(ArgList::new(["sparc", "batch"]).arg(modes).arg(task))
            .await;
    }

    pub async fn sparc_pipeline(&self, task: &str) {
        self.execute(ArgList::new(["sparc", "pipeline"]).arg(task))
            .await;
    }

    pub async fn sparc_concurrent(&self, mode: &str, tasks_file: &str) {
        self.execute(ArgList::new(["sparc", "concurrent"]).arg(mode).arg(tasks_file))
            .await;
    }

    /// Specification, architecture, TDD implementation and integration for `feature`.
    pub async fn sparc_full_workflow(&self, feature: &str, parallel: bool, batch_tdd: bool) {
        self.sparc_run(
            "spec-pseudocode",
            &format!("Define {} requirements", feature),
            parallel,
            false,
        )
        .await;
        self.sparc_run(
            "architect",
            &format!("Design {} architecture", feature),
            parallel,
            false,
        )
        .await;
        self.sparc_tdd(&format!("implement {}", feature), batch_tdd)
            .await;
        self.sparc_run("integration", &format!("integrate {}", feature), parallel, false)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use crate::flow::testing::{argv, issued, recording_cli};

    #[tokio::test]
    async fn test_sparc_commands() {
        let (cli, runner) = recording_cli();
        cli.sparc_mode("neural-tdd", true).await;
        cli.sparc_workflow_all(true, true).await;
        cli.sparc_modes().await;
        cli.sparc_info("architect").await;
        cli.sparc_run("coder", "write parser", false, false).await;
        cli.sparc_run("coder", "write parser", true, true).await;
        cli.sparc_tdd("login", false).await;
        cli.sparc_batch("spec-pseudocode,architect", "auth").await;
        cli.sparc_pipeline("auth").await;
        cli.sparc_concurrent("coder", "tasks.txt").await;

        assert_eq!(
            issued(&runner),
            vec![
                argv(&["sparc", "mode", "--type", "neural-tdd", "--auto-learn"]),
                argv(&[
                    "sparc",
                    "workflow",
                    "--phases",
                    "all",
                    "--ai-guided",
                    "--memory-enhanced"
                ]),
                argv(&["sparc", "modes"]),
                argv(&["sparc", "info", "architect"]),
                argv(&["sparc", "run", "coder", "write parser"]),
                argv(&[
                    "sparc",
                    "run",
                    "coder",
                    "write parser",
                    "--parallel",
                    "--batch-optimize"
                ]),
                argv(&["sparc", "tdd", "login"]),
                argv(&["sparc", "batch", "spec-pseudocode,architect", "auth"]),
                argv(&["sparc", "pipeline", "auth"]),
                argv(&["sparc", "concurrent", "coder", "tasks.txt"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_full_workflow_sequence() {
        let (cli, runner) = recording_cli();
        cli.sparc_full_workflow("chat app", true, true).await;

        assert_eq!(
            issued(&runner),
            vec![
                argv(&[
                    "sparc",
                    "run",
                    "spec-pseudocode",
                    "Define chat app requirements",
                    "--parallel"
                ]),
                argv(&["sparc", "run", "architect", "Design chat app architecture", "--parallel"]),
                argv(&["sparc", "tdd", "implement chat app", "--batch-tdd"]),
                argv(&["sparc", "run", "integration", "integrate chat app", "--parallel"]),
            ]
        );
    }
}
