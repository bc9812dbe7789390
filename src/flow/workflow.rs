//! Workflow, batch and pipeline commands.

use super::{ArgList, FlowCli};

impl FlowCli {
    pub async fn workflow_create(&self, name: &str, parallel: bool) {
        let args = ArgList::new(["workflow", "create"])
            .opt("--name", name)
            .flag("--parallel", parallel);
        self.execute(args).await;
    }

    pub async fn batch_process(&self, items: &str, concurrent: bool) {
        let args = ArgList::new(["batch", "process"])
            .opt("--items", items)
            .flag("--concurrent", concurrent);
        self.execute(args).await;
    }

    pub async fn pipeline_create(&self, config: &str) {
        self.execute(ArgList::new(["pipeline", "create"]).opt("--config", config))
            .await;
    }

    pub async fn workflow_execute(&self, name: &str) {
        self.execute(ArgList::new(["workflow", "execute"]).opt("--name", name))
            .await;
    }

    pub async fn workflow_export(&self, name: &str, output: &str) {
        let args = ArgList::new(["workflow", "export"])
            .opt("--name", name)
            .opt("--output", output);
        self.execute(args).await;
    }

    pub async fn automation_setup(&self, config: &str) {
        self.execute(ArgList::new(["workflow", "automation-setup"]).opt("--config", config))
            .await;
    }

    pub async fn scheduler_manage(&self, schedule: &str, action: &str) {
        let args = ArgList::new(["workflow", "scheduler-manage"])
            .opt("--schedule", schedule)
            .opt("--action", action);
        self.execute(args).await;
    }

    pub async fn trigger_setup(&self, name: &str, target: &str) {
        let args = ArgList::new(["workflow", "trigger-setup"])
            .opt("--name", name)
            .opt("--target", target);
        self.execute(args).await;
    }

    pub async fn parallel_execute(&self, tasks: &str) {
        self.execute(ArgList::new(["workflow", "parallel-execute"]).opt("--tasks", tasks))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use crate::flow::testing::{argv, issued, recording_cli};

    #[tokio::test]
    async fn test_workflow_commands() {
        let (cli, runner) = recording_cli();
        cli.workflow_create("release", true).await;
        cli.workflow_create("nightly", false).await;
        cli.batch_process("a,b,c", true).await;
        cli.pipeline_create("pipe.json").await;
        cli.workflow_execute("release").await;
        cli.workflow_export("release", "release.json").await;
        cli.automation_setup("auto.json").await;
        cli.scheduler_manage("0 3 * * *", "add").await;
        cli.trigger_setup("on-push", "release").await;
        cli.parallel_execute("lint,test").await;

        assert_eq!(
            issued(&runner),
            vec![
                argv(&["workflow", "create", "--name", "release", "--parallel"]),
                argv(&["workflow", "create", "--name", "nightly"]),
                argv(&["batch", "process", "--items", "a,b,c", "--concurrent"]),
                argv(&["pipeline", "create", "--config", "pipe.json"]),
                argv(&["workflow", "execute", "--name", "release"]),
                argv(&["workflow", "export", "--name", "release", "--output", "release.json"]),
                argv(&["workflow", "automation-setup", "--config", "auto.json"]),
                argv(&[
                    "workflow",
                    "scheduler-manage",
                    "--schedule",
                    "0 3 * * *",
                    "--action",
                    "add"
                ]),
                argv(&["workflow", "trigger-setup", "--name", "on-push", "--target", "release"]),
                argv(&["workflow", "parallel-execute", "--tasks", "lint,test"]),
            ]
        );
    }
}
