//! Backup, configuration, log and hook commands.

use super::{ArgList, FlowCli};

impl FlowCli {
    pub async fn backup_create(&self, file: &str) {
        self.execute(ArgList::new(["backup", "create"]).arg(file))
            .await;
    }

    pub async fn restore_system(&self, file: &str) {
        self.execute(ArgList::new(["restore", "system"]).arg(file))
            .await;
    }

    pub async fn config_manage(&self, operation: &str, file: Option<&str>) {
        self.execute(ArgList::new(["config", "manage"]).arg(operation).arg_opt(file))
            .await;
    }

    pub async fn features_detect(&self) {
        self.execute(ArgList::new(["config", "features-detect"]))
            .await;
    }

    pub async fn log_analysis(&self, file: &str) {
        self.execute(ArgList::new(["log", "analysis"]).arg(file))
            .await;
    }

    /// Fire one claude-flow hook with free-form parameters.
    pub async fn hook(&self, name: &str, params: &[String]) {
        self.execute(ArgList::new(["hooks"]).arg(name).extend(params.iter().cloned()))
            .await;
    }

    pub async fn fix_hook_variables(&self, target: Option<&str>, test: bool) {
        let args = ArgList::new(["fix-hook-variables"])
            .arg_opt(target)
            .flag("--test", test);
        self.execute(args).await;
    }
}
