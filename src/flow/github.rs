//! GitHub integration modes.

use super::{ArgList, FlowCli};

impl FlowCli {
    /// Pass-through to `github <mode>` with arbitrary trailing arguments.
    pub async fn github_mode(&self, mode: &str, extra: &[String]) {
        self.execute(ArgList::new(["github"]).arg(mode).extend(extra.iter().cloned()))
            .await;
    }

    pub async fn github_repo_analyze(&self, analysis_type: Option<&str>, target: Option<&str>) {
        let args = ArgList::new(["github", "repo-analyze"])
            .opt_if("--analysis-type", analysis_type)
            .opt_if("--target", target);
        self.execute(args).await;
    }

    pub async fn github_pr_manage(&self, reviewers: Option<&str>, ai_powered: bool) {
        let args = ArgList::new(["github", "pr-manager"])
            .opt_if("--reviewers", reviewers)
            .flag("--ai-powered", ai_powered);
        self.execute(args).await;
    }

    pub async fn github_issue_track(&self, project: Option<&str>) {
        self.execute(ArgList::new(["github", "issue-tracker"]).opt_if("--project", project))
            .await;
    }

    pub async fn github_release_coord(&self, version: &str, auto_changelog: bool) {
        let args = ArgList::new(["github", "release-manager"])
            .opt("--version", version)
            .flag("--auto-changelog", auto_changelog);
        self.execute(args).await;
    }

    pub async fn github_workflow_auto(&self, file: &str) {
        self.execute(ArgList::new(["github", "workflow-auto"]).opt("--file", file))
            .await;
    }

    pub async fn github_code_review(&self, multi_reviewer: bool, ai_powered: bool) {
        let args = ArgList::new(["github", "code-review"])
            .flag("--multi-reviewer", multi_reviewer)
            .flag("--ai-powered", ai_powered);
        self.execute(args).await;
    }

    pub async fn github_sync_coordinator(&self, multi_package: bool) {
        let args =
            ArgList::new(["github", "sync-coordinator"]).flag("--multi-package", multi_package);
        self.execute(args).await;
    }

    pub async fn github_repo_architect_optimize(
        &self,
        security_focused: bool,
        compliance: Option<&str>,
    ) {
        let args = ArgList::new(["github", "repo-architect", "optimize"])
            .flag("--security-focused", security_focused)
            .opt_if("--compliance", compliance);
        self.execute(args).await;
    }
}
