use super::{ArgList, FlowCli};

impl FlowCli {
    pub async fn security_scan(&self, deep: bool, report: bool) {
        let args = ArgList::new(["security", "scan"])
            .flag("--deep", deep)
            .flag("--report", report);
        self.execute(args).await;
    }

    pub async fn security_metrics(&self, last: Option<&str>) {
        self.execute(ArgList::new(["security", "metrics"]).opt_if("--last", last))
            .await;
    }

    pub async fn security_audit(&self, full_trace: bool) {
        self.execute(ArgList::new(["security", "audit"]).flag("--full-trace", full_trace))
            .await;
    }

    /// Scan followed by an audit.
    pub async fn security_scan_full(&self, deep: bool, report: bool, full_trace: bool) {
        self.security_scan(deep, report).await;
        self.security_audit(full_trace).await;
    }
}
