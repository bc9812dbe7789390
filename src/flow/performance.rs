//! Performance reports, benchmarks and health checks.

use super::{ArgList, FlowCli};

impl FlowCli {
    pub async fn performance_report(&self) -> String {
        self.execute_capturing(ArgList::new(["performance", "report"]))
            .await
    }

    pub async fn bottleneck_analyze(&self) {
        self.execute(ArgList::new(["performance", "bottleneck-analyze"]))
            .await;
    }

    pub async fn token_usage(&self) {
        self.execute(ArgList::new(["performance", "token-usage"]))
            .await;
    }

    pub async fn benchmark_run(&self, name: &str) {
        self.execute(ArgList::new(["performance", "benchmark-run"]).opt("--name", name))
            .await;
    }

    pub async fn metrics_collect(&self) -> String {
        self.execute_capturing(ArgList::new(["performance", "metrics-collect"]))
            .await
    }

    pub async fn trend_analysis(&self) {
        self.execute(ArgList::new(["performance", "trend-analysis"]))
            .await;
    }

    pub async fn health_check(&self, components: Option<&str>) {
        let args = ArgList::new(["performance", "health-check"]).opt_if("--components", components);
        self.execute(args).await;
    }

    pub async fn diagnostic_run(&self) {
        self.execute(ArgList::new(["performance", "diagnostic-run"]))
            .await;
    }

    pub async fn usage_stats(&self) {
        self.execute(ArgList::new(["performance", "usage-stats"]))
            .await;
    }

    /// Memory statistics, memory listing, performance report and collected
    /// metrics, returned as titled sections.
    pub async fn metrics_collect_full(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Memory Stats", self.memory_stats().await),
            ("Memory List", self.memory_list().await),
            ("Performance Report", self.performance_report().await),
            ("Metrics", self.metrics_collect().await),
        ]
    }
}
