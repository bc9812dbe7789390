//! Memory namespace commands.

use super::{ArgList, FlowCli};

impl FlowCli {
    pub async fn memory_stats(&self) -> String {
        self.execute_capturing(ArgList::new(["memory", "stats"]))
            .await
    }

    pub async fn memory_list(&self) -> String {
        self.execute_capturing(ArgList::new(["memory", "list"]))
            .await
    }

    pub async fn memory_query(
        &self,
        term: &str,
        namespace: Option<&str>,
        limit: Option<u32>,
    ) -> String {
        let args = ArgList::new(["memory", "query"])
            .arg(term)
            .opt_if("--namespace", namespace)
            .opt_if("--limit", limit.map(|l| l.to_string()));
        self.execute_capturing(args).await
    }

    pub async fn memory_store(&self, key: &str, value: &str, namespace: Option<&str>) {
        let args = ArgList::new(["memory", "store"])
            .arg(key)
            .arg(value)
            .opt_if("--namespace", namespace);
        self.execute(args).await;
    }

    pub async fn memory_export(&self, file: &str, namespace: Option<&str>) {
        let args = ArgList::new(["memory", "export"])
            .arg(file)
            .opt_if("--namespace", namespace);
        self.execute(args).await;
    }

    pub async fn memory_import(&self, file: &str, namespace: Option<&str>) {
        let args = ArgList::new(["memory", "import"])
            .arg(file)
            .opt_if("--namespace", namespace);
        self.execute(args).await;
    }

    pub async fn memory_usage(&self) {
        self.execute(ArgList::new(["memory", "usage"])).await;
    }

    pub async fn memory_search(&self, term: &str, namespace: Option<&str>) {
        let args = ArgList::new(["memory", "search"])
            .arg(term)
            .opt_if("--namespace", namespace);
        self.execute(args).await;
    }

    pub async fn memory_persist(&self) {
        self.execute(ArgList::new(["memory", "persist"])).await;
    }

    pub async fn memory_namespace(&self, namespace: &str) {
        self.execute(ArgList::new(["memory", "namespace"]).arg(namespace))
            .await;
    }

    pub async fn memory_backup(&self, file: &str) {
        self.execute(ArgList::new(["memory", "backup"]).arg(file))
            .await;
    }

    pub async fn memory_restore(&self, file: &str) {
        self.execute(ArgList::new(["memory", "restore"]).arg(file))
            .await;
    }

    pub async fn memory_compress(&self) {
        self.execute(ArgList::new(["memory", "compress"])).await;
    }

    pub async fn memory_sync(&self) {
        self.execute(ArgList::new(["memory", "sync"])).await;
    }

    pub async fn memory_analytics(&self) {
        self.execute(ArgList::new(["memory", "analytics"])).await;
    }
}
