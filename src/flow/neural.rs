//! Neural model and cognitive analysis commands.

use super::{ArgList, FlowCli};

/// Default epoch count for `neural train`.
pub const DEFAULT_EPOCHS: u32 = 50;

impl FlowCli {
    pub async fn neural_train(&self, pattern: &str, epochs: u32, data: Option<&str>) {
        let args = ArgList::new(["neural", "train"])
            .opt("--pattern", pattern)
            .opt("--epochs", epochs.to_string())
            .opt_if("--data", data);
        self.execute(args).await;
    }

    pub async fn neural_predict(&self, model: &str, input: &str) {
        let args = ArgList::new(["neural", "predict"])
            .opt("--model", model)
            .opt("--input", input);
        self.execute(args).await;
    }

    pub async fn cognitive_analyze(&self, behavior: &str) {
        self.execute(ArgList::new(["cognitive", "analyze"]).opt("--behavior", behavior))
            .await;
    }

    pub async fn pattern_recognize(&self, pattern: &str, input: Option<&str>) {
        let args = ArgList::new(["neural", "pattern-recognize"])
            .opt("--pattern", pattern)
            .opt_if("--input", input);
        self.execute(args).await;
    }

    pub async fn learning_adapt(&self, model: &str, data: Option<&str>) {
        let args = ArgList::new(["neural", "learning-adapt"])
            .opt("--model", model)
            .opt_if("--data", data);
        self.execute(args).await;
    }

    pub async fn neural_compress(&self, model: &str, output: Option<&str>) {
        let args = ArgList::new(["neural", "compress"])
            .opt("--model", model)
            .opt_if("--output", output);
        self.execute(args).await;
    }

    pub async fn ensemble_create(&self, models: &str, output: &str) {
        let args = ArgList::new(["neural", "ensemble-create"])
            .opt("--models", models)
            .opt("--output", output);
        self.execute(args).await;
    }

    pub async fn transfer_learn(&self, base: &str, data: &str) {
        let args = ArgList::new(["neural", "transfer-learn"])
            .opt("--base", base)
            .opt("--data", data);
        self.execute(args).await;
    }

    pub async fn neural_explain(&self, model: &str, input: &str) {
        let args = ArgList::new(["neural", "explain"])
            .opt("--model", model)
            .opt("--input", input);
        self.execute(args).await;
    }
}
