//! Named shortcuts for argument vectors, kept for one session.

use anyhow::{Result, bail};

use crate::flow::FlowCli;

/// Insertion-ordered store of quick commands.
#[derive(Debug, Clone, Default)]
pub struct QuickCommands {
    entries: Vec<(String, Vec<String>)>,
}

impl QuickCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `command_line` split on whitespace under `name`, replacing any
    /// previous entry of that name in place.
    pub fn add(&mut self, name: &str, command_line: &str) {
        let args: Vec<String> = command_line.split_whitespace().map(String::from).collect();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = args,
            None => self.entries.push((name.to_string(), args)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, args)| args.as_slice())
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() != before
    }

    pub fn list(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub async fn run(&self, name: &str, cli: &FlowCli) -> Result<()> {
        let Some(args) = self.get(name) else {
            bail!("Unknown quick command '{}'", name);
        };
        tracing::info!("Running quick command '{}'", name);
        cli.execute(args.to_vec()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::testing::{argv, issued, recording_cli};

    #[test]
    fn test_add_get_list_remove() {
        let mut quick = QuickCommands::new();
        assert!(quick.is_empty());

        quick.add("status", "hive-mind   status");
        quick.add("stats", "memory stats");
        assert_eq!(quick.get("status").unwrap(), argv(&["hive-mind", "status"]).as_slice());

        let names: Vec<_> = quick.list().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["status", "stats"]);

        assert!(quick.remove("status"));
        assert!(!quick.remove("status"));
        assert!(quick.get("status").is_none());
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut quick = QuickCommands::new();
        quick.add("a", "swarm init");
        quick.add("b", "memory list");
        quick.add("a", "swarm destroy");

        assert_eq!(quick.list().len(), 2);
        assert_eq!(quick.list()[0].0, "a");
        assert_eq!(quick.get("a").unwrap(), argv(&["swarm", "destroy"]).as_slice());
    }

    #[tokio::test]
    async fn test_run_executes_stored_args() {
        let (cli, runner) = recording_cli();
        let mut quick = QuickCommands::new();
        quick.add("sessions", "hive-mind sessions");

        quick.run("sessions", &cli).await.unwrap();
        assert_eq!(issued(&runner), vec![argv(&["hive-mind", "sessions"])]);
    }

    #[tokio::test]
    async fn test_run_unknown_is_error() {
        let (cli, runner) = recording_cli();
        let err = QuickCommands::new().run("nope", &cli).await.unwrap_err();
        assert!(err.to_string().contains("Unknown quick command 'nope'"));
        assert!(runner.calls().is_empty());
    }
}
