//! The interactive front ends: the menu manager and the terminal UI.

use anyhow::Result;
use std::sync::Arc;

use flo::config::Config;
use flo::credentials::Credentials;
use flo::flow::FlowCli;
use flo::menu::Manager;
use flo::tui::{self, worker::Services};

pub async fn cmd_manager(
    config: Config,
    cli: Arc<FlowCli>,
    credentials: Credentials,
) -> Result<()> {
    let mut manager = Manager::new(config, cli, credentials);
    manager.run().await
}

/// Run the TUI on this thread; workers drive the current runtime.
pub fn cmd_tui(config: Config, cli: Arc<FlowCli>, credentials: Credentials) -> Result<()> {
    let handle = tokio::runtime::Handle::current();
    let services = Services::new(config, cli, credentials);
    tokio::task::block_in_place(|| tui::run(services, handle))
}
