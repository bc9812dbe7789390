//! Project creation and background runs.

use anyhow::{Result, bail};
use console::style;
use std::path::Path;
use std::sync::Arc;

use flo::config::Config;
use flo::credentials::Credentials;
use flo::flow::FlowCli;
use flo::project::ProjectManager;
use flo::ui::icons::{CHECK, FOLDER};

/// Create a project for `idea` and run the orchestration sequence against it.
///
/// # Arguments
/// * `base_dir`: overrides `[projects] base_dir` from `flo.toml`
/// * `full`: follow up with the full automation pass (SPARC, heal, report, release)
pub async fn cmd_new_project(
    config: &Config,
    cli: Arc<FlowCli>,
    credentials: &Credentials,
    idea: &str,
    base_dir: Option<&Path>,
    template: Option<&str>,
    full: bool,
) -> Result<()> {
    let manager = ProjectManager::from_config(config, cli, credentials, base_dir);
    println!("{}Creating project for '{}'", FOLDER, style(idea).cyan());

    if full {
        let outcome = manager.run_full_automation(idea, template).await?;
        println!("{}Project ready at {}", CHECK, outcome.project_dir.display());
        if !outcome.performance_report.is_empty() {
            println!();
            println!("{}", outcome.performance_report);
        }
    } else {
        let path = manager.create_project(idea, template).await?;
        println!("{}Project ready at {}", CHECK, path.display());
    }
    Ok(())
}

/// Launch claude-flow with `args` detached inside a screen session.
pub async fn cmd_run_bg(cli: &FlowCli, args: &[String]) -> Result<()> {
    let Some(session) = cli.run_background(args.to_vec()).await else {
        bail!("Failed to start a background session; is screen installed?");
    };
    println!("{}Started background session '{}'", CHECK, session);
    println!("Attach with: screen -r {}", session);
    Ok(())
}
