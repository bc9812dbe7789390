//! Integration tests for flo
//!
//! Every test runs with `--dry-run --skip-setup` so nothing is installed and
//! no claude-flow process is spawned; the recorder prints each command line
//! it would have run.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A flo command isolated from the caller's tokens.
fn flo() -> Command {
    let mut cmd = cargo_bin_cmd!("flo");
    cmd.env_remove("OPENROUTER_TOKEN")
        .env_remove("GIT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// A dry-run flo command rooted in `dir`.
fn flo_dry(dir: &TempDir) -> Command {
    let mut cmd = flo();
    cmd.current_dir(dir.path()).args(["--dry-run", "--skip-setup"]);
    cmd
}

fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_flo_help() {
        flo()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("new-project"))
            .stdout(predicate::str::contains("memory-query"))
            .stdout(predicate::str::contains("sparc-full"));
    }

    #[test]
    fn test_flo_version() {
        flo().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        flo().arg("make-coffee").assert().failure();
    }

    #[test]
    fn test_missing_required_argument_fails() {
        let dir = create_temp_project();
        flo_dry(&dir).arg("spawn").assert().failure();
    }
}

// =============================================================================
// Facade Commands
// =============================================================================

mod facade {
    use super::*;

    #[test]
    fn test_spawn_prints_argument_vector() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["spawn", "build api", "--agents", "3", "--temp"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "[dry-run] npx claude-flow@alpha hive-mind spawn build api --claude --agents 3 --temp",
            ));
    }

    #[test]
    fn test_memory_query_with_limit() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["memory-query", "error", "--namespace", "proj", "--limit", "5"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "[dry-run] npx claude-flow@alpha memory query error --namespace proj --limit 5",
            ));
    }

    #[test]
    fn test_neural_train_default_epochs() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["neural-train", "--pattern", "coordination"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "neural train --pattern coordination --epochs 50",
            ));
    }

    #[test]
    fn test_github_passthrough_keeps_hyphen_args() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["github", "pr-manager", "--ai-powered", "--reviewers", "bob"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "[dry-run] npx claude-flow@alpha github pr-manager --ai-powered --reviewers bob",
            ));
    }

    #[test]
    fn test_hook_trailing_params() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["hook", "pre-task", "--description", "setup"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "hooks pre-task --description setup",
            ));
    }

    #[test]
    fn test_sparc_full_runs_four_steps() {
        let dir = create_temp_project();
        let output = flo_dry(&dir)
            .args(["sparc-full", "login"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.matches("[dry-run]").count(), 4);
        assert!(stdout.contains("sparc tdd implement login"));
    }

    #[test]
    fn test_release_version_is_positional() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["github-release-coord", "2.1.0", "--auto-changelog"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "github release-manager --version 2.1.0 --auto-changelog",
            ));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_flo_toml_overrides_executable() {
        let dir = create_temp_project();
        fs::write(
            dir.path().join("flo.toml"),
            "[runner]\nexecutable = \"claude-flow\"\nprefix = []\n",
        )
        .unwrap();

        flo_dry(&dir)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("[dry-run] claude-flow hive-mind status"));
    }

    #[test]
    fn test_malformed_flo_toml_fails() {
        let dir = create_temp_project();
        fs::write(dir.path().join("flo.toml"), "[runner\nexecutable = ").unwrap();

        flo_dry(&dir).arg("status").assert().failure();
    }

    #[test]
    fn test_project_dir_flag() {
        let dir = create_temp_project();
        let elsewhere = create_temp_project();
        flo()
            .current_dir(elsewhere.path())
            .args(["--dry-run", "--skip-setup", "--project-dir"])
            .arg(dir.path())
            .arg("sessions")
            .assert()
            .success();

        assert!(dir.path().join("flo.log").exists());
        assert!(!elsewhere.path().join("flo.log").exists());
    }

    #[test]
    fn test_log_file_is_written() {
        let dir = create_temp_project();
        flo_dry(&dir).arg("memory-stats").assert().success();

        let log = fs::read_to_string(dir.path().join("flo.log")).unwrap();
        assert!(log.contains("Running: npx claude-flow@alpha memory stats"));
    }

    #[test]
    fn test_timeout_flag_is_accepted() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["--timeout", "0", "status"])
            .assert()
            .success();
    }
}

// =============================================================================
// Projects and Background Runs
// =============================================================================

mod projects {
    use super::*;

    #[test]
    fn test_new_project_creates_scaffold() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["new-project", "Todo Web App", "--template", "WebApp"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Project ready at"))
            .stdout(predicate::str::contains(
                "[dry-run] npx claude-flow@alpha init --force --project-name todo-web-app --hive-mind --neural-enhanced",
            ))
            .stdout(predicate::str::contains("sparc tdd implement Todo Web App --batch-tdd"))
            .stdout(predicate::str::contains("release-manager --version 1.0.0").not());

        let project = dir.path().join("projects/todo-web-app");
        assert!(project.join("src").is_dir());
        assert!(project.join("tests").is_dir());
        assert!(project.join("src/backend/app.py").exists());
        assert!(project.join("src/frontend/index.html").exists());
        // no OpenRouter token, so no documents
        assert!(!project.join("concept.md").exists());
    }

    #[test]
    fn test_new_project_base_dir() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["new-project", "cli notes", "--base-dir", "work"])
            .assert()
            .success();

        assert!(dir.path().join("work/cli-notes/src").is_dir());
        assert!(!dir.path().join("projects").exists());
    }

    #[test]
    fn test_new_project_skips_init_when_marker_exists() {
        let dir = create_temp_project();
        fs::create_dir_all(dir.path().join("projects/inventory/.hive-mind")).unwrap();

        flo_dry(&dir)
            .args(["new-project", "Inventory"])
            .assert()
            .success()
            .stdout(predicate::str::contains("init --force").not());
    }

    #[test]
    fn test_run_bg_uses_screen() {
        let dir = create_temp_project();
        flo_dry(&dir)
            .args(["run-bg", "swarm", "long task", "--claude"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "[dry-run] screen -dmS claude_flow_",
            ))
            .stdout(predicate::str::contains("npx claude-flow@alpha swarm long task --claude"))
            .stdout(predicate::str::contains("Attach with: screen -r claude_flow_"));
    }

    #[test]
    fn test_run_bg_requires_args() {
        let dir = create_temp_project();
        flo_dry(&dir).arg("run-bg").assert().failure();
    }
}
