//! Fixed reference data shared by the menus and the terminal UI.

pub use crate::flow::{HIVE_PATTERNS, HivePattern};
use crate::project::Template;

/// claude-flow hook events, in menu order.
pub const HOOK_EVENTS: [&str; 11] = [
    "pre-task",
    "pre-search",
    "pre-edit",
    "pre-command",
    "post-edit",
    "post-task",
    "post-command",
    "notification",
    "session-start",
    "session-end",
    "session-restore",
];

pub const DEFAULT_BACKUP_FILE: &str = "backup.json";
pub const DEFAULT_RECOVERY_POINT: &str = "last-safe-state";
pub const DEFAULT_FULL_DEV_AGENTS: u32 = 10;

pub const CONCURRENCY_GUIDELINES: &str = "\
The golden rule of SPARC development:
- Batch every related operation into a single message: todo writes, file
  operations, memory calls and shell commands.
- Do not spread individual steps over several messages; it slows the swarm down.
- Right: create several files and push them in one SPARC run.
- Wrong: send one file, wait for the answer, then send the next.";

/// Choices offered by the project wizard; `None` means no template.
pub fn wizard_templates() -> Vec<Option<Template>> {
    Template::ALL
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::once(None))
        .collect()
}

/// Menu labels for [`wizard_templates`].
pub fn wizard_labels() -> Vec<&'static str> {
    wizard_templates()
        .into_iter()
        .map(|t| t.map_or("None", |t| t.display_name()))
        .collect()
}
