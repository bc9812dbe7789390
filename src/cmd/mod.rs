//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module        | Commands handled                                       |
//! |---------------|---------------------------------------------------------|
//! | `flow`        | every facade operation (`spawn`, `memory-query`, ...)  |
//! | `project`     | `NewProject`, `RunBg`                                  |
//! | `interactive` | `Manager`, `Tui`                                       |

pub mod flow;
pub mod interactive;
pub mod project;

pub use flow::{FlowCommand, cmd_flow};
pub use interactive::{cmd_manager, cmd_tui};
pub use project::{cmd_new_project, cmd_run_bg};
