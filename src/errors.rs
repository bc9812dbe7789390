//! Typed error hierarchy for flo.
//!
//! Two top-level enums cover the two external collaborators:
//! - `RunError`: launching and waiting on the claude-flow child process
//! - `GenerateError`: the chat-completion document generator

use std::time::Duration;
use thiserror::Error;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` timed out after {secs}s", secs = .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("Failed to wait for child process: {0}")]
    Wait(#[source] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from the document generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("OPENROUTER_TOKEN is not set")]
    MissingToken,

    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Generator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Generator returned an empty document")]
    EmptyContent,

    #[error("Malformed generator response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
