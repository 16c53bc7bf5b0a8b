use thiserror::Error;

use retro_probe_lib::ProbeError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The image could not be read
    #[error("{0}")]
    Probe(#[from] ProbeError),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some inputs failed; each was already reported
    #[error("{0}")]
    Failed(String),
}

impl CliError {
    pub(crate) fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}
