use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers of the probe.
///
/// Layout and content failures are not errors: they come back as `None` or an
/// empty field map. This type covers the cases a caller has to tell apart from
/// "format not recognized".
#[derive(Debug, Error)]
pub enum ProbeError {
    /// I/O error while reading the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The path does not exist at all
    #[error("No such file: {}", .0.display())]
    NotFound(PathBuf),
}
