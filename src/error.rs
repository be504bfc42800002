//! Domain error taxonomy shared by the loader, the safe writer and every
//! text operation. Operation boundaries wrap these in `anyhow` with context.

use std::io;
use std::path::{Path, PathBuf};

/// Failures a text operation can report.
///
/// An empty search or replace result is an outcome, not an error.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Target path does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem refused access
    #[error("access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    /// Bytes could not be decoded and lossy fallback was disabled
    #[error("could not decode {} as {encoding}", .path.display())]
    DecodeFailure { path: PathBuf, encoding: String },

    /// User-supplied pattern failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Undo requested but no `.bak` sibling exists
    #[error("no backup available: {} does not exist", .0.display())]
    NoBackup(PathBuf),

    /// Any other filesystem failure
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TextError {
    /// Classify an I/O error against the path it occurred on.
    pub fn from_io(op: &'static str, path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => TextError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => TextError::AccessDenied(path.to_path_buf()),
            _ => TextError::Io {
                op,
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

impl From<regex::Error> for TextError {
    fn from(e: regex::Error) -> Self {
        TextError::InvalidPattern(e.to_string())
    }
}
