use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of the sampling loop.
///
/// Per-process read failures never surface here: a process that exits
/// between enumeration and sampling is simply left out of the cycle.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("counter source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("cannot enumerate processes under {path}: {source}")]
    EnumerationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    pub fn source_unavailable<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        MonitorError::SourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn enumeration_unavailable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        MonitorError::EnumerationUnavailable {
            path: path.into(),
            source,
        }
    }
}
