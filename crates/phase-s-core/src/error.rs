use std::path::PathBuf;

use thiserror::Error;

use crate::frame::Resolution;

#[derive(Error, Debug)]
pub enum PhaseSError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error(
        "{}: resolution {found} differs from sequence resolution {expected}",
        .path.display()
    )]
    ResolutionMismatch {
        path: PathBuf,
        expected: Resolution,
        found: Resolution,
    },
}

impl PhaseSError {
    pub(crate) fn format(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PhaseSError>;
