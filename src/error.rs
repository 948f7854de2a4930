use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::report::FileFailure;

/// Failures of the merge pipeline
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("None of the {} selected files could be read", failures.len())]
    NoUsableInput { failures: Vec<FileFailure> },
}
