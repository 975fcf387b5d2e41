//! Lattice error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a lattice document
///
/// A missing document is not an error: it loads as an empty placeholder.
#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("Failed to read lattice document {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed lattice document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LatticeError {
    /// Path of the document that failed to load
    pub fn path(&self) -> &PathBuf {
        match self {
            LatticeError::Io { path, .. } => path,
            LatticeError::Parse { path, .. } => path,
        }
    }
}
