//! Error types for the build pipeline.

use std::path::PathBuf;

use slashc_catalog::{CatalogError, CommandRef};
use slashc_manifest::ManifestError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

/// Failures that abort a build.
///
/// A missing prompt document is not among them: the pipeline reports it
/// and moves on.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest for {entry}: {source}")]
    Manifest {
        entry: CommandRef,
        source: ManifestError,
    },
}

impl BuildError {
    /// Filesystem path involved in the failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            BuildError::CreateDir { path, .. }
            | BuildError::Read { path, .. }
            | BuildError::Write { path, .. } => Some(path),
            BuildError::Catalog(_) | BuildError::Manifest { .. } => None,
        }
    }
}
