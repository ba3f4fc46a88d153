use std::path::PathBuf;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while building a manifest.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// A root path does not exist.
    #[error("file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    /// A root path is a directory. Only plain files are accepted.
    #[error("directories are not supported: {}", path.display())]
    NotSupported { path: PathBuf },

    /// Opening, reading or inspecting a root failed.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store's total length disagrees with the sum of the file records.
    #[error("store total length {actual}, expected {expected}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// No root paths were given.
    #[error("no files to build a manifest from")]
    NoFiles,

    /// The virtual file store or the piece hashing over it failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl MetainfoError {
    /// Returns true for any length disagreement, whether caught when the
    /// totals were compared or when a file was opened by the store.
    pub fn is_size_mismatch(&self) -> bool {
        matches!(
            self,
            MetainfoError::SizeMismatch { .. }
                | MetainfoError::Storage(StorageError::SizeMismatch { .. })
        )
    }
}
