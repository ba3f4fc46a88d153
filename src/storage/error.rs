use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected size for {path}: expected {expected} bytes, found {actual}")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("new data does not match existing data in {path} at offset {offset}")]
    DataMismatch { path: PathBuf, offset: u64 },

    #[error("range {offset}+{length} exceeds {path} ({file_length} bytes)")]
    OutOfRange {
        path: PathBuf,
        offset: u64,
        length: u64,
        file_length: u64,
    },

    #[error("range {offset}+{length} exceeds total length {total_length}")]
    OutOfBounds {
        offset: u64,
        length: u64,
        total_length: u64,
    },

    #[error("invalid file handle: {0}")]
    InvalidHandle(usize),

    #[error("piece length must be non-zero")]
    InvalidPieceLength,
}
