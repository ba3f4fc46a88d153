//! piecemeal - piece-addressed manifests for local files
//!
//! This library turns an ordered list of files into a manifest that treats
//! them as one byte stream cut into fixed-size pieces, each identified by
//! its SHA-1. The file contents are never modified.
//!
//! # Modules
//!
//! - [`metainfo`] - Manifest types, the builder and piece hashing
//! - [`storage`] - A virtual, read-verify store spanning several files
//! - [`fs`] - File system capability with disk and in-memory backends
//! - [`constants`] - Piece sizing and buffer constants

pub mod constants;
pub mod fs;
pub mod metainfo;
pub mod storage;

pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use metainfo::{
    build_manifest, BuildObserver, FileRecord, MetaInfo, MetaInfoBuilder, MetainfoError,
    NoopObserver, TracingObserver,
};
pub use storage::{FileHandle, PieceSink, PieceSource, StorageError, VirtualFileStore};
