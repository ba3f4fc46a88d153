//! Multi-file storage presented as one logical byte stream.
//!
//! A manifest addresses its content as the concatenation of every file in
//! declared order, and pieces may span file boundaries. This module maps
//! logical ranges onto file regions and reads them back.
//!
//! # Components
//!
//! - [`VirtualFileStore`] - size-checked, verify-only store over existing files
//! - [`PieceSource`] / [`PieceSink`] - logical read and write capabilities
//! - [`FileEntry`] - a file's length and offset in the logical stream
//! - [`FileSpan`] - the part of a logical range inside one file
//!
//! # Examples
//!
//! ```
//! use piecemeal::fs::MemoryFileSystem;
//! use piecemeal::storage::{PieceSource, VirtualFileStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFileSystem::new();
//! fs.insert_file("a.bin", vec![1u8; 3000]);
//! fs.insert_file("b.bin", vec![2u8; 5000]);
//!
//! let mut store = VirtualFileStore::new(fs);
//! store.open(&["a.bin"], 3000)?;
//! store.open(&["b.bin"], 5000)?;
//! assert_eq!(store.total_length(), 8000);
//!
//! // A read across the boundary between the two files.
//! let mut buf = [0u8; 4];
//! store.read_at(2998, &mut buf)?;
//! assert_eq!(buf, [1, 1, 2, 2]);
//! # Ok(())
//! # }
//! ```
//!
//! # Integrity
//!
//! [`VirtualFileStore`] never modifies the files it exposes. Its write path
//! compares the supplied data against what is stored and fails on any
//! difference.

mod error;
mod file;
mod source;
mod store;

pub use error::StorageError;
pub use file::{file_spans, FileEntry, FileSpan};
pub use source::{PieceSink, PieceSource};
pub use store::{FileHandle, VirtualFileStore};
