//! Filesystem capability consumed by the manifest builder and the store.
//!
//! Everything that touches file contents goes through the [`FileSystem`] and
//! [`MetaFile`] traits, so the same build runs against real files or against
//! in-memory fixtures.
//!
//! # Implementations
//!
//! - [`OsFileSystem`] - backed by `std::fs`
//! - [`MemoryFileSystem`] - backed by shared in-memory buffers
//!
//! # Examples
//!
//! ```
//! use piecemeal::fs::{FileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFileSystem::new();
//! fs.insert_file("data/a.bin", vec![1u8; 3000]);
//!
//! let stat = fs.stat(Path::new("data/a.bin"))?;
//! assert_eq!(stat.len, 3000);
//! assert!(fs.stat(Path::new("data"))?.is_dir);
//! # Ok(())
//! # }
//! ```

mod memory;
mod os;

use std::io::{self, Read};
use std::path::Path;

pub use memory::{MemoryFile, MemoryFileSystem};
pub use os::{OsFile, OsFileSystem};

/// Size and kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub len: u64,
    pub is_dir: bool,
}

/// An open file handle.
///
/// Dropping the handle closes it.
pub trait MetaFile: Read {
    /// Reads into `buf` starting at `offset` without moving the sequential
    /// read position. Returns the number of bytes read, 0 at end of file.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Lists up to `limit` entry names of an opened directory, or all of the
    /// remaining ones when `limit` is `None`. Successive calls continue where
    /// the previous one stopped.
    fn read_dir_names(&mut self, limit: Option<usize>) -> io::Result<Vec<String>>;

    fn stat(&self) -> io::Result<FileStat>;
}

/// Opens and inspects files by path.
pub trait FileSystem {
    type File: MetaFile;

    fn open(&self, path: &Path) -> io::Result<Self::File>;

    fn stat(&self, path: &Path) -> io::Result<FileStat>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    type File = T::File;

    fn open(&self, path: &Path) -> io::Result<Self::File> {
        (**self).open(path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        (**self).stat(path)
    }
}

/// Fills `buf` from `offset`, failing with `UnexpectedEof` on a short file.
pub fn read_exact_at<F: MetaFile + ?Sized>(
    file: &F,
    mut buf: &mut [u8],
    mut offset: u64,
) -> io::Result<()> {
    while !buf.is_empty() {
        match file.read_at(buf, offset) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "failed to fill whole buffer",
                ));
            }
            Ok(n) => {
                buf = &mut buf[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
