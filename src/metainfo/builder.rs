//! Manifest builder for sets of local files.
//!
//! Each root is a single file. The files are concatenated in the order they
//! were added and hashed piece by piece, with pieces running across file
//! boundaries. Every file also gets a whole-file SHA-1.
//!
//! # Examples
//!
//! ## Building from files on disk
//!
//! ```no_run
//! use piecemeal::metainfo::MetaInfoBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = MetaInfoBuilder::new()
//!     .add_root("videos/part1.mkv")
//!     .add_root("videos/part2.mkv")
//!     .build()?;
//!
//! println!("{} bytes in {} pieces", manifest.length(), manifest.piece_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Building from in-memory fixtures
//!
//! ```
//! use piecemeal::fs::MemoryFileSystem;
//! use piecemeal::metainfo::{MetaInfoBuilder, NoopObserver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFileSystem::new();
//! fs.insert_file("a.bin", vec![1u8; 3000]);
//! fs.insert_file("b.bin", vec![2u8; 5000]);
//!
//! let manifest = MetaInfoBuilder::with_file_system(fs)
//!     .add_root("a.bin")
//!     .add_root("b.bin")
//!     .piece_length(4096)
//!     .observer(NoopObserver)
//!     .build()?;
//!
//! assert_eq!(manifest.length(), 8000);
//! assert_eq!(manifest.piece_count(), 2);
//! # Ok(())
//! # }
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use super::digest::digest_file;
use super::error::MetainfoError;
use super::manifest::{FileRecord, MetaInfo};
use super::observer::{BuildObserver, TracingObserver};
use super::piece_length::select_piece_length;
use super::pieces::compute_piece_hashes;
use crate::fs::{FileSystem, OsFileSystem};
use crate::storage::{StorageError, VirtualFileStore};

/// Builder for [`MetaInfo`].
pub struct MetaInfoBuilder<S = OsFileSystem> {
    fs: S,
    roots: Vec<PathBuf>,
    /// Piece length in bytes, 0 to choose one from the total length.
    piece_length: u64,
    observer: Box<dyn BuildObserver>,
}

impl MetaInfoBuilder<OsFileSystem> {
    /// Creates a builder that reads files from the local disk.
    pub fn new() -> Self {
        Self::with_file_system(OsFileSystem::new())
    }
}

impl Default for MetaInfoBuilder<OsFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FileSystem> MetaInfoBuilder<S> {
    pub fn with_file_system(fs: S) -> Self {
        Self {
            fs,
            roots: Vec::new(),
            piece_length: 0,
            observer: Box::new(TracingObserver),
        }
    }

    /// Appends a file to the manifest. Files keep the order they were added in.
    pub fn add_root(mut self, path: impl AsRef<Path>) -> Self {
        self.roots.push(path.as_ref().to_path_buf());
        self
    }

    pub fn add_roots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.roots
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Forces a piece length in bytes. 0 (the default) picks one with
    /// [`select_piece_length`].
    pub fn piece_length(mut self, length: u64) -> Self {
        self.piece_length = length;
        self
    }

    /// Replaces the default [`TracingObserver`].
    pub fn observer(mut self, observer: impl BuildObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Builds the manifest. The first failure aborts the build.
    pub fn build(self) -> Result<MetaInfo, MetainfoError> {
        if self.roots.is_empty() {
            return Err(MetainfoError::NoFiles);
        }

        let mut files = Vec::with_capacity(self.roots.len());
        let mut length = 0u64;

        for root in &self.roots {
            let stat = self.fs.stat(root).map_err(|e| self.stat_error(root, e))?;
            if stat.is_dir {
                return Err(MetainfoError::NotSupported { path: root.clone() });
            }

            let record = self.file_record(root, stat.len)?;
            self.observer.file_digested(&record);

            length += record.length();
            files.push(record);
        }

        let piece_length = if self.piece_length == 0 {
            select_piece_length(length)
        } else {
            self.piece_length
        };

        let mut store = VirtualFileStore::new(&self.fs);
        for (root, record) in self.roots.iter().zip(&files) {
            store
                .open(std::slice::from_ref(root), record.length())
                .map_err(|e| self.storage_error(e))?;
        }

        if store.total_length() != length {
            self.observer.size_mismatch(None, length, store.total_length());
            return Err(MetainfoError::SizeMismatch {
                expected: length,
                actual: store.total_length(),
            });
        }

        let pieces = compute_piece_hashes(&mut store, length, piece_length)
            .map_err(|e| self.storage_error(e))?;
        drop(store);

        let manifest = MetaInfo::new(files, length, piece_length, pieces);
        self.observer.manifest_built(&manifest);
        Ok(manifest)
    }

    /// Digests `root` as given. The lexically cleaned path only names the
    /// record.
    fn file_record(&self, root: &Path, length: u64) -> Result<FileRecord, MetainfoError> {
        let path = clean_path(root);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MetainfoError::NotSupported {
                path: root.to_path_buf(),
            })?;

        let components: Vec<String> = path
            .parent()
            .map(|dir| {
                dir.components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let digest = digest_file(&self.fs, root)?;
        Ok(FileRecord::new(components, name, length, digest))
    }

    fn stat_error(&self, path: &Path, error: io::Error) -> MetainfoError {
        if error.kind() == io::ErrorKind::NotFound {
            self.observer.file_not_found(path, &error);
            return MetainfoError::NotFound {
                path: path.to_path_buf(),
            };
        }
        MetainfoError::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }

    fn storage_error(&self, error: StorageError) -> MetainfoError {
        if let StorageError::SizeMismatch {
            path,
            expected,
            actual,
        } = &error
        {
            self.observer
                .size_mismatch(Some(path.as_path()), *expected, *actual);
        }
        MetainfoError::Storage(error)
    }
}

/// Builds a manifest for `roots` in order. A `piece_length` of 0 selects one
/// automatically.
pub fn build_manifest<S, P>(
    fs: S,
    roots: &[P],
    piece_length: u64,
) -> Result<MetaInfo, MetainfoError>
where
    S: FileSystem,
    P: AsRef<Path>,
{
    MetaInfoBuilder::with_file_system(fs)
        .add_roots(roots)
        .piece_length(piece_length)
        .build()
}

/// Lexically cleans a path: drops `.` components and resolves `..` against
/// preceding normal components.
fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(Path::new("a/./b//c.txt")), PathBuf::from("a/b/c.txt"));
        assert_eq!(clean_path(Path::new("a/x/../c.txt")), PathBuf::from("a/c.txt"));
        assert_eq!(clean_path(Path::new("../c.txt")), PathBuf::from("../c.txt"));
        assert_eq!(clean_path(Path::new("/../c.txt")), PathBuf::from("/c.txt"));
        assert_eq!(clean_path(Path::new("./")), PathBuf::from("."));
    }
}
