use std::collections::{BTreeSet, HashMap};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;

use super::{FileStat, FileSystem, MetaFile};

#[derive(Debug, Default)]
struct Entries {
    files: HashMap<PathBuf, Bytes>,
    dirs: BTreeSet<PathBuf>,
}

/// [`FileSystem`] backed by in-memory buffers.
///
/// Clones share the same entries, so a fixture can be changed after it has
/// been handed to a builder. Opened files see a snapshot of the contents at
/// open time.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: Arc<RwLock<Entries>>,
}

/// Lexically normalizes a path so `./a//b` and `a/b` name the same entry.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a file, registering its parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, data: impl Into<Bytes>) {
        let path = normalize(path.as_ref());
        let mut entries = self.entries.write();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            entries.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        entries.files.insert(path, data.into());
    }

    /// Appends bytes to an existing file, creating it if absent.
    pub fn append(&self, path: impl AsRef<Path>, data: &[u8]) {
        let path = normalize(path.as_ref());
        let current = self.contents(&path).unwrap_or_default();
        let mut grown = Vec::with_capacity(current.len() + data.len());
        grown.extend_from_slice(&current);
        grown.extend_from_slice(data);
        self.insert_file(path, grown);
    }

    pub fn create_dir(&self, path: impl AsRef<Path>) {
        self.entries.write().dirs.insert(normalize(path.as_ref()));
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        let path = normalize(path.as_ref());
        let mut entries = self.entries.write();
        entries.files.remove(&path).is_some() || entries.dirs.remove(&path)
    }

    /// Returns the current contents of a file.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Bytes> {
        self.entries
            .read()
            .files
            .get(&normalize(path.as_ref()))
            .cloned()
    }

    fn child_names(entries: &Entries, dir: &Path) -> Vec<String> {
        let mut names: BTreeSet<String> = BTreeSet::new();
        let children = entries
            .files
            .keys()
            .chain(entries.dirs.iter())
            .filter(|p| p.parent() == Some(dir));
        for child in children {
            if let Some(name) = child.file_name() {
                names.insert(name.to_string_lossy().into_owned());
            }
        }
        names.into_iter().collect()
    }
}

impl FileSystem for MemoryFileSystem {
    type File = MemoryFile;

    fn open(&self, path: &Path) -> io::Result<MemoryFile> {
        let path = normalize(path);
        let entries = self.entries.read();

        if let Some(data) = entries.files.get(&path) {
            return Ok(MemoryFile {
                data: data.clone(),
                position: 0,
                dir_names: None,
            });
        }

        if entries.dirs.contains(&path) {
            return Ok(MemoryFile {
                data: Bytes::new(),
                position: 0,
                dir_names: Some(Self::child_names(&entries, &path)),
            });
        }

        Err(not_found(&path))
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let path = normalize(path);
        let entries = self.entries.read();

        if let Some(data) = entries.files.get(&path) {
            return Ok(FileStat {
                len: data.len() as u64,
                is_dir: false,
            });
        }

        if entries.dirs.contains(&path) {
            return Ok(FileStat {
                len: 0,
                is_dir: true,
            });
        }

        Err(not_found(&path))
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

/// A file opened by [`MemoryFileSystem`].
#[derive(Debug)]
pub struct MemoryFile {
    data: Bytes,
    position: usize,
    /// Remaining entry names when this handle refers to a directory.
    dir_names: Option<Vec<String>>,
}

impl MemoryFile {
    fn is_dir(&self) -> bool {
        self.dir_names.is_some()
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.is_dir() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "is a directory"));
        }
        let n = self.read_at(buf, self.position as u64)?;
        self.position += n;
        Ok(n)
    }
}

impl MetaFile for MemoryFile {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        if self.is_dir() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "is a directory"));
        }
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= self.data.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn read_dir_names(&mut self, limit: Option<usize>) -> io::Result<Vec<String>> {
        let Some(names) = self.dir_names.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a directory"));
        };
        let take = limit.map_or(names.len(), |n| n.min(names.len()));
        Ok(names.drain(..take).collect())
    }

    fn stat(&self) -> io::Result<FileStat> {
        Ok(FileStat {
            len: self.data.len() as u64,
            is_dir: self.is_dir(),
        })
    }
}
