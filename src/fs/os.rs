use std::fs::{File, ReadDir};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{FileStat, FileSystem, MetaFile};

/// [`FileSystem`] over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    type File = OsFile;

    fn open(&self, path: &Path) -> io::Result<OsFile> {
        let file = File::open(path)?;
        Ok(OsFile {
            file,
            path: path.to_path_buf(),
            entries: None,
        })
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = std::fs::metadata(path)?;
        Ok(FileStat {
            len: metadata.len(),
            is_dir: metadata.is_dir(),
        })
    }
}

/// A file opened by [`OsFileSystem`].
#[derive(Debug)]
pub struct OsFile {
    file: File,
    path: PathBuf,
    entries: Option<ReadDir>,
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl MetaFile for OsFile {
    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(&self.file, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(&self.file, buf, offset)
    }

    fn read_dir_names(&mut self, limit: Option<usize>) -> io::Result<Vec<String>> {
        if self.entries.is_none() {
            if !self.file.metadata()?.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a directory: {}", self.path.display()),
                ));
            }
            self.entries = Some(std::fs::read_dir(&self.path)?);
        }

        let mut names = Vec::new();
        if let Some(entries) = self.entries.as_mut() {
            while limit.is_none_or(|n| names.len() < n) {
                let Some(entry) = entries.next() else {
                    break;
                };
                names.push(entry?.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn stat(&self) -> io::Result<FileStat> {
        let metadata = self.file.metadata()?;
        Ok(FileStat {
            len: metadata.len(),
            is_dir: metadata.is_dir(),
        })
    }
}
