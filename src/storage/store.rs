use std::path::{Path, PathBuf};

use super::error::StorageError;
use super::file::{file_spans, FileEntry, FileSpan};
use super::source::{PieceSink, PieceSource};
use crate::fs::{read_exact_at, FileSystem, MetaFile};

/// Identifies one file opened in a [`VirtualFileStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(usize);

impl FileHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Presents a sequence of existing files as one logical address space.
///
/// Every file is declared with the length it is expected to have, and the
/// physical size is checked against it whenever the file is opened. Writes
/// only verify: data that matches what is already stored is accepted as a
/// no-op, anything else fails with [`StorageError::DataMismatch`] and the
/// file is left untouched.
///
/// Handles are held until [`close`](Self::close), [`close_all`](Self::close_all)
/// or drop. A closed file is reopened on its next access.
pub struct VirtualFileStore<S: FileSystem> {
    fs: S,
    files: Vec<FileEntry>,
    handles: Vec<Option<S::File>>,
    total_length: u64,
}

fn open_checked<S: FileSystem>(
    fs: &S,
    path: &Path,
    expected_length: u64,
) -> Result<S::File, StorageError> {
    let file = fs.open(path).map_err(|source| StorageError::FileIo {
        path: path.to_path_buf(),
        source,
    })?;
    let stat = file.stat().map_err(|source| StorageError::FileIo {
        path: path.to_path_buf(),
        source,
    })?;

    if stat.len != expected_length {
        return Err(StorageError::SizeMismatch {
            path: path.to_path_buf(),
            expected: expected_length,
            actual: stat.len,
        });
    }

    Ok(file)
}

impl<S: FileSystem> VirtualFileStore<S> {
    pub fn new(fs: S) -> Self {
        Self {
            fs,
            files: Vec::new(),
            handles: Vec::new(),
            total_length: 0,
        }
    }

    /// Opens the file named by `components` and appends it to the logical
    /// stream.
    ///
    /// Fails with [`StorageError::SizeMismatch`] if the file's size differs
    /// from `expected_length`.
    pub fn open<P: AsRef<Path>>(
        &mut self,
        components: &[P],
        expected_length: u64,
    ) -> Result<FileHandle, StorageError> {
        let path: PathBuf = components.iter().collect();
        let file = open_checked(&self.fs, &path, expected_length)?;

        let handle = FileHandle::from_index(self.files.len());
        self.files.push(FileEntry::new(path, expected_length, self.total_length));
        self.handles.push(Some(file));
        self.total_length += expected_length;
        Ok(handle)
    }

    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn file(&self, handle: FileHandle) -> Result<&FileEntry, StorageError> {
        self.files
            .get(handle.0)
            .ok_or(StorageError::InvalidHandle(handle.0))
    }

    /// Returns whether the file behind `handle` currently holds an open handle.
    pub fn is_open(&self, handle: FileHandle) -> bool {
        self.handles.get(handle.0).is_some_and(Option::is_some)
    }

    pub fn file_spans(&self, offset: u64, length: u64) -> Vec<FileSpan> {
        file_spans(&self.files, offset, length)
    }

    fn ensure_open(&mut self, index: usize) -> Result<&S::File, StorageError> {
        let entry = self
            .files
            .get(index)
            .ok_or(StorageError::InvalidHandle(index))?;

        let slot = &mut self.handles[index];
        if slot.is_none() {
            *slot = Some(open_checked(&self.fs, &entry.path, entry.length)?);
        }

        slot.as_ref().ok_or(StorageError::InvalidHandle(index))
    }

    fn check_range(&self, index: usize, offset: u64, length: usize) -> Result<(), StorageError> {
        let entry = self
            .files
            .get(index)
            .ok_or(StorageError::InvalidHandle(index))?;

        let in_range = offset
            .checked_add(length as u64)
            .is_some_and(|end| end <= entry.length);
        if !in_range {
            return Err(StorageError::OutOfRange {
                path: entry.path.clone(),
                offset,
                length: length as u64,
                file_length: entry.length,
            });
        }
        Ok(())
    }

    /// Reads `buf.len()` bytes at `offset` within one file.
    pub fn read_file_at(
        &mut self,
        handle: FileHandle,
        offset: u64,
        buf: &mut [u8],
    ) -> Result<(), StorageError> {
        self.check_range(handle.0, offset, buf.len())?;
        let result = {
            let file = self.ensure_open(handle.0)?;
            read_exact_at(file, buf, offset)
        };
        result.map_err(|source| StorageError::FileIo {
            path: self.files[handle.0].path.clone(),
            source,
        })
    }

    /// Verifies that `data` equals the bytes already stored at `offset`.
    ///
    /// Nothing is ever written. Matching data succeeds, differing data fails
    /// with [`StorageError::DataMismatch`].
    pub fn write_file_at(
        &mut self,
        handle: FileHandle,
        offset: u64,
        data: &[u8],
    ) -> Result<(), StorageError> {
        let mut existing = vec![0u8; data.len()];
        self.read_file_at(handle, offset, &mut existing)?;

        if existing != data {
            return Err(StorageError::DataMismatch {
                path: self.files[handle.0].path.clone(),
                offset,
            });
        }
        Ok(())
    }

    /// Releases the handle for one file. Closing twice is a no-op.
    pub fn close(&mut self, handle: FileHandle) -> Result<(), StorageError> {
        let slot = self
            .handles
            .get_mut(handle.0)
            .ok_or(StorageError::InvalidHandle(handle.0))?;
        slot.take();
        Ok(())
    }

    /// Releases every open handle. The logical layout is kept.
    pub fn close_all(&mut self) {
        for slot in &mut self.handles {
            slot.take();
        }
    }

    fn logical_spans(&self, offset: u64, length: usize) -> Result<Vec<FileSpan>, StorageError> {
        let in_bounds = offset
            .checked_add(length as u64)
            .is_some_and(|end| end <= self.total_length);
        if !in_bounds {
            return Err(StorageError::OutOfBounds {
                offset,
                length: length as u64,
                total_length: self.total_length,
            });
        }
        Ok(self.file_spans(offset, length as u64))
    }
}

impl<S: FileSystem> PieceSource for VirtualFileStore<S> {
    fn total_length(&self) -> u64 {
        self.total_length
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        let spans = self.logical_spans(offset, buf.len())?;
        let mut buf_offset = 0usize;

        for span in spans {
            let chunk = &mut buf[buf_offset..buf_offset + span.length as usize];
            let handle = FileHandle::from_index(span.file_index);
            self.read_file_at(handle, span.file_offset, chunk)?;
            buf_offset += span.length as usize;
        }

        Ok(())
    }
}

impl<S: FileSystem> PieceSink for VirtualFileStore<S> {
    /// Verifies every touched file before reporting success, so a mismatch in
    /// a later span still fails the whole write.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        let spans = self.logical_spans(offset, data.len())?;
        let mut data_offset = 0usize;

        for span in spans {
            let chunk = &data[data_offset..data_offset + span.length as usize];
            let handle = FileHandle::from_index(span.file_index);
            self.write_file_at(handle, span.file_offset, chunk)?;
            data_offset += span.length as usize;
        }

        Ok(())
    }
}

impl<S: FileSystem> std::fmt::Debug for VirtualFileStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let open = self.handles.iter().filter(|h| h.is_some()).count();
        f.debug_struct("VirtualFileStore")
            .field("files", &self.files)
            .field("open_handles", &open)
            .field("total_length", &self.total_length)
            .finish()
    }
}
