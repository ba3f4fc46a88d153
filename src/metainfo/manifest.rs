use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

use super::pieces::{piece_count, verify_piece_hashes};
use crate::constants::DIGEST_LEN;
use crate::storage::{PieceSource, StorageError};

/// One file described by a manifest.
#[derive(Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: Vec<String>,
    name: String,
    length: u64,
    digest: [u8; DIGEST_LEN],
}

/// A piece-addressed description of a set of files.
///
/// The files are treated as one stream in the order listed, and the stream
/// is cut into pieces of `piece_length` bytes, each identified by its SHA-1.
/// A manifest is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaInfo {
    files: Vec<FileRecord>,
    length: u64,
    piece_length: u64,
    pieces: Vec<u8>,
}

impl FileRecord {
    pub(crate) fn new(
        path: Vec<String>,
        name: String,
        length: u64,
        digest: [u8; DIGEST_LEN],
    ) -> Self {
        Self {
            path,
            name,
            length,
            digest,
        }
    }

    /// Directory components leading to the file, outermost first.
    ///
    /// Taken from the lexically cleaned root path. Root, prefix and leading
    /// `..` components are dropped, so an absolute root yields a relative
    /// path. Non-UTF-8 components are converted lossily.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Base file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// SHA-1 of the file's entire contents.
    pub fn digest(&self) -> &[u8; DIGEST_LEN] {
        &self.digest
    }

    pub fn digest_hex(&self) -> String {
        hex_encode(&self.digest)
    }

    /// Directory components and name joined into one path.
    pub fn relative_path(&self) -> PathBuf {
        self.path.iter().chain(std::iter::once(&self.name)).collect()
    }
}

impl fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRecord")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("length", &self.length)
            .field("digest", &self.digest_hex())
            .finish()
    }
}

impl MetaInfo {
    pub(crate) fn new(
        files: Vec<FileRecord>,
        length: u64,
        piece_length: u64,
        pieces: Vec<u8>,
    ) -> Self {
        Self {
            files,
            length,
            piece_length,
            pieces,
        }
    }

    /// Files in stream order.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Total length of all files in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    /// Concatenated piece digests, [`DIGEST_LEN`] bytes each.
    pub fn pieces(&self) -> &[u8] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        piece_count(self.length, self.piece_length) as usize
    }

    /// Returns the digest of piece `index`.
    pub fn piece_hash(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(DIGEST_LEN)?;
        let end = start.checked_add(DIGEST_LEN)?;
        self.pieces.get(start..end)
    }

    pub fn piece_hashes(&self) -> impl Iterator<Item = &[u8]> {
        self.pieces.chunks_exact(DIGEST_LEN)
    }

    /// Returns the byte range piece `index` covers in the stream.
    pub fn piece_range(&self, index: usize) -> Option<Range<u64>> {
        if index >= self.piece_count() {
            return None;
        }
        let start = index as u64 * self.piece_length;
        let end = (start + self.piece_length).min(self.length);
        Some(start..end)
    }

    /// Re-hashes the content in `source` and reports, per piece, whether it
    /// still matches this manifest.
    pub fn verify_pieces<S: PieceSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Vec<bool>, StorageError> {
        verify_piece_hashes(source, &self.pieces, self.length, self.piece_length)
    }
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}
