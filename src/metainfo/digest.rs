use std::io::{self, BufReader};
use std::path::Path;

use sha1::{Digest, Sha1};

use super::error::MetainfoError;
use crate::constants::{DIGEST_LEN, READ_BUFFER_SIZE};
use crate::fs::FileSystem;

/// Computes the SHA-1 of a whole file, streaming it once.
///
/// The handle is dropped on every return path.
pub fn digest_file<S: FileSystem + ?Sized>(
    fs: &S,
    path: &Path,
) -> Result<[u8; DIGEST_LEN], MetainfoError> {
    let io_error = |source: io::Error| MetainfoError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = fs.open(path).map_err(io_error)?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    let mut hasher = Sha1::new();
    io::copy(&mut reader, &mut hasher).map_err(io_error)?;
    Ok(hasher.finalize().into())
}
