//! Piece hashing over a logical byte stream.
//!
//! Piece `i` covers `[i * piece_length, min((i + 1) * piece_length, total_length))`.
//! Only the final piece may be shorter than `piece_length`. Pieces are read
//! through [`PieceSource::read_at`] in bounded chunks, so a piece that spans
//! several files is hashed without the caller knowing where they meet.

use sha1::{Digest, Sha1};

use crate::constants::{DIGEST_LEN, READ_BUFFER_SIZE};
use crate::storage::{PieceSource, StorageError};

/// Number of pieces needed to cover `total_length` bytes.
pub fn piece_count(total_length: u64, piece_length: u64) -> u64 {
    if piece_length == 0 {
        return 0;
    }
    total_length.div_ceil(piece_length)
}

fn hash_range<S: PieceSource + ?Sized>(
    source: &mut S,
    offset: u64,
    length: u64,
    buffer: &mut [u8],
) -> Result<[u8; DIGEST_LEN], StorageError> {
    let mut hasher = Sha1::new();
    let mut done = 0u64;
    while done < length {
        let take = (length - done).min(buffer.len() as u64) as usize;
        source.read_at(offset + done, &mut buffer[..take])?;
        hasher.update(&buffer[..take]);
        done += take as u64;
    }
    Ok(hasher.finalize().into())
}

fn read_buffer(total_length: u64, piece_length: u64) -> Vec<u8> {
    let size = piece_length
        .min(total_length)
        .min(READ_BUFFER_SIZE as u64)
        .max(1);
    vec![0u8; size as usize]
}

/// Hashes every piece of the stream and returns the concatenated SHA-1
/// digests in piece order.
///
/// The first read failure aborts the whole computation.
pub fn compute_piece_hashes<S: PieceSource + ?Sized>(
    source: &mut S,
    total_length: u64,
    piece_length: u64,
) -> Result<Vec<u8>, StorageError> {
    if piece_length == 0 {
        return Err(StorageError::InvalidPieceLength);
    }

    let count = piece_count(total_length, piece_length);
    let mut pieces = Vec::with_capacity(count as usize * DIGEST_LEN);
    let mut buffer = read_buffer(total_length, piece_length);

    let mut offset = 0u64;
    while offset < total_length {
        let length = piece_length.min(total_length - offset);
        let hash = hash_range(source, offset, length, &mut buffer)?;
        pieces.extend_from_slice(&hash);
        offset += length;
    }

    Ok(pieces)
}

/// Re-hashes every piece and compares it against `expected`, the
/// concatenated digests produced by [`compute_piece_hashes`].
///
/// Returns one flag per piece. Pieces without an expected digest count as
/// invalid.
pub fn verify_piece_hashes<S: PieceSource + ?Sized>(
    source: &mut S,
    expected: &[u8],
    total_length: u64,
    piece_length: u64,
) -> Result<Vec<bool>, StorageError> {
    if piece_length == 0 {
        return Err(StorageError::InvalidPieceLength);
    }

    let count = piece_count(total_length, piece_length) as usize;
    let mut results = Vec::with_capacity(count);
    let mut buffer = read_buffer(total_length, piece_length);

    let mut offset = 0u64;
    while offset < total_length {
        let index = results.len();
        let length = piece_length.min(total_length - offset);
        let hash = hash_range(source, offset, length, &mut buffer)?;
        let wanted = expected.chunks_exact(DIGEST_LEN).nth(index);
        results.push(wanted == Some(&hash[..]));
        offset += length;
    }

    Ok(results)
}
