//! Sizing constants and tuning parameters.
//!
//! Piece sizing follows the usual BitTorrent convention: power-of-two pieces
//! no smaller than a 16 KiB block, aiming for roughly 1024..2048 pieces.

// ============================================================================
// Piece sizing
// ============================================================================

/// Smallest automatically selected piece length (16 KiB, one request block).
pub const MIN_PIECE_LENGTH: u64 = 16 * 1024;

/// Largest automatically selected piece length (1 TiB).
///
/// Content larger than `MAX_PIECE_LENGTH * TARGET_PIECE_COUNT_MAX` keeps this
/// piece length and ends up with more than the target number of pieces.
pub const MAX_PIECE_LENGTH: u64 = 1 << 40;

/// log2 of the lower end of the preferred piece count range.
pub const TARGET_PIECE_COUNT_LOG2: u32 = 10;

/// Lower end of the preferred piece count range.
pub const TARGET_PIECE_COUNT_MIN: u64 = 1 << TARGET_PIECE_COUNT_LOG2;

/// The selected piece count stays below this value.
pub const TARGET_PIECE_COUNT_MAX: u64 = TARGET_PIECE_COUNT_MIN << 1;

// ============================================================================
// Digests
// ============================================================================

/// Width of one SHA-1 piece or file digest in bytes.
pub const DIGEST_LEN: usize = 20;

// ============================================================================
// I/O
// ============================================================================

/// Buffer size used when streaming a whole file through the digest.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;
