use crate::constants::{MAX_PIECE_LENGTH, MIN_PIECE_LENGTH, TARGET_PIECE_COUNT_MAX};

/// Chooses a piece length for `total_length` bytes of content.
///
/// The result is a power of two of at least [`MIN_PIECE_LENGTH`], doubled
/// until the piece count drops below [`TARGET_PIECE_COUNT_MAX`]. Doubling
/// stops at [`MAX_PIECE_LENGTH`].
pub fn select_piece_length(total_length: u64) -> u64 {
    let mut piece_length = MIN_PIECE_LENGTH;
    let mut pieces = total_length / piece_length;
    while pieces >= TARGET_PIECE_COUNT_MAX && piece_length < MAX_PIECE_LENGTH {
        piece_length <<= 1;
        pieces >>= 1;
    }
    piece_length
}
