//! Manifest construction for local files.
//!
//! A manifest ([`MetaInfo`]) describes an ordered set of files as one
//! concatenated byte stream cut into fixed-size pieces:
//! - Each file's path, name, size and whole-file SHA-1
//! - The total length and the piece length
//! - The SHA-1 of every piece, concatenated in piece order
//!
//! The [`MetaInfoBuilder`] produces manifests from files reached through a
//! [`FileSystem`](crate::fs::FileSystem). Serializing a manifest is left to
//! the caller.
//!
//! # Examples
//!
//! ```
//! use piecemeal::fs::MemoryFileSystem;
//! use piecemeal::metainfo::build_manifest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFileSystem::new();
//! fs.insert_file("media/clip.bin", vec![7u8; 40_000]);
//!
//! // A piece length of 0 picks one from the total size.
//! let manifest = build_manifest(fs, &["media/clip.bin"], 0)?;
//!
//! assert_eq!(manifest.piece_length(), 16384);
//! assert_eq!(manifest.piece_count(), 3);
//! assert_eq!(manifest.pieces().len(), 3 * 20);
//!
//! let file = &manifest.files()[0];
//! assert_eq!(file.path(), ["media"]);
//! assert_eq!(file.name(), "clip.bin");
//! println!("sha1 {}", file.digest_hex());
//! # Ok(())
//! # }
//! ```
//!
//! # Piece length
//!
//! When no piece length is forced, [`select_piece_length`] starts at 16 KiB
//! and doubles until the content splits into fewer than 2048 pieces.
//!
//! # Diagnostics
//!
//! Builds report missing files, size mismatches and a final summary to a
//! [`BuildObserver`]. The default [`TracingObserver`] emits `tracing` events;
//! [`NoopObserver`] stays silent.

mod builder;
mod digest;
mod error;
mod manifest;
mod observer;
mod piece_length;
mod pieces;

pub use builder::{build_manifest, MetaInfoBuilder};
pub use digest::digest_file;
pub use error::MetainfoError;
pub use manifest::{FileRecord, MetaInfo};
pub use observer::{BuildObserver, NoopObserver, TracingObserver};
pub use piece_length::select_piece_length;
pub use pieces::{compute_piece_hashes, piece_count, verify_piece_hashes};
