use std::io;
use std::path::Path;

use super::manifest::{hex_encode, FileRecord, MetaInfo};

/// Receives diagnostic events from a manifest build.
///
/// Observers only watch: nothing they do changes the build's outcome.
/// Every method defaults to doing nothing.
pub trait BuildObserver {
    /// A root path does not exist.
    fn file_not_found(&self, _path: &Path, _error: &io::Error) {}

    /// A length disagreed with an earlier observation. `path` is `None` when
    /// the mismatch is between the store's total and the records' total.
    fn size_mismatch(&self, _path: Option<&Path>, _expected: u64, _actual: u64) {}

    /// A file record was created.
    fn file_digested(&self, _record: &FileRecord) {}

    /// The manifest was built successfully.
    fn manifest_built(&self, _manifest: &MetaInfo) {}
}

/// Forwards build events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn file_not_found(&self, path: &Path, error: &io::Error) {
        tracing::error!(file = %path.display(), error = %error, "file does not exist");
    }

    fn size_mismatch(&self, path: Option<&Path>, expected: u64, actual: u64) {
        match path {
            Some(path) => tracing::error!(
                file = %path.display(),
                expected,
                actual,
                "unexpected file size"
            ),
            None => tracing::error!(expected, actual, "store total length mismatch"),
        }
    }

    fn file_digested(&self, record: &FileRecord) {
        tracing::trace!(
            file = %record.relative_path().display(),
            length = record.length(),
            sha1 = %record.digest_hex(),
            "file digested"
        );
    }

    fn manifest_built(&self, manifest: &MetaInfo) {
        tracing::debug!(
            total_length = manifest.length(),
            piece_length = manifest.piece_length(),
            pieces = manifest.piece_count(),
            "manifest built"
        );
        tracing::trace!(pieces = %hex_encode(manifest.pieces()), "piece digests");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}
