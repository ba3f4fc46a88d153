use std::path::PathBuf;

/// A file's place in the logical stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub length: u64,
    /// Byte offset of the file's first byte within the logical stream.
    pub offset: u64,
}

/// The part of a logical range that falls inside one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSpan {
    pub file_index: usize,
    pub file_offset: u64,
    pub length: u64,
}

impl FileEntry {
    pub fn new(path: PathBuf, length: u64, offset: u64) -> Self {
        Self {
            path,
            length,
            offset,
        }
    }

    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    pub fn byte_range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    pub fn contains_offset(&self, offset: u64) -> bool {
        offset >= self.offset && offset < self.end()
    }
}

/// Splits `offset..offset + length` of the logical stream into per-file spans.
///
/// `files` must be ordered by offset and contiguous. Zero-length files never
/// produce a span. The result covers less than `length` bytes only when the
/// range runs past the last file.
pub fn file_spans(files: &[FileEntry], offset: u64, length: u64) -> Vec<FileSpan> {
    let mut spans = Vec::new();
    let mut remaining = length;
    let mut current_offset = offset;

    let first = files.partition_point(|f| f.end() <= offset);
    for (file_index, file) in files.iter().enumerate().skip(first) {
        if remaining == 0 {
            break;
        }

        if file.contains_offset(current_offset) {
            let take = remaining.min(file.end() - current_offset);

            spans.push(FileSpan {
                file_index,
                file_offset: current_offset - file.offset,
                length: take,
            });

            current_offset += take;
            remaining -= take;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(lengths: &[u64]) -> Vec<FileEntry> {
        let mut offset = 0;
        lengths
            .iter()
            .enumerate()
            .map(|(i, &length)| {
                let entry = FileEntry::new(PathBuf::from(format!("f{i}")), length, offset);
                offset += length;
                entry
            })
            .collect()
    }

    #[test]
    fn test_span_within_one_file() {
        let files = entries(&[3000, 5000]);
        let spans = file_spans(&files, 100, 200);
        assert_eq!(
            spans,
            vec![FileSpan {
                file_index: 0,
                file_offset: 100,
                length: 200
            }]
        );
    }

    #[test]
    fn test_span_crosses_file_boundary() {
        let files = entries(&[3000, 5000]);
        let spans = file_spans(&files, 0, 4096);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].length, 3000);
        assert_eq!(spans[1].file_index, 1);
        assert_eq!(spans[1].file_offset, 0);
        assert_eq!(spans[1].length, 1096);
    }

    #[test]
    fn test_span_skips_empty_files() {
        let files = entries(&[10, 0, 0, 10]);
        let spans = file_spans(&files, 5, 10);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].file_index, 0);
        assert_eq!(spans[1].file_index, 3);
        assert_eq!(spans[1].length, 5);
    }

    #[test]
    fn test_span_past_end_is_truncated() {
        let files = entries(&[10]);
        let spans = file_spans(&files, 8, 10);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].length, 2);
        assert!(file_spans(&files, 10, 1).is_empty());
    }
}
