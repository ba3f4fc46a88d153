use super::error::StorageError;

/// Random-access reads over a logical byte stream.
///
/// This is the only view piece hashing needs: it never sees file boundaries.
pub trait PieceSource {
    fn total_length(&self) -> u64;

    /// Fills `buf` with the bytes at `offset..offset + buf.len()`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError>;
}

/// Random-access writes over a logical byte stream.
pub trait PieceSink: PieceSource {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError>;
}

impl<T: PieceSource + ?Sized> PieceSource for &mut T {
    fn total_length(&self) -> u64 {
        (**self).total_length()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        (**self).read_at(offset, buf)
    }
}

impl<T: PieceSink + ?Sized> PieceSink for &mut T {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        (**self).write_at(offset, data)
    }
}

fn check_bounds(offset: u64, length: usize, total_length: u64) -> Result<usize, StorageError> {
    let end = offset.checked_add(length as u64);
    match end {
        Some(end) if end <= total_length => Ok(offset as usize),
        _ => Err(StorageError::OutOfBounds {
            offset,
            length: length as u64,
            total_length,
        }),
    }
}

impl PieceSource for [u8] {
    fn total_length(&self) -> u64 {
        self.len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        let start = check_bounds(offset, buf.len(), self.len() as u64)?;
        buf.copy_from_slice(&self[start..start + buf.len()]);
        Ok(())
    }
}

impl PieceSource for Vec<u8> {
    fn total_length(&self) -> u64 {
        self.len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        self.as_mut_slice().read_at(offset, buf)
    }
}

impl PieceSink for Vec<u8> {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        let start = check_bounds(offset, data.len(), self.len() as u64)?;
        self[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}
