use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};

/// Immutable, bounds-checked view over a loaded binary image.
///
/// Every read into the image goes through this type; callers never index the
/// raw buffer with their own arithmetic.
#[derive(Debug, Clone, Default)]
pub struct ByteStore {
    data: Arc<[u8]>,
}

impl ByteStore {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    /// Load an arbitrary file as an opaque byte sequence.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        info!("Loaded binary: {} ({} bytes)", path.display(), data.len());
        Ok(Self::new(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Image length as an offset-typed value.
    pub fn length(&self) -> u64 {
        self.data.len() as u64
    }

    /// Validate `[start, end)` against the image.
    pub fn check_range(&self, start: u64, end: u64) -> Result<()> {
        if start > end || end > self.length() {
            return Err(Error::out_of_range(start, end, self.len()));
        }
        Ok(())
    }

    /// Validate `[start, start + len)` against the image, rejecting overflow.
    pub fn check_span(&self, start: u64, len: u64) -> Result<()> {
        let end = start
            .checked_add(len)
            .ok_or_else(|| Error::out_of_range(start, u64::MAX, self.len()))?;
        self.check_range(start, end)
    }

    /// Whether `[start, start + len)` lies entirely inside the image.
    pub fn contains_span(&self, start: u64, len: u64) -> bool {
        self.check_span(start, len).is_ok()
    }

    pub fn slice(&self, start: u64, end: u64) -> Result<&[u8]> {
        self.check_range(start, end)?;
        Ok(&self.data[start as usize..end as usize])
    }

    /// The part of `[start, start + len)` that lies inside the image.
    ///
    /// Empty when `start` is past the end.
    pub fn clamped(&self, start: u64, len: u64) -> &[u8] {
        let total = self.length();
        let start = start.min(total);
        let end = start.saturating_add(len).min(total);
        &self.data[start as usize..end as usize]
    }

    pub fn read_bytes(&self, pos: u64, len: usize) -> Result<&[u8]> {
        let end = pos
            .checked_add(len as u64)
            .ok_or_else(|| Error::out_of_range(pos, u64::MAX, self.len()))?;
        self.slice(pos, end)
    }

    pub fn read_u32_le(&self, pos: u64) -> Result<u32> {
        let bytes = self.read_bytes(pos, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64_le(&self, pos: u64) -> Result<u64> {
        let bytes = self.read_bytes(pos, 8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }
}

impl From<Vec<u8>> for ByteStore {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageBuilder;

    #[test]
    fn test_slice_bounds() {
        let store = ByteStore::from(vec![1, 2, 3, 4]);
        assert_eq!(store.slice(1, 3).unwrap(), &[2, 3]);
        assert_eq!(store.slice(4, 4).unwrap(), &[] as &[u8]);
        assert!(matches!(
            store.slice(2, 5),
            Err(Error::OutOfRange { start: 2, end: 5, len: 4 })
        ));
        assert!(store.slice(3, 2).is_err());
    }

    #[test]
    fn test_read_u32_le() {
        let store = ImageBuilder::new(16).u32_at(4, 0xDEADBEEF).build();
        assert_eq!(store.read_u32_le(4).unwrap(), 0xDEADBEEF);
        assert_eq!(store.read_u32_le(12).unwrap(), 0);
        assert!(store.read_u32_le(13).is_err());
        assert!(store.read_u32_le(u64::MAX - 1).is_err());
    }

    #[test]
    fn test_read_u64_le() {
        let store = ImageBuilder::new(16).u64_at(8, 0x1122_3344_5566_7788).build();
        assert_eq!(store.read_u64_le(8).unwrap(), 0x1122_3344_5566_7788);
        assert!(store.read_u64_le(9).is_err());
    }

    #[test]
    fn test_check_span_overflow() {
        let store = ByteStore::from(vec![0; 8]);
        assert!(store.contains_span(0, 8));
        assert!(!store.contains_span(1, 8));
        assert!(!store.contains_span(4, u64::MAX));
    }

    #[test]
    fn test_clamped() {
        let store = ByteStore::from(vec![1, 2, 3, 4]);
        assert_eq!(store.clamped(2, 10), &[3, 4]);
        assert!(store.clamped(9, 2).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [0xAA, 0xBB, 0xCC]).unwrap();

        let store = ByteStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.slice(0, 3).unwrap(), &[0xAA, 0xBB, 0xCC]);
    }
}
