//! Test helper for assembling byte images.

use super::ByteStore;

pub struct ImageBuilder {
    data: Vec<u8>,
}

impl ImageBuilder {
    /// Zero-filled image of `len` bytes
    pub fn new(len: usize) -> Self {
        Self { data: vec![0; len] }
    }

    pub fn u32_at(mut self, pos: usize, value: u32) -> Self {
        self.data[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u64_at(mut self, pos: usize, value: u64) -> Self {
        self.data[pos..pos + 8].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bytes_at(mut self, pos: usize, bytes: &[u8]) -> Self {
        self.data[pos..pos + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn build(self) -> ByteStore {
        ByteStore::from(self.data)
    }
}
