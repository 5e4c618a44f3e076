//! Metadata record detection
//!
//! A relative structure usually points at a small record embedded in the
//! image that holds the real data pointer and its size. Two layouts are known
//! (see [`crate::image::layout`]); neither carries a tag, so a record is
//! accepted purely because the pointer and `pointer + size` fall inside the
//! image. A hit is a candidate, not proof.

use serde::Serialize;
use strum::Display;
use tracing::debug;

use crate::error::{Error, Result};
use crate::image::ByteStore;
use crate::image::layout::{narrow, wide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum MetadataLayout {
    /// 4-byte size before a 4-byte pointer
    #[strum(serialize = "4+4")]
    Narrow,
    /// 8-byte pointer followed by a 4-byte size
    #[strum(serialize = "8+4")]
    Wide,
}

/// A decoded (pointer, size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataRecord {
    pub pointer: u64,
    pub size: u64,
    pub layout: MetadataLayout,
}

/// Strategy for decoding a metadata record at a position.
pub trait MetadataProbe {
    /// Decode the record whose pointer field starts at `meta_ptr`.
    ///
    /// Must not have side effects beyond its own bookkeeping.
    fn probe(&self, store: &ByteStore, meta_ptr: u64) -> Result<MetadataRecord>;
}

/// Tries the 4+4 layout, then the 8+4 layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutProbe;

impl MetadataProbe for LayoutProbe {
    fn probe(&self, store: &ByteStore, meta_ptr: u64) -> Result<MetadataRecord> {
        probe_metadata(store, meta_ptr)
    }
}

impl<P: MetadataProbe + ?Sized> MetadataProbe for &P {
    fn probe(&self, store: &ByteStore, meta_ptr: u64) -> Result<MetadataRecord> {
        (**self).probe(store, meta_ptr)
    }
}

/// Decode a metadata record at `meta_ptr`, narrow layout first.
pub fn probe_metadata(store: &ByteStore, meta_ptr: u64) -> Result<MetadataRecord> {
    if let Some(record) = read_narrow(store, meta_ptr) {
        debug!(
            "4+4 metadata at 0x{:X}: pointer=0x{:X} size=0x{:X}",
            meta_ptr, record.pointer, record.size
        );
        return Ok(record);
    }

    if let Some(record) = read_wide(store, meta_ptr) {
        debug!(
            "8+4 metadata at 0x{:X}: pointer=0x{:X} size=0x{:X}",
            meta_ptr, record.pointer, record.size
        );
        return Ok(record);
    }

    debug!("No valid metadata at 0x{:X}", meta_ptr);
    Err(Error::NoValidMetadata { meta_ptr })
}

fn read_narrow(store: &ByteStore, meta_ptr: u64) -> Option<MetadataRecord> {
    let size_pos = meta_ptr.checked_sub(narrow::SIZE_BEFORE)?;
    let size = store.read_u32_le(size_pos).ok()?;
    let pointer = store.read_u32_le(meta_ptr).ok()?;
    accept(store, pointer as u64, size as u64, MetadataLayout::Narrow)
}

fn read_wide(store: &ByteStore, meta_ptr: u64) -> Option<MetadataRecord> {
    store.check_span(meta_ptr, wide::RECORD_LEN).ok()?;
    let pointer = store.read_u64_le(meta_ptr).ok()?;
    let size = store.read_u32_le(meta_ptr + wide::SIZE_AT).ok()?;
    accept(store, pointer, size as u64, MetadataLayout::Wide)
}

/// Accept only pointers inside the image whose data also fits.
fn accept(
    store: &ByteStore,
    pointer: u64,
    size: u64,
    layout: MetadataLayout,
) -> Option<MetadataRecord> {
    (pointer < store.length() && store.contains_span(pointer, size)).then_some(MetadataRecord {
        pointer,
        size,
        layout,
    })
}
