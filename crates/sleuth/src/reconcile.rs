//! Drift detection between the profile and the image
//!
//! After a structure is resolved against the image, its discovered offset and
//! size are compared with what the profile declares. Any difference (or a
//! missing declaration) yields a corrected descriptor for the caller to store.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::image::ByteStore;
use crate::image::layout::SIZE_PREFIX_LEN;
use crate::offset::Resolution;
use crate::schema::{SchemaIndex, StructureDescriptor};

/// Result of comparing one structure with the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub name: String,
    /// Offset found in the image
    pub offset: u64,
    /// Size found in the image
    pub size: u64,
    pub declared_offset: Option<u64>,
    pub declared_size: Option<u64>,
    /// Replacement descriptor when the profile disagrees with the image
    pub correction: Option<StructureDescriptor>,
    /// `offset + size` runs past the end of the image
    pub out_of_range: bool,
}

impl Reconciliation {
    pub fn needs_update(&self) -> bool {
        self.correction.is_some()
    }
}

pub struct Reconciler<'a> {
    store: &'a ByteStore,
    schema: &'a SchemaIndex,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a ByteStore, schema: &'a SchemaIndex) -> Self {
        Self { store, schema }
    }

    /// Size of a resolved structure.
    ///
    /// The metadata size when one was found, otherwise the little-endian u32
    /// stored just before the offset.
    pub fn effective_size(&self, resolution: &Resolution) -> Result<u64> {
        if let Some(size) = resolution.size {
            return Ok(size);
        }
        let size_pos = resolution
            .offset
            .checked_sub(SIZE_PREFIX_LEN)
            .ok_or(Error::OutOfRange {
                start: 0,
                end: resolution.offset,
                len: self.store.length(),
            })?;
        Ok(self.store.read_u32_le(size_pos)? as u64)
    }

    /// Compare `name`'s resolution with its profile entry.
    pub fn reconcile(&self, name: &str, resolution: &Resolution) -> Result<Reconciliation> {
        let descriptor = self.schema.get(name)?;
        let size = self.effective_size(resolution)?;
        let offset = resolution.offset;

        // unparsable declarations count as missing
        let declared_offset = descriptor.explicit_offset().ok().flatten();
        let declared_size = descriptor.declared_size().ok().flatten();

        let correction = if declared_offset == Some(offset) && declared_size == Some(size) {
            None
        } else {
            debug!(
                "'{}' drifted: profile offset={:?} size={:?}, image offset=0x{:X} size=0x{:X}",
                name, declared_offset, declared_size, offset, size
            );
            Some(descriptor.corrected(offset, size))
        };

        let out_of_range = !self.store.contains_span(offset, size);
        if out_of_range {
            warn!(
                "'{}' is out of range: 0x{:X} + 0x{:X} bytes exceeds image (0x{:X} bytes)",
                name,
                offset,
                size,
                self.store.len()
            );
        }

        Ok(Reconciliation {
            name: name.to_string(),
            offset,
            size,
            declared_offset,
            declared_size,
            correction,
            out_of_range,
        })
    }
}
