//! Offset resolution
//!
//! A structure's absolute offset is either written in the profile or derived
//! from its parent:
//!
//! 1. resolve the parent (recursively)
//! 2. `meta_ptr = parent_offset + rOffset`
//! 3. if a metadata record decodes at `meta_ptr`, the structure lives at the
//!    record's data pointer and its size is the record's size
//! 4. otherwise the structure lives at `meta_ptr` itself
//!
//! Results are memoised in a [`ResolutionCache`] that the caller owns, and the
//! chain of names being resolved is threaded through the recursion so cycles
//! are reported instead of overflowing the stack.

use tracing::debug;

use super::{
    LayoutProbe, MetadataProbe, Resolution, ResolutionCache, ResolutionReport, ResolutionSource,
};
use crate::error::{Error, Result};
use crate::image::ByteStore;
use crate::schema::{Placement, SchemaIndex};

/// Resolves structure names against one image and profile.
pub struct OffsetResolver<'a, P = LayoutProbe> {
    store: &'a ByteStore,
    schema: &'a SchemaIndex,
    cache: &'a mut ResolutionCache,
    probe: P,
}

impl<'a> OffsetResolver<'a, LayoutProbe> {
    pub fn new(
        store: &'a ByteStore,
        schema: &'a SchemaIndex,
        cache: &'a mut ResolutionCache,
    ) -> Self {
        Self::with_probe(store, schema, cache, LayoutProbe)
    }
}

impl<'a, P: MetadataProbe> OffsetResolver<'a, P> {
    pub fn with_probe(
        store: &'a ByteStore,
        schema: &'a SchemaIndex,
        cache: &'a mut ResolutionCache,
        probe: P,
    ) -> Self {
        Self {
            store,
            schema,
            cache,
            probe,
        }
    }

    /// Resolve one structure to its absolute offset.
    pub fn resolve(&mut self, name: &str) -> Result<Resolution> {
        let mut path = Vec::new();
        self.resolve_in(name, &mut path)
    }

    /// Resolve every structure in profile order.
    ///
    /// A failure is recorded against its name and does not stop the batch.
    pub fn resolve_all(&mut self) -> ResolutionReport {
        let schema = self.schema;
        let mut report = ResolutionReport::default();
        for name in schema.all_names() {
            let outcome = match self.cache.get(name) {
                Some(cached) => Ok(*cached),
                None => self.resolve(name),
            };
            if let Err(e) = &outcome {
                debug!("Failed to resolve '{}': {}", name, e);
            }
            report.push(name, outcome);
        }
        report
    }

    fn resolve_in(&mut self, name: &str, path: &mut Vec<String>) -> Result<Resolution> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(*cached);
        }

        if path.iter().any(|n| n == name) {
            let mut cycle = path.clone();
            cycle.push(name.to_string());
            return Err(Error::CircularReference { path: cycle });
        }

        let schema = self.schema;
        let descriptor = schema.get(name)?;

        let resolution = match descriptor.placement()? {
            Placement::Explicit(offset) => Resolution {
                offset,
                size: None,
                source: ResolutionSource::Explicit,
            },
            Placement::Relative { parent, r_offset } => {
                path.push(name.to_string());
                let parent_offset = self.resolve_in(parent, path);
                path.pop();
                let parent_offset = parent_offset?.offset;

                let meta_ptr =
                    parent_offset
                        .checked_add_signed(r_offset)
                        .ok_or_else(|| Error::OffsetOverflow {
                            name: name.to_string(),
                            base: parent_offset,
                            displacement: r_offset,
                        })?;
                self.locate(name, meta_ptr)
            }
        };

        Ok(self.cache.insert(name, resolution))
    }

    /// Follow the metadata record at `meta_ptr`, or fall back to `meta_ptr`.
    fn locate(&self, name: &str, meta_ptr: u64) -> Resolution {
        match self.probe.probe(self.store, meta_ptr) {
            Ok(record) => Resolution {
                offset: record.pointer,
                size: Some(record.size),
                source: ResolutionSource::Metadata(record.layout),
            },
            Err(e) => {
                debug!(
                    "'{}': {}, using relative offset 0x{:X}",
                    name, e, meta_ptr
                );
                Resolution {
                    offset: meta_ptr,
                    size: None,
                    source: ResolutionSource::Relative,
                }
            }
        }
    }
}
