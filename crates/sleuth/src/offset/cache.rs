use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::MetadataLayout;

/// How an offset was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionSource {
    /// Literal `offset` from the profile
    Explicit,
    /// Data pointer read from an embedded metadata record
    Metadata(MetadataLayout),
    /// Parent offset plus `rOffset`, no usable metadata
    Relative,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => f.write_str("explicit"),
            Self::Metadata(layout) => write!(f, "metadata {}", layout),
            Self::Relative => f.write_str("relative"),
        }
    }
}

/// A resolved absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub offset: u64,
    /// Size read from the metadata record, if one was accepted
    pub size: Option<u64>,
    pub source: ResolutionSource,
}

/// Resolved offsets for the currently loaded image and profile.
///
/// Entries are written once and never removed individually; the whole cache
/// is cleared when either input is reloaded.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, Resolution>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Resolution> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Record a resolution. An existing entry is kept.
    pub fn insert(&mut self, name: &str, resolution: Resolution) -> Resolution {
        *self
            .entries
            .entry(name.to_string())
            .or_insert(resolution)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
