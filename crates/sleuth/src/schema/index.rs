use std::collections::HashMap;

use tracing::warn;

use super::StructureDescriptor;
use crate::error::{Error, Result};

/// Profile entries keyed by name, iterated in load order.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    entries: Vec<StructureDescriptor>,
    by_name: HashMap<String, usize>,
}

impl SchemaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from rows in order.
    ///
    /// Rows without a name are skipped. A repeated name takes the later row's
    /// attributes but keeps the first row's position.
    pub fn from_descriptors<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = StructureDescriptor>,
    {
        let mut index = Self::new();
        for row in rows {
            if row.name.is_empty() {
                continue;
            }
            if index.contains(&row.name) {
                warn!("Duplicate structure '{}' in profile, later row wins", row.name);
            }
            index.insert(row);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&StructureDescriptor> {
        self.by_name
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Names in load order.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureDescriptor> {
        self.entries.iter()
    }

    /// Overwrite one entry in place, keeping its position.
    ///
    /// Renaming onto another entry's name is rejected.
    pub fn replace(&mut self, name: &str, descriptor: StructureDescriptor) -> Result<()> {
        let &i = self
            .by_name
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        if descriptor.name != name {
            if self.contains(&descriptor.name) {
                return Err(Error::DuplicateName(descriptor.name));
            }
            self.by_name.remove(name);
            self.by_name.insert(descriptor.name.clone(), i);
        }
        self.entries[i] = descriptor;
        Ok(())
    }

    fn insert(&mut self, descriptor: StructureDescriptor) {
        match self.by_name.get(&descriptor.name) {
            Some(&i) => self.entries[i] = descriptor,
            None => {
                self.by_name
                    .insert(descriptor.name.clone(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }
}
