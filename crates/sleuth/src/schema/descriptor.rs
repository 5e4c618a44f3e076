use serde::{Deserialize, Serialize};

use super::literal::{format_hex, parse_signed, parse_unsigned};
use crate::error::{Error, Result};

/// One profile row: a named region and how to locate it.
///
/// Fields keep the literal text from the profile so that unchanged rows are
/// written back exactly as they were read. Values are parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDescriptor {
    pub name: String,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(rename = "rOffset", default)]
    pub r_offset: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// How a descriptor locates its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    Explicit(u64),
    Relative { parent: &'a str, r_offset: i64 },
}

impl StructureDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>, r_offset: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self.r_offset = Some(r_offset.into());
        self
    }

    /// Declared absolute offset, if any.
    pub fn explicit_offset(&self) -> Result<Option<u64>> {
        self.parse_field("offset", self.offset.as_deref(), parse_unsigned)
    }

    /// Declared size, if any.
    pub fn declared_size(&self) -> Result<Option<u64>> {
        self.parse_field("size", self.size.as_deref(), parse_unsigned)
    }

    /// Declared displacement from the parent, if any.
    pub fn relative_offset(&self) -> Result<Option<i64>> {
        self.parse_field("rOffset", self.r_offset.as_deref(), parse_signed)
    }

    /// Classify the descriptor. An explicit offset wins over a parent link.
    pub fn placement(&self) -> Result<Placement<'_>> {
        if let Some(offset) = self.explicit_offset()? {
            return Ok(Placement::Explicit(offset));
        }
        match (self.parent.as_deref(), self.relative_offset()?) {
            (Some(parent), Some(r_offset)) if !parent.is_empty() => {
                Ok(Placement::Relative { parent, r_offset })
            }
            _ => Err(Error::MalformedDescriptor(self.name.clone())),
        }
    }

    /// Copy of this descriptor with offset and size pinned to discovered values.
    ///
    /// `rOffset` and `parent` are kept so the row still records where it came from.
    pub fn corrected(&self, offset: u64, size: u64) -> Self {
        Self {
            offset: Some(format_hex(offset)),
            size: Some(format_hex(size)),
            ..self.clone()
        }
    }

    /// Drop empty fields so they read as absent.
    pub(crate) fn normalized(mut self) -> Self {
        for field in [
            &mut self.offset,
            &mut self.size,
            &mut self.r_offset,
            &mut self.parent,
        ] {
            if let Some(value) = field.take() {
                let value = value.trim();
                if !value.is_empty() {
                    *field = Some(value.to_string());
                }
            }
        }
        self.name = self.name.trim().to_string();
        self
    }

    fn parse_field<T>(
        &self,
        field: &'static str,
        text: Option<&str>,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        match text {
            None => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| Error::InvalidOffsetLiteral {
                    name: self.name.clone(),
                    field,
                    value: value.to_string(),
                }),
        }
    }
}
