use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Structure named '{0}' not found in the profile")]
    NotFound(String),

    #[error(
        "Structure '{0}' must have either an 'offset' or both 'rOffset' and 'parent' defined"
    )]
    MalformedDescriptor(String),

    #[error("Structure '{name}' has no {field} in the profile")]
    MissingField { name: String, field: &'static str },

    #[error("Structure '{0}' already exists in the profile")]
    DuplicateName(String),

    #[error("Invalid {field} value for '{name}': {value}")]
    InvalidOffsetLiteral {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("Circular reference detected: {}", path.join(" -> "))]
    CircularReference { path: Vec<String> },

    #[error("Range 0x{start:X}..0x{end:X} is outside the image (0x{len:X} bytes)")]
    OutOfRange { start: u64, end: u64, len: u64 },

    #[error("Offset of '{name}' leaves the address space: 0x{base:X} {displacement:+}")]
    OffsetOverflow {
        name: String,
        base: u64,
        displacement: i64,
    },

    #[error("No valid metadata found at 0x{meta_ptr:X}")]
    NoValidMetadata { meta_ptr: u64 },

    #[error("No binary image loaded")]
    ImageNotLoaded,

    #[error("No profile loaded")]
    ProfileNotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors caused by the profile contents rather than the image.
    ///
    /// These are never retried: the profile has to be fixed.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::MalformedDescriptor(_)
                | Error::MissingField { .. }
                | Error::DuplicateName(_)
                | Error::InvalidOffsetLiteral { .. }
                | Error::CircularReference { .. }
                | Error::OffsetOverflow { .. }
        )
    }

    pub(crate) fn out_of_range(start: u64, end: u64, len: usize) -> Self {
        Error::OutOfRange {
            start,
            end,
            len: len as u64,
        }
    }
}
