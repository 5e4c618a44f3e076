//! Metadata record layouts embedded in analysed images
//!
//! Both layouts are little-endian. Positions are relative to the metadata
//! pointer (`meta_ptr`), i.e. where the data pointer field starts.

/// 4-byte size immediately before a 4-byte data pointer
pub mod narrow {
    /// Size field starts this many bytes before `meta_ptr`
    pub const SIZE_BEFORE: u64 = 4;
    pub const POINTER_LEN: u64 = 4;
}

/// 8-byte data pointer followed by a 4-byte size
pub mod wide {
    pub const POINTER_LEN: u64 = 8;
    /// Size field offset from `meta_ptr`
    pub const SIZE_AT: u64 = POINTER_LEN;
    pub const SIZE_LEN: u64 = 4;
    /// Total record length
    pub const RECORD_LEN: u64 = POINTER_LEN + SIZE_LEN;
}

/// Size prefix read before a resolved offset when no size was discovered
pub const SIZE_PREFIX_LEN: u64 = 4;
