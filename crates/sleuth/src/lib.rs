//! # sleuth
//!
//! Resolve named structures in a binary image to absolute offsets.
//!
//! This crate provides:
//! - A bounds-checked view over a loaded image (`ByteStore`)
//! - Profile loading/writing (CSV rows of `name, offset, size, rOffset, parent`)
//! - Recursive, cycle-safe offset resolution with metadata pointer chasing
//! - Reconciliation of profile declarations against what the image contains
//! - A `Session` tying one image, one profile and the resolution cache together
//!
//! ## Example
//!
//! ```ignore
//! use sleuth::{Session, SessionConfig};
//!
//! let mut session = Session::open("firmware.bin", "profile.csv", SessionConfig::default())?;
//! let child = session.resolve("Child")?;
//! println!("Child at 0x{:X}", child.offset);
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod offset;
pub mod prelude;
pub mod reconcile;
pub mod region;
pub mod schema;
pub mod session;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use error::{Error, Result};
pub use image::ByteStore;
pub use offset::{
    LayoutProbe, MetadataLayout, MetadataProbe, MetadataRecord, OffsetResolver, ReportRow,
    Resolution, ResolutionCache, ResolutionReport, ResolutionSource, probe_metadata,
};
pub use reconcile::{Reconciler, Reconciliation};
pub use region::Region;
pub use schema::{
    Placement, SchemaIndex, StructureDescriptor, load_profile, read_profile, save_profile,
    save_resolved_profile, write_profile, write_resolved_profile,
};
pub use session::{Analysis, GeneratedOutput, Session};
