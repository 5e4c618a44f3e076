//! Prelude module for convenient imports
//!
//! ```ignore
//! use sleuth::prelude::*;
//! ```
//!
//! Brings the session facade, the resolution types and error handling into
//! scope.

// Session
pub use crate::config::SessionConfig;
pub use crate::session::{Analysis, Session};

// Error handling
pub use crate::error::{Error, Result};

// Resolution
pub use crate::offset::{OffsetResolver, Resolution, ResolutionReport, ResolutionSource};
pub use crate::reconcile::Reconciliation;
pub use crate::region::Region;

// Inputs
pub use crate::image::ByteStore;
pub use crate::schema::{SchemaIndex, StructureDescriptor};
