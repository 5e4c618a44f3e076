//! Profile schema: named structures and how to locate them.

mod descriptor;
mod index;
pub mod literal;
mod profile;

pub use descriptor::{Placement, StructureDescriptor};
pub use index::SchemaIndex;
pub use profile::{
    load_profile, read_profile, save_profile, save_resolved_profile, write_profile,
    write_resolved_profile,
};
