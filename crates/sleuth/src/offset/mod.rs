mod cache;
mod probe;
mod report;
mod resolver;

pub use cache::{Resolution, ResolutionCache, ResolutionSource};
pub use probe::{LayoutProbe, MetadataLayout, MetadataProbe, MetadataRecord, probe_metadata};
pub use report::{ReportRow, ResolutionReport};
pub use resolver::OffsetResolver;
