//! The currently loaded image and profile.
//!
//! `Session` owns the byte store, schema index and resolution cache as one
//! unit. Loading either input clears the cache, so offsets computed against
//! a previous image or profile are never mixed with new ones. Batch commands
//! and the interactive shell both go through this type.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::image::ByteStore;
use crate::offset::{OffsetResolver, Resolution, ResolutionCache, ResolutionReport};
use crate::reconcile::{Reconciler, Reconciliation};
use crate::region::Region;
use crate::schema::{self, SchemaIndex, StructureDescriptor};

/// A file written during the session.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedOutput {
    pub path: PathBuf,
    pub created_at: DateTime<Local>,
}

/// Outcome of analysing a structure against the image.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub region: Region,
    pub reconciliation: Reconciliation,
    /// Set when a corrected profile was written and made active
    pub updated_profile: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    store: Option<ByteStore>,
    image_path: Option<PathBuf>,
    schema: Option<SchemaIndex>,
    profile_path: Option<PathBuf>,
    cache: ResolutionCache,
    outputs: Vec<GeneratedOutput>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Load both inputs at once.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        image: P,
        profile: Q,
        config: SessionConfig,
    ) -> Result<Self> {
        let mut session = Self::new(config);
        session.load_image(image)?;
        session.load_profile(profile)?;
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the image. The cache is cleared only once the new image is in place.
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<&ByteStore> {
        let store = ByteStore::load(&path)?;
        self.cache.clear();
        self.image_path = Some(path.as_ref().to_path_buf());
        Ok(self.store.insert(store))
    }

    /// Use an in-memory image.
    pub fn set_image(&mut self, store: ByteStore) {
        self.cache.clear();
        self.image_path = None;
        self.store = Some(store);
    }

    /// Replace the profile. The cache is cleared only once the new profile is in place.
    pub fn load_profile<P: AsRef<Path>>(&mut self, path: P) -> Result<&SchemaIndex> {
        let schema = schema::load_profile(&path)?;
        self.cache.clear();
        self.profile_path = Some(path.as_ref().to_path_buf());
        Ok(self.schema.insert(schema))
    }

    /// Use an in-memory profile.
    pub fn set_schema(&mut self, schema: SchemaIndex) {
        self.cache.clear();
        self.profile_path = None;
        self.schema = Some(schema);
    }

    pub fn store(&self) -> Result<&ByteStore> {
        self.store.as_ref().ok_or(Error::ImageNotLoaded)
    }

    pub fn schema(&self) -> Result<&SchemaIndex> {
        self.schema.as_ref().ok_or(Error::ProfileNotLoaded)
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn profile_path(&self) -> Option<&Path> {
        self.profile_path.as_deref()
    }

    pub fn outputs(&self) -> &[GeneratedOutput] {
        &self.outputs
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn resolve(&mut self, name: &str) -> Result<Resolution> {
        let store = self.store.as_ref().ok_or(Error::ImageNotLoaded)?;
        let schema = self.schema.as_ref().ok_or(Error::ProfileNotLoaded)?;
        OffsetResolver::new(store, schema, &mut self.cache).resolve(name)
    }

    pub fn resolve_all(&mut self) -> Result<ResolutionReport> {
        let store = self.store.as_ref().ok_or(Error::ImageNotLoaded)?;
        let schema = self.schema.as_ref().ok_or(Error::ProfileNotLoaded)?;
        Ok(OffsetResolver::new(store, schema, &mut self.cache).resolve_all())
    }

    /// Resolve everything and write the profile with absolute offsets.
    pub fn write_resolved<P: AsRef<Path>>(&mut self, path: P) -> Result<ResolutionReport> {
        let report = self.resolve_all()?;
        schema::save_resolved_profile(&path, self.schema()?, &report)?;
        self.record_output(path.as_ref());
        Ok(report)
    }

    /// Region exactly as the profile declares it (`offset` and `size`).
    pub fn declared_region(&self, name: &str) -> Result<Region> {
        let descriptor = self.schema()?.get(name)?;
        let offset = descriptor
            .explicit_offset()?
            .ok_or_else(|| missing(name, "absolute offset"))?;
        let size = descriptor
            .declared_size()?
            .ok_or_else(|| missing(name, "size"))?;
        Ok(Region::new(self.store()?, Some(name), offset, size))
    }

    /// Resolved region, sized by the metadata record or else the declared size.
    pub fn resolved_region(&mut self, name: &str) -> Result<Region> {
        let resolution = self.resolve(name)?;
        let size = match resolution.size {
            Some(size) => size,
            None => self
                .schema()?
                .get(name)?
                .declared_size()?
                .ok_or_else(|| missing(name, "size"))?,
        };
        Ok(Region::new(self.store()?, Some(name), resolution.offset, size))
    }

    /// Arbitrary region by offset and size.
    pub fn raw_region(&self, offset: u64, size: u64) -> Result<Region> {
        Ok(Region::new(self.store()?, None, offset, size))
    }

    /// Resolve `name`, compare with the profile, and persist any correction.
    ///
    /// A correction is written to the updated-profile path, which then
    /// becomes the active profile.
    pub fn analyze(&mut self, name: &str) -> Result<Analysis> {
        let resolution = self.resolve(name)?;
        let reconciliation =
            Reconciler::new(self.store()?, self.schema()?).reconcile(name, &resolution)?;

        let updated_profile = match &reconciliation.correction {
            Some(correction) => Some(self.persist_correction(name, correction.clone())?),
            None => None,
        };

        let region = Region::new(
            self.store()?,
            Some(name),
            reconciliation.offset,
            reconciliation.size,
        );
        Ok(Analysis {
            region,
            reconciliation,
            updated_profile,
        })
    }

    /// Store a corrected descriptor and write the whole profile out.
    ///
    /// If the write fails the active profile is left untouched.
    pub fn persist_correction(
        &mut self,
        name: &str,
        correction: StructureDescriptor,
    ) -> Result<PathBuf> {
        let path = self.config.updated_profile_for(self.profile_path.as_deref());
        let mut index = self.schema()?.clone();
        index.replace(name, correction)?;
        // the live profile only changes once the file is written
        schema::save_profile(&path, &index)?;

        self.schema = Some(index);
        self.cache.clear();
        self.profile_path = Some(path.clone());
        self.record_output(&path);
        warn!(
            "Profile entry '{}' corrected, active profile is now {}",
            name,
            path.display()
        );
        Ok(path)
    }

    /// Write an in-range region to the output directory.
    pub fn extract(&mut self, region: &Region) -> Result<PathBuf> {
        let bytes = self.store()?.slice(region.offset, region.end())?;
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(region.file_name());
        fs::write(&path, bytes)?;
        info!("Wrote extract to: {}", path.display());
        self.record_output(&path);
        Ok(path)
    }

    /// Write whatever part of a region exists to `path`.
    ///
    /// Returns the number of bytes written.
    pub fn dump<P: AsRef<Path>>(&mut self, region: &Region, path: P) -> Result<usize> {
        let bytes = region.bytes(self.store()?);
        let written = bytes.len();
        fs::write(&path, bytes)?;
        if region.out_of_range {
            warn!(
                "Region 0x{:X}+0x{:X} is out of range, wrote {} bytes",
                region.offset, region.size, written
            );
        }
        self.record_output(path.as_ref());
        Ok(written)
    }

    fn record_output(&mut self, path: &Path) {
        let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.outputs.push(GeneratedOutput {
            path,
            created_at: Local::now(),
        });
    }
}

fn missing(name: &str, field: &'static str) -> Error {
    Error::MissingField {
        name: name.to_string(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageBuilder;

    const PROFILE: &str = "\
name,offset,size,rOffset,parent
Root,0x0,0x40,,
Child,,,0x8,Root
";

    fn example_image() -> Vec<u8> {
        ImageBuilder::new(64)
            .u32_at(4, 16)
            .u32_at(8, 32)
            .u32_at(28, 16)
            .bytes_at(32, b"0123456789ABCDEF")
            .into_vec()
    }

    fn session_in(dir: &Path) -> Session {
        let image = dir.join("image.bin");
        let profile = dir.join("profile.csv");
        fs::write(&image, example_image()).unwrap();
        fs::write(&profile, PROFILE).unwrap();
        let config = SessionConfig::builder().output_dir(dir.join("out")).build();
        Session::open(&image, &profile, config).unwrap()
    }

    #[test]
    fn test_requires_loaded_inputs() {
        let mut session = Session::default();
        assert!(matches!(session.resolve("Root"), Err(Error::ImageNotLoaded)));

        session.set_image(ByteStore::from(example_image()));
        assert!(matches!(
            session.resolve("Root"),
            Err(Error::ProfileNotLoaded)
        ));
    }

    #[test]
    fn test_reload_clears_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.resolve("Child").unwrap();
        assert_eq!(session.cached_count(), 2);

        session.load_image(dir.path().join("image.bin")).unwrap();
        assert_eq!(session.cached_count(), 0);

        session.resolve("Child").unwrap();
        session
            .load_profile(dir.path().join("profile.csv"))
            .unwrap();
        assert_eq!(session.cached_count(), 0);
    }

    #[test]
    fn test_failed_reload_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.resolve("Child").unwrap();

        assert!(session.load_image(dir.path().join("missing.bin")).is_err());
        assert_eq!(session.cached_count(), 2);
        assert!(session.image_path().unwrap().ends_with("image.bin"));
    }

    #[test]
    fn test_analyze_persists_correction() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        let analysis = session.analyze("Child").unwrap();
        assert_eq!(analysis.region.offset, 32);
        assert_eq!(analysis.region.size, 16);
        assert!(!analysis.region.out_of_range);

        let updated = analysis.updated_profile.unwrap();
        assert_eq!(updated, dir.path().join("profile_updated.csv"));
        assert_eq!(session.profile_path(), Some(updated.as_path()));

        let reloaded = schema::load_profile(&updated).unwrap();
        let child = reloaded.get("Child").unwrap();
        assert_eq!(child.offset.as_deref(), Some("0x20"));
        assert_eq!(child.size.as_deref(), Some("0x10"));
        assert_eq!(child.parent.as_deref(), Some("Root"));

        // now explicit; the size prefix at 0x1C agrees with the corrected size
        let again = session.analyze("Child").unwrap();
        assert!(again.updated_profile.is_none());
    }

    #[test]
    fn test_failed_save_keeps_profile_and_retries() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("image.bin");
        let profile = dir.path().join("profile.csv");
        fs::write(&image, example_image()).unwrap();
        fs::write(&profile, PROFILE).unwrap();

        let target = dir.path().join("no_such_dir").join("fixed.csv");
        let config = SessionConfig::builder().updated_profile(&target).build();
        let mut session = Session::open(&image, &profile, config).unwrap();

        assert!(matches!(session.analyze("Child"), Err(Error::Io(_))));
        assert_eq!(session.schema().unwrap().get("Child").unwrap().offset, None);
        assert_eq!(session.profile_path(), Some(profile.as_path()));
        assert!(session.outputs().is_empty());

        // once the directory exists the same drift is found and written
        fs::create_dir(dir.path().join("no_such_dir")).unwrap();
        let analysis = session.analyze("Child").unwrap();
        assert!(analysis.reconciliation.needs_update());
        assert_eq!(analysis.updated_profile.as_deref(), Some(target.as_path()));
        assert!(fs::read_to_string(&target).unwrap().contains("Child,0x20,0x10,0x8,Root\n"));
    }

    #[test]
    fn test_declared_region() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());

        let root = session.declared_region("Root").unwrap();
        assert_eq!((root.offset, root.size), (0, 0x40));
        assert!(matches!(
            session.declared_region("Child"),
            Err(Error::MissingField { field: "absolute offset", .. })
        ));
    }

    #[test]
    fn test_extract_and_dump() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        let region = session.resolved_region("Child").unwrap();
        let path = session.extract(&region).unwrap();
        assert_eq!(path, dir.path().join("out").join("Child_32_16.img"));
        assert_eq!(fs::read(&path).unwrap(), b"0123456789ABCDEF");

        let overflow = session.raw_region(56, 16).unwrap();
        assert!(session.extract(&overflow).is_err());

        let partial = dir.path().join("partial.bin");
        assert_eq!(session.dump(&overflow, &partial).unwrap(), 8);
        assert_eq!(session.outputs().len(), 2);
    }

    #[test]
    fn test_write_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        let out = dir.path().join("resolved.csv");
        let report = session.write_resolved(&out).unwrap();
        assert!(report.is_complete());

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("Root,0x0,0x40,,\n"));
        assert!(text.contains("Child,0x20,,0x8,Root\n"));
    }
}
