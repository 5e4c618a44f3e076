use std::path::{Path, PathBuf};

/// Default file name for persisted corrections when no profile path is known
pub const DEFAULT_UPDATED_PROFILE: &str = "profile_updated.csv";

/// Suffix appended to the profile stem for persisted corrections
pub const UPDATED_SUFFIX: &str = "_updated";

/// Configuration for a [`Session`](crate::Session)
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory for extracted regions
    pub output_dir: PathBuf,
    /// Where corrected profiles are written; derived from the profile path when unset
    pub updated_profile: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            updated_profile: None,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Path for a corrected copy of `profile`.
    ///
    /// `dir/name.csv` becomes `dir/name_updated.csv`; a profile that is
    /// already an updated copy is overwritten in place.
    pub fn updated_profile_for(&self, profile: Option<&Path>) -> PathBuf {
        if let Some(path) = &self.updated_profile {
            return path.clone();
        }
        let Some(profile) = profile else {
            return self.output_dir.join(DEFAULT_UPDATED_PROFILE);
        };
        let stem = profile
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile".to_string());
        if stem.ends_with(UPDATED_SUFFIX) {
            return profile.to_path_buf();
        }
        let extension = profile
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        profile.with_file_name(format!("{}{}.{}", stem, UPDATED_SUFFIX, extension))
    }
}

/// Builder for SessionConfig
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    output_dir: Option<PathBuf>,
    updated_profile: Option<PathBuf>,
}

impl SessionConfigBuilder {
    /// Set the directory for extracted regions
    pub fn output_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Write corrected profiles to a fixed path
    pub fn updated_profile<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.updated_profile = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            updated_profile: self.updated_profile.or(default.updated_profile),
        }
    }
}
