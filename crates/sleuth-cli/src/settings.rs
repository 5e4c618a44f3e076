//! User settings loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sleuth::SessionConfig;

/// Default hexdump width
pub const DEFAULT_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Suppress the banner
    pub quiet: bool,
    /// Bytes per hexdump line
    pub width: usize,
    /// Directory for extracted regions
    pub output_dir: PathBuf,
    /// Fixed path for corrected profiles
    pub updated_profile: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiet: false,
            width: DEFAULT_WIDTH,
            output_dir: PathBuf::from("."),
            updated_profile: None,
        }
    }
}

impl Settings {
    /// `<config_dir>/sleuth/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sleuth").join("config.toml"))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    pub fn session_config(&self) -> SessionConfig {
        let builder = SessionConfig::builder().output_dir(&self.output_dir);
        match &self.updated_profile {
            Some(path) => builder.updated_profile(path).build(),
            None => builder.build(),
        }
    }
}
