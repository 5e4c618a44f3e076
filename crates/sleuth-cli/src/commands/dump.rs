//! Dump command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sleuth::Session;

use crate::output;

/// Run the dump command
pub fn run(session: &mut Session, name: &str, output_path: Option<&Path>) -> Result<()> {
    let region = session.resolved_region(name)?;
    let path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{}.bin", name)));

    let written = session.dump(&region, &path)?;
    if region.out_of_range {
        output::warning(&format!(
            "'{}' extends past the image: wrote {} of {} bytes",
            name, written, region.size
        ));
    }
    output::success(&format!(
        "Dumped {} bytes from '{}' to '{}'.",
        written,
        name,
        path.display()
    ));
    Ok(())
}
