//! Resolve command implementation.

use std::path::Path;

use anyhow::Result;
use sleuth::{Error, Session};

use crate::output;

/// Run the resolve command
pub fn run(session: &mut Session, output_path: &Path) -> Result<()> {
    let report = session.write_resolved(output_path)?;

    for (name, e) in report.failures() {
        output::warning(&failure_message(name, e));
    }
    output::success(&format!(
        "Wrote resolved profile with absolute offsets to '{}'.",
        output_path.display()
    ));
    Ok(())
}

/// Profile authoring errors need the CSV fixed; anything else is about the image.
fn failure_message(name: &str, error: &Error) -> String {
    if error.is_schema_error() {
        format!("Profile error for '{}' (fix the profile): {}", name, error)
    } else {
        format!("Could not resolve '{}': {}", name, error)
    }
}
