//! List command implementation.

use anyhow::Result;
use sleuth::{ResolutionReport, SchemaIndex, Session};

use super::hex_utils::format_hex_address;

/// Run the list command
pub fn run(session: &mut Session, json: bool) -> Result<()> {
    let report = session.resolve_all()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report.rows())?);
    } else {
        print_table(session.schema()?, &report);
    }
    Ok(())
}

/// Print one line per structure: name, resolved offset, size, how it was found.
pub fn print_table(schema: &SchemaIndex, report: &ResolutionReport) {
    println!(
        "{:<30} {:<20} {:<12} {}",
        "Structure Name", "Absolute Offset", "Size", "Source"
    );
    println!("{}", "-".repeat(76));
    for (name, outcome) in report.iter() {
        let declared = schema
            .get(name)
            .ok()
            .and_then(|d| d.size.clone());
        match outcome {
            Ok(resolution) => {
                let size = declared
                    .or_else(|| resolution.size.map(format_hex_address))
                    .unwrap_or_else(|| "N/A".to_string());
                println!(
                    "{:<30} {:<20} {:<12} {}",
                    name,
                    format_hex_address(resolution.offset),
                    size,
                    resolution.source
                );
            }
            Err(e) => {
                println!(
                    "{:<30} {:<20} {:<12} {}",
                    name,
                    "N/A",
                    declared.unwrap_or_else(|| "N/A".to_string()),
                    e
                );
            }
        }
    }
}
