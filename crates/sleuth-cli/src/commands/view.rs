//! View command implementation.

use anyhow::Result;
use sleuth::{Region, Session};

use super::hexdump;
use crate::output;

/// Run the view command
pub fn run(session: &mut Session, name: &str, width: usize) -> Result<()> {
    let region = session.resolved_region(name)?;
    show_region(session, &region, width)
}

/// Print a region header, an out-of-range warning if needed, and the bytes that exist.
pub fn show_region(session: &Session, region: &Region, width: usize) -> Result<()> {
    if region.out_of_range {
        output::warning(&format!(
            "The address(offset) is out of range: 0x{:X} + 0x{:X} bytes (image is 0x{:X} bytes)",
            region.offset,
            region.size,
            session.store()?.len()
        ));
    }
    match &region.name {
        Some(name) => println!(
            "--- Contents of '{}' (Offset: 0x{:X}, Size: {} bytes) ---",
            name, region.offset, region.size
        ),
        None => println!(
            "--- Contents at 0x{:X} (Size: {} bytes) ---",
            region.offset, region.size
        ),
    }
    hexdump::print(region.bytes(session.store()?), region.offset, width);
    println!("--- End of data ---");
    Ok(())
}
