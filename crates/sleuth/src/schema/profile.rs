//! Profile (CSV) loading and writing
//!
//! A profile is a table with the columns `name, offset, size, rOffset, parent`.
//! Fields are trimmed on load; empty fields are treated as absent.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{info, warn};

use super::literal::format_hex;
use super::{SchemaIndex, StructureDescriptor};
use crate::error::Result;
use crate::offset::ResolutionReport;

/// Read a profile from any reader.
pub fn read_profile<R: Read>(reader: R) -> Result<SchemaIndex> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<StructureDescriptor>() {
        rows.push(row?.normalized());
    }
    Ok(SchemaIndex::from_descriptors(rows))
}

/// Load a profile from a file.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<SchemaIndex> {
    let path = path.as_ref();
    let schema = read_profile(File::open(path)?)?;
    info!(
        "Loaded profile: {} ({} entries)",
        path.display(),
        schema.len()
    );
    Ok(schema)
}

/// Write every entry as it currently stands.
pub fn write_profile<W: Write>(writer: W, schema: &SchemaIndex) -> Result<()> {
    write_rows(writer, schema.iter().cloned())
}

/// Save a profile to a file.
pub fn save_profile<P: AsRef<Path>>(path: P, schema: &SchemaIndex) -> Result<()> {
    write_profile(File::create(&path)?, schema)?;
    info!("Wrote profile to {}", path.as_ref().display());
    Ok(())
}

/// Write the profile with each `offset` replaced by its resolved value.
///
/// Other columns pass through. Entries that failed to resolve keep their
/// original `offset` text.
pub fn write_resolved_profile<W: Write>(
    writer: W,
    schema: &SchemaIndex,
    report: &ResolutionReport,
) -> Result<()> {
    let rows = schema.iter().map(|desc| match report.get(&desc.name) {
        Some(Ok(resolution)) => StructureDescriptor {
            offset: Some(format_hex(resolution.offset)),
            ..desc.clone()
        },
        Some(Err(e)) => {
            warn!("Keeping declared offset for '{}': {}", desc.name, e);
            desc.clone()
        }
        None => desc.clone(),
    });
    write_rows(writer, rows)
}

/// Save the resolved profile to a file.
pub fn save_resolved_profile<P: AsRef<Path>>(
    path: P,
    schema: &SchemaIndex,
    report: &ResolutionReport,
) -> Result<()> {
    write_resolved_profile(File::create(&path)?, schema, report)?;
    info!(
        "Wrote resolved profile with absolute offsets to {}",
        path.as_ref().display()
    );
    Ok(())
}

fn write_rows<W, I>(writer: W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = StructureDescriptor>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut wrote_any = false;
    for row in rows {
        csv_writer.serialize(&row)?;
        wrote_any = true;
    }
    if !wrote_any {
        csv_writer.write_record(["name", "offset", "size", "rOffset", "parent"])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = "\
name , offset , size , rOffset , parent
Root , 0x0 , 0x40 , ,
Child , , , 0x8 , Root
";

    #[test]
    fn test_read_trims_fields() {
        let schema = read_profile(PROFILE.as_bytes()).unwrap();
        assert_eq!(schema.len(), 2);

        let root = schema.get("Root").unwrap();
        assert_eq!(root.offset.as_deref(), Some("0x0"));
        assert_eq!(root.size.as_deref(), Some("0x40"));
        assert_eq!(root.parent, None);

        let child = schema.get("Child").unwrap();
        assert_eq!(child.offset, None);
        assert_eq!(child.r_offset.as_deref(), Some("0x8"));
        assert_eq!(child.parent.as_deref(), Some("Root"));
    }

    #[test]
    fn test_read_missing_columns() {
        let schema = read_profile("name,offset\nA,16\n".as_bytes()).unwrap();
        let a = schema.get("A").unwrap();
        assert_eq!(a.explicit_offset().unwrap(), Some(16));
        assert_eq!(a.size, None);
    }

    #[test]
    fn test_write_then_read() {
        let schema = read_profile(PROFILE.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_profile(&mut out, &schema).unwrap();

        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.starts_with("name,offset,size,rOffset,parent\n"));
        assert!(text.contains("Child,,,0x8,Root\n"));

        let reloaded = read_profile(out.as_slice()).unwrap();
        assert_eq!(
            reloaded.iter().collect::<Vec<_>>(),
            schema.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_write_empty_profile_has_header() {
        let mut out = Vec::new();
        write_profile(&mut out, &SchemaIndex::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,offset,size,rOffset,parent\n"
        );
    }

    #[test]
    fn test_load_and_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.csv");
        std::fs::write(&path, PROFILE).unwrap();

        let schema = load_profile(&path).unwrap();
        let copy = dir.path().join("copy.csv");
        save_profile(&copy, &schema).unwrap();

        let again = load_profile(&copy).unwrap();
        assert_eq!(again.all_names().collect::<Vec<_>>(), ["Root", "Child"]);
    }
}
