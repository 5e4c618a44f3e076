use serde::Serialize;

use crate::image::ByteStore;

/// A byte range of interest in the image.
///
/// A region may extend past the end of the image; it is then flagged rather
/// than clamped so the caller can warn and still show what exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: Option<String>,
    pub offset: u64,
    pub size: u64,
    pub out_of_range: bool,
}

impl Region {
    pub fn new(store: &ByteStore, name: Option<&str>, offset: u64, size: u64) -> Self {
        Self {
            name: name.map(str::to_string),
            offset,
            size,
            out_of_range: !store.contains_span(offset, size),
        }
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }

    /// The part of the region that exists in the image.
    pub fn bytes<'s>(&self, store: &'s ByteStore) -> &'s [u8] {
        store.clamped(self.offset, self.size)
    }

    /// File name used when extracting this region.
    ///
    /// Path separators in the name are replaced so the file always lands
    /// directly in the output directory.
    pub fn file_name(&self) -> String {
        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.replace(['/', '\\', ':'], "_"),
            _ => "unknown".to_string(),
        };
        format!("{}_{}_{}.img", name, self.offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageBuilder;

    #[test]
    fn test_in_range_region() {
        let store = ImageBuilder::new(16).bytes_at(4, b"ABCD").build();
        let region = Region::new(&store, Some("tag"), 4, 4);
        assert!(!region.out_of_range);
        assert_eq!(region.bytes(&store), b"ABCD");
        assert_eq!(region.file_name(), "tag_4_4.img");
    }

    #[test]
    fn test_out_of_range_region_keeps_partial_bytes() {
        let store = ImageBuilder::new(16).bytes_at(12, b"TAIL").build();
        let region = Region::new(&store, None, 12, 8);
        assert!(region.out_of_range);
        assert_eq!(region.end(), 20);
        assert_eq!(region.bytes(&store), b"TAIL");
        assert_eq!(region.file_name(), "unknown_12_8.img");
    }

    #[test]
    fn test_file_name_stays_in_output_dir() {
        let store = ImageBuilder::new(16).build();
        let region = Region::new(&store, Some("../../etc/passwd"), 0, 4);
        let name = region.file_name();
        assert_eq!(name, ".._.._etc_passwd_0_4.img");
        assert_eq!(std::path::Path::new(&name).components().count(), 1);

        let windows = Region::new(&store, Some(r"C:\tmp\x"), 0, 4);
        assert_eq!(windows.file_name(), "C__tmp_x_0_4.img");
    }
}
