//! Hexdump rendering.
//!
//! Displays raw image bytes, one line per `width` bytes.
//!
//! # Output Format
//!
//! ```text
//! 0x00000020 | 48 65 6C 6C 6F 20 57 6F 72 6C 64 00 00 00 00 00 | Hello World.....
//! ```

/// Render `bytes` as hexdump lines, labelling each with its absolute offset.
pub fn format_lines(bytes: &[u8], start_offset: u64, width: usize) -> Vec<String> {
    let width = width.max(1);
    bytes
        .chunks(width)
        .enumerate()
        .map(|(i, chunk)| {
            let offset = start_offset + (i * width) as u64;
            let hex = chunk
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii: String = chunk
                .iter()
                .map(|&b| {
                    if (0x20..0x7F).contains(&b) {
                        b as char
                    } else {
                        '.'
                    }
                })
                .collect();
            format!(
                "0x{:08X} | {:<pad$} | {}",
                offset,
                hex,
                ascii,
                pad = width * 3
            )
        })
        .collect()
}

/// Print a hexdump to stdout
pub fn print(bytes: &[u8], start_offset: u64, width: usize) {
    for line in format_lines(bytes, start_offset, width) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let lines = format_lines(b"Hello", 0x20, 16);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("0x00000020 | 48 65 6C 6C 6F "));
        assert!(lines[0].ends_with(" | Hello"));
    }

    #[test]
    fn test_padding_keeps_ascii_column_aligned() {
        let lines = format_lines(&[0u8; 20], 0, 16);
        assert_eq!(lines.len(), 2);
        let column = |line: &str| line.rfind(" | ").unwrap();
        assert_eq!(column(&lines[0]), column(&lines[1]));
        assert!(lines[1].starts_with("0x00000010 | 00 00 00 00 "));
    }

    #[test]
    fn test_non_printable_as_dot() {
        let lines = format_lines(&[0x00, 0x41, 0x7F, 0xFF], 0, 4);
        assert!(lines[0].ends_with(" | .A.."));
    }

    #[test]
    fn test_custom_width() {
        let lines = format_lines(&[0xAB; 8], 0x100, 4);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("0x00000104 | AB AB AB AB"));
    }

    #[test]
    fn test_empty() {
        assert!(format_lines(&[], 0, 16).is_empty());
    }
}
