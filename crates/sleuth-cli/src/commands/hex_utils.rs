//! Number parsing and formatting for command arguments.

use anyhow::{Result, anyhow};
use sleuth::schema::literal::parse_unsigned;

/// Parse an offset or size (`0x..`, `0o..`, `0b..` or decimal).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_number("0x1000").unwrap(), 0x1000);
/// assert_eq!(parse_number("4096").unwrap(), 4096);
/// ```
pub fn parse_number(s: &str) -> Result<u64> {
    parse_unsigned(s).ok_or_else(|| anyhow!("Invalid number: {}", s.trim()))
}

/// Format an address as a hex string with 0x prefix.
pub fn format_hex_address(addr: u64) -> String {
    format!("0x{:X}", addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_bases() {
        assert_eq!(parse_number("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_number("0X1000").unwrap(), 0x1000);
        assert_eq!(parse_number("4096").unwrap(), 4096);
        assert_eq!(parse_number("0b1000").unwrap(), 8);
    }

    #[test]
    fn test_parse_number_large() {
        assert_eq!(parse_number("0x1431B08A0").unwrap(), 0x1431B08A0);
    }

    #[test]
    fn test_parse_number_invalid() {
        assert!(parse_number("GHIJK").is_err());
        assert!(parse_number("0xZZZ").is_err());
        assert!(parse_number("-4").is_err());
    }

    #[test]
    fn test_format_hex_address() {
        assert_eq!(format_hex_address(0x1000), "0x1000");
        assert_eq!(format_hex_address(0xDEADBEEF), "0xDEADBEEF");
        assert_eq!(format_hex_address(0), "0x0");
    }
}
