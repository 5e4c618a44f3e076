//! Integer literal parsing for profile fields
//!
//! Accepts an optional sign, then `0x`/`0o`/`0b` (any case) or plain decimal.
//! Underscores may separate digits. A decimal literal may not start with `0`
//! unless it is all zeros.

/// Parse an integer literal in any supported base.
pub fn parse_integer(text: &str) -> Option<i128> {
    let s = text.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (radix, digits, prefixed) = match body.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ => (10, body, false),
    };

    let clean = strip_separators(digits, prefixed)?;
    if !clean.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    if radix == 10 && clean.len() > 1 && clean.starts_with('0') && clean.bytes().any(|b| b != b'0')
    {
        return None;
    }

    let magnitude = i128::from_str_radix(&clean, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a non-negative literal that fits an offset or size.
pub fn parse_unsigned(text: &str) -> Option<u64> {
    parse_integer(text).and_then(|v| u64::try_from(v).ok())
}

/// Parse a signed displacement.
pub fn parse_signed(text: &str) -> Option<i64> {
    parse_integer(text).and_then(|v| i64::try_from(v).ok())
}

fn strip_separators(digits: &str, prefixed: bool) -> Option<String> {
    // a prefix may be followed directly by one separator: 0x_FF
    let digits = if prefixed {
        digits.strip_prefix('_').unwrap_or(digits)
    } else {
        digits
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }
    Some(digits.replace('_', ""))
}

/// Format an offset or size the way resolved profiles store it.
pub fn format_hex(value: u64) -> String {
    format!("0x{:X}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed() {
        assert_eq!(parse_integer("0x1F"), Some(0x1F));
        assert_eq!(parse_integer("0X1f"), Some(0x1F));
        assert_eq!(parse_integer("0o17"), Some(0o17));
        assert_eq!(parse_integer("0b101"), Some(5));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("  42 "), Some(42));
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("000"), Some(0));
        assert_eq!(parse_integer("010"), None);
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_integer("-0x10"), Some(-16));
        assert_eq!(parse_integer("+8"), Some(8));
        assert_eq!(parse_signed("-4"), Some(-4));
        assert_eq!(parse_unsigned("-4"), None);
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("0x_FF"), Some(0xFF));
        assert_eq!(parse_integer("1__0"), None);
        assert_eq!(parse_integer("_1"), None);
        assert_eq!(parse_integer("1_"), None);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("0xZZ"), None);
        assert_eq!(parse_integer("12abc"), None);
        assert_eq!(parse_integer("--1"), None);
        assert_eq!(parse_integer("ü1"), None);
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(0), "0x0");
        assert_eq!(format_hex(0xDEADBEEF), "0xDEADBEEF");
        assert_eq!(parse_unsigned(&format_hex(0x1431B08A0)), Some(0x1431B08A0));
    }
}
