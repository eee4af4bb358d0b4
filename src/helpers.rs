//! Stateless formatting and parsing helpers.

/// Formats bytes as contiguous uppercase hex, e.g. `0A1B2C`.
pub fn to_hex_string(value: &[u8]) -> String {
    to_hex_string_joined(value, "")
}

/// Formats bytes as uppercase hex pairs joined by `separator`, e.g. `0A:1B:2C`.
pub fn to_hex_string_with_separator(value: &[u8], separator: char) -> String {
    to_hex_string_joined(value, &separator.to_string())
}

fn to_hex_string_joined(value: &[u8], separator: &str) -> String {
    value
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Parses a decimal byte from `length` characters of `s` starting at `index`.
///
/// Accepts one to three ASCII digits whose value fits in a `u8`. Returns
/// `None` for out-of-range positions, non-digit characters, or values
/// above 255.
pub fn parse_byte_from_substring(s: &str, index: usize, length: usize) -> Option<u8> {
    if !(1..=3).contains(&length) {
        return None;
    }

    let digits = s.as_bytes().get(index..index.checked_add(length)?)?;
    let mut value: u16 = 0;
    for &digit in digits {
        if !digit.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u16::from(digit - b'0');
    }

    u8::try_from(value).ok()
}
