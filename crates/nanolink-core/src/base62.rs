//! Base62 encoding over `[0-9A-Za-z]`.
//!
//! Used by the sequence generator to turn counter values into compact codes,
//! and by [`ShortCode`][crate::ShortCode] validation to define the unreserved
//! code alphabet.

/// The 62-character unreserved alphabet, digits first.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes a value as a base62 string with no padding.
///
/// Zero encodes as `"0"`; larger values use as many digits as needed,
/// most significant first.
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    // The alphabet is pure ASCII, so the bytes are valid UTF-8.
    String::from_utf8(digits).expect("base62 alphabet is ascii")
}

/// Returns `true` if every character of `s` belongs to the base62 alphabet.
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
