//! MIME content transfer encodings.
//!
//! Base64 (via the `base64` crate) and a Quoted-Printable encoder
//! (RFC 2045). Both are pure and stateless.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write as _;

/// Maximum encoded line length (RFC 2045 §6.7/§6.8).
const MAX_LINE_LENGTH: usize = 76;

/// Encodes data as Base64, unwrapped.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes data as Base64 wrapped to 76-column lines with CRLF, the
/// form required inside a message body.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut result = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2 + 2);

    for chunk in encoded.as_bytes().chunks(MAX_LINE_LENGTH) {
        // chunks() of an ASCII string are valid UTF-8
        result.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        result.push_str("\r\n");
    }

    result
}

/// Encodes text using Quoted-Printable encoding (RFC 2045).
///
/// Encodes bytes that are not printable ASCII or would interfere
/// with email transmission.
#[must_use]
pub fn encode_quoted_printable(text: &str) -> String {
    let mut result = String::new();
    let mut line_length = 0;

    for byte in text.as_bytes() {
        // Check if we need a soft line break
        if line_length >= MAX_LINE_LENGTH - 3 {
            result.push_str("=\r\n");
            line_length = 0;
        }

        match byte {
            // Printable ASCII except '=' and space (handle separately)
            b'!'..=b'<' | b'>'..=b'~' => {
                result.push(*byte as char);
                line_length += 1;
            }
            // Space needs special handling (encode at line end)
            b' ' => {
                if line_length >= MAX_LINE_LENGTH - 1 {
                    result.push_str("=20");
                    line_length += 3;
                } else {
                    result.push(' ');
                    line_length += 1;
                }
            }
            // Everything else gets encoded
            _ => {
                result.push('=');
                let _ = write!(result, "{byte:02X}");
                line_length += 3;
            }
        }
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip_known_value() {
        assert_eq!(encode_base64(b"user"), "dXNlcg==");
        assert_eq!(encode_base64(b""), "");
    }

    #[test]
    fn base64_wrapped_lines_stay_under_limit() {
        let data = vec![0xAAu8; 200];
        let wrapped = encode_base64_wrapped(&data);
        for line in wrapped.split("\r\n") {
            assert!(line.len() <= MAX_LINE_LENGTH);
        }
        assert!(wrapped.ends_with("\r\n"));
    }

    #[test]
    fn base64_wrapped_preserves_content() {
        let data = b"The quick brown fox jumps over the lazy dog. 0123456789.";
        let wrapped = encode_base64_wrapped(data);
        let joined: String = wrapped.split("\r\n").collect();
        assert_eq!(joined, encode_base64(data));
    }

    #[test]
    fn quoted_printable_passes_plain_ascii() {
        assert_eq!(encode_quoted_printable("Hello, World!"), "Hello, World!");
    }

    #[test]
    fn quoted_printable_escapes_equals_sign() {
        assert_eq!(encode_quoted_printable("a=b"), "a=3Db");
    }

    #[test]
    fn quoted_printable_escapes_non_ascii() {
        assert_eq!(encode_quoted_printable("é"), "=C3=A9");
    }

    #[test]
    fn quoted_printable_soft_breaks_long_lines() {
        let long = "x".repeat(200);
        let encoded = encode_quoted_printable(&long);
        for line in encoded.split("=\r\n") {
            assert!(line.len() <= MAX_LINE_LENGTH);
        }
    }
}
