//! Base-32 secret validation (RFC 3548/4648 alphabet).
//!
//! The two validators work on character content alone and never decode:
//! the parser only needs a yes/no verdict before it strips padding and
//! stores the secret verbatim. [`decode_secret`] is there for callers that
//! do need the raw key bytes.

use crate::otpauth::types::{KeyUriError, KeyUriErrorKind};

/// Padding runs a well-formed base-32 string can end with. A full
/// 8-character block needs 0 trailing `=`; partial blocks need 1, 3, 4
/// or 6.
const VALID_PADDING_LENGTHS: [usize; 5] = [0, 1, 3, 4, 6];

fn is_base32_char(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A'..='Z' | '2'..='7')
}

/// Whether `s` is a syntactically valid base-32 secret: after stripping
/// any trailing `=` padding it is non-empty and contains only `A-Z2-7`,
/// case-insensitively.
pub fn is_base32(s: &str) -> bool {
    let data = s.trim_end_matches('=');
    !data.is_empty() && data.chars().all(is_base32_char)
}

/// Whether `s` carries `=` padding in an impossible position: any `=`
/// outside the contiguous trailing run, or a trailing run whose length is
/// not one of the lengths base-32 can produce.
pub fn has_invalid_padding(s: &str) -> bool {
    let data = s.trim_end_matches('=');
    if data.contains('=') {
        return true;
    }
    let pad = s.len() - data.len();
    !VALID_PADDING_LENGTHS.contains(&pad)
}

/// Decode a base-32 secret to raw key bytes (padding and case tolerated).
pub fn decode_secret(s: &str) -> Result<Vec<u8>, KeyUriError> {
    let cleaned = s.trim_end_matches('=').to_uppercase();
    base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &cleaned).ok_or_else(|| {
        KeyUriError::new(KeyUriErrorKind::InvalidSecret, "secret is not valid base-32")
    })
}

/// Encode raw bytes to base-32 (uppercase, no padding).
pub fn encode_secret(bytes: &[u8]) -> String {
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Alphabet ─────────────────────────────────────────────────

    #[test]
    fn accepts_standard_alphabet() {
        assert!(is_base32("JBSWY3DPEHPK3PXP"));
        assert!(is_base32("ABCDEFGHIJKLMNOPQRSTUVWXYZ234567"));
    }

    #[test]
    fn accepts_lowercase() {
        assert!(is_base32("jbswy3dpehpk3pxp"));
        assert!(is_base32("MiXeDcAsE234"));
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        // 0, 1, 8 and 9 are not in the base-32 alphabet.
        assert!(!is_base32("JBSWY3DPEHPK3PXP1"));
        assert!(!is_base32("ABC0DEF"));
        assert!(!is_base32("ABC8"));
        assert!(!is_base32("ABC9"));
        assert!(!is_base32("ABC DEF"));
        assert!(!is_base32("ABC!"));
    }

    #[test]
    fn rejects_empty_and_padding_only() {
        assert!(!is_base32(""));
        assert!(!is_base32("="));
        assert!(!is_base32("======"));
    }

    // ── Padding ──────────────────────────────────────────────────

    #[test]
    fn valid_trailing_padding_lengths() {
        for pad in [0usize, 1, 3, 4, 6] {
            let s = format!("JBSWY3DP{}", "=".repeat(pad));
            assert!(!has_invalid_padding(&s), "pad {pad} should be valid");
            assert!(is_base32(&s), "pad {pad} should still be base-32");
        }
    }

    #[test]
    fn invalid_trailing_padding_lengths() {
        for pad in [2usize, 5, 7, 8] {
            let s = format!("JBSWY3DP{}", "=".repeat(pad));
            assert!(has_invalid_padding(&s), "pad {pad} should be invalid");
        }
    }

    #[test]
    fn interspersed_padding_is_invalid() {
        assert!(has_invalid_padding("JBSW=Y3DP"));
        assert!(has_invalid_padding("=JBSWY3DP"));
        assert!(has_invalid_padding("JB=SWY3DP==="));
    }

    #[test]
    fn no_padding_is_fine() {
        assert!(!has_invalid_padding("JBSWY3DPEHPK3PXP"));
        assert!(!has_invalid_padding(""));
    }

    // ── Decode / encode ──────────────────────────────────────────

    #[test]
    fn decode_agrees_with_validator() {
        for s in ["JBSWY3DPEHPK3PXP", "jbswy3dp", "MFRGGZDF", "GEZDGNBVGY3TQOJQ"] {
            assert!(is_base32(s));
            assert!(decode_secret(s).is_ok(), "{s} should decode");
        }
        assert!(decode_secret("JBSWY3DPEHPK3PXP1").is_err());
    }

    #[test]
    fn decode_known_value() {
        // "Hello!" in base-32.
        let bytes = decode_secret("JBSWY3DPEE======").unwrap();
        assert_eq!(bytes, b"Hello!");
        assert_eq!(encode_secret(&bytes), "JBSWY3DPEE");
    }

    #[test]
    fn encode_decode_round_trip() {
        let bytes = b"\x00\x01\xfe\xffkey material";
        let encoded = encode_secret(bytes);
        assert!(is_base32(&encoded));
        assert_eq!(decode_secret(&encoded).unwrap(), bytes);
    }
}
