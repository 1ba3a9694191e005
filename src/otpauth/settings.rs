//! The `"digits;period"` settings string.
//!
//! Credential stores that keep the raw secret in one field keep the
//! digit count and time-step in a companion field with this shape, e.g.
//! `"6;30"`. This module owns that micro-format.

use crate::otpauth::types::{KeyUriError, KeyUriErrorKind};

/// Parse a `"digits;period"` string into `(digits, period)`.
///
/// Whitespace around either part is tolerated; anything that is not two
/// `;`-separated integers is rejected. As with the URI parameters, no
/// range policy is applied.
pub fn parse_settings(s: &str) -> Result<(i32, i32), KeyUriError> {
    let (digits, period) = s.split_once(';').ok_or_else(|| {
        KeyUriError::new(
            KeyUriErrorKind::InvalidSettings,
            format!("expected 'digits;period', got '{}'", s),
        )
    })?;
    let digits = parse_part(digits, "digits")?;
    let period = parse_part(period, "period")?;
    Ok((digits, period))
}

fn parse_part(part: &str, name: &str) -> Result<i32, KeyUriError> {
    part.trim().parse::<i32>().map_err(|_| {
        KeyUriError::new(
            KeyUriErrorKind::InvalidSettings,
            format!("{} is not an integer: '{}'", name, part),
        )
    })
}

/// Format `(digits, period)` as a settings string.
pub fn format_settings(digits: i32, period: i32) -> String {
    format!("{};{}", digits, period)
}
