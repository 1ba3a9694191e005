//! `otpauth://` URI parsing and generation per the Google Authenticator
//! key-URI format:
//! <https://github.com/google/google-authenticator/wiki/Key-Uri-Format>
//!
//! Format: `otpauth://totp/ISSUER:LABEL?secret=BASE32&issuer=ISSUER&algorithm=SHA1&digits=6&period=30`
//!
//! Query handling is deliberately permissive: pairs are split on `&` and
//! the first `=`, nothing more. That keeps historically-accepted URIs
//! accepted, at the cost of not covering every RFC 3986 corner case.

use crate::otpauth::base32::{has_invalid_padding, is_base32};
use crate::otpauth::types::*;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Parse
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse an `otpauth://` URI into an [`OtpUriRecord`].
///
/// Only `totp` keys are supported; the secret must be well-formed base-32
/// (trailing `=` padding is stripped before storing); `algorithm`,
/// `digits` and `period` fall back to SHA1 / 6 / 30 when absent and are
/// rejected when present but malformed; a query `issuer` overrides an
/// issuer prefix in the path.
pub fn parse_otpauth_uri(uri: &str) -> Result<OtpUriRecord, KeyUriError> {
    let url = url::Url::parse(uri).map_err(|e| {
        KeyUriError::new(KeyUriErrorKind::InvalidUri, format!("not a valid URI: {}", e))
    })?;

    if url.scheme() != "otpauth" {
        return Err(KeyUriError::new(
            KeyUriErrorKind::UnsupportedScheme,
            format!("expected scheme 'otpauth', got '{}'", url.scheme()),
        ));
    }

    match url.host_str() {
        Some("totp") => {}
        Some(other) => {
            return Err(KeyUriError::new(
                KeyUriErrorKind::UnsupportedType,
                format!("unsupported key type '{}'; only 'totp' is supported", other),
            ))
        }
        None => {
            return Err(KeyUriError::new(
                KeyUriErrorKind::UnsupportedType,
                "missing key type; only 'totp' is supported",
            ))
        }
    }

    let pairs = split_query(url.query().unwrap_or(""));

    let secret = match first_value(&pairs, "secret") {
        Some(Some(s)) if !s.trim().is_empty() => s.to_string(),
        _ => {
            return Err(KeyUriError::new(
                KeyUriErrorKind::MissingSecret,
                "missing or blank 'secret' parameter",
            ))
        }
    };
    if has_invalid_padding(&secret) {
        return Err(KeyUriError::new(
            KeyUriErrorKind::InvalidSecret,
            "secret has mispositioned base-32 padding",
        ));
    }
    if !is_base32(&secret) {
        return Err(KeyUriError::new(
            KeyUriErrorKind::InvalidSecret,
            "secret is not valid base-32",
        ));
    }
    let secret = secret.trim_end_matches('=').to_string();

    let algorithm = match first_value(&pairs, "algorithm") {
        None => Algorithm::default(),
        Some(value) => {
            let value = value.unwrap_or("");
            Algorithm::from_uri_name(value).ok_or_else(|| {
                KeyUriError::new(
                    KeyUriErrorKind::InvalidAlgorithm,
                    format!("unknown algorithm '{}'; expected SHA1, SHA256 or SHA512", value),
                )
            })?
        }
    };

    let digits = parse_int_param(&pairs, "digits", DEFAULT_DIGITS, KeyUriErrorKind::InvalidDigits)?;
    let period = parse_int_param(&pairs, "period", DEFAULT_PERIOD, KeyUriErrorKind::InvalidPeriod)?;

    // Path is "/LABEL" or "/ISSUER:LABEL".
    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let decoded = percent_decode(path);

    let (mut issuer, label) = match decoded.split_once(':') {
        Some((issuer, label)) => (issuer.to_string(), label.to_string()),
        None => (String::new(), decoded),
    };

    // An explicit issuer parameter wins over the path prefix, even when
    // it is empty.
    if let Some(value) = first_value(&pairs, "issuer") {
        issuer = value.unwrap_or("").to_string();
    }

    if label.trim().is_empty() {
        return Err(KeyUriError::new(
            KeyUriErrorKind::MissingLabel,
            "key URI carries no account label",
        ));
    }

    log::debug!("parsed otpauth URI for '{}' (issuer '{}')", label, issuer);

    Ok(OtpUriRecord {
        otp_type: OtpType::Totp,
        secret,
        algorithm,
        digits,
        period,
        label,
        issuer,
    })
}

fn parse_int_param(
    pairs: &[(String, Option<String>)],
    key: &str,
    default: i32,
    kind: KeyUriErrorKind,
) -> Result<i32, KeyUriError> {
    match first_value(pairs, key) {
        None => Ok(default),
        Some(value) => {
            let value = value.unwrap_or("");
            value.parse::<i32>().map_err(|_| {
                KeyUriError::new(kind, format!("'{}' is not an integer: '{}'", key, value))
            })
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the canonical `otpauth://` URI for a record.
///
/// `secret` and `issuer` are always emitted (the issuer possibly empty);
/// `algorithm`, `digits` and `period` only when they differ from the
/// defaults, keeping the URI minimal. Best-effort: a record with an
/// invalid secret or label produces a URI the parser would reject.
pub fn build_otpauth_uri(record: &OtpUriRecord) -> String {
    let mut params = vec![format!("secret={}", record.secret)];

    if record.algorithm != Algorithm::default() {
        params.push(format!("algorithm={}", record.algorithm.uri_name()));
    }
    if record.digits != DEFAULT_DIGITS {
        params.push(format!("digits={}", record.digits));
    }
    if record.period != DEFAULT_PERIOD {
        params.push(format!("period={}", record.period));
    }
    params.push(format!("issuer={}", percent_encode(&record.issuer)));

    let uri = format!(
        "otpauth://{}/{}:{}?{}",
        record.otp_type,
        percent_encode(&record.issuer),
        percent_encode(&record.label),
        params.join("&")
    );
    log::debug!("built otpauth URI for '{}'", record.display_name());
    uri
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Query helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Split a raw query string into ordered key/value pairs. A pair without
/// `=` becomes a key with no value, which is distinct from `key=` (empty
/// value). Values are percent-decoded; keys are matched verbatim.
fn split_query(query: &str) -> Vec<(String, Option<String>)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), Some(percent_decode(value))),
            None => (pair.to_string(), None),
        })
        .collect()
}

/// First occurrence of `key`, if any. Repeated keys keep first-match-wins
/// semantics. Outer `None` = key absent; inner `None` = key present with
/// no `=`.
fn first_value<'a>(pairs: &'a [(String, Option<String>)], key: &str) -> Option<Option<&'a str>> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_deref())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Percent encoding helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn percent_encode(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                output.push(byte as char);
            }
            _ => output.push_str(&format!("%{:02X}", byte)),
        }
    }
    output
}

/// Decode `%XX` escapes. `+` is left alone: key URIs use `%20` for
/// spaces, and a `+` inside a base-32 secret must stay visible to the
/// validator rather than turn into a space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(byte) = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            {
                output.push(byte);
                i += 3;
                continue;
            }
        }
        output.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&output).into_owned()
}
