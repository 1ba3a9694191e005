//! Core types for the otpauth key-URI crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digit count assumed when a URI carries no `digits` parameter.
pub const DEFAULT_DIGITS: i32 = 6;
/// Time-step in seconds assumed when a URI carries no `period` parameter.
pub const DEFAULT_PERIOD: i32 = 30;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Algorithm
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hash algorithm named by the `algorithm` URI parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri_name())
    }
}

impl Algorithm {
    /// Parse the exact spelling used in `otpauth://` URIs. Provisioning
    /// URIs use the uppercase names only; anything else is rejected.
    pub fn from_uri_name(s: &str) -> Option<Self> {
        match s {
            "SHA1" => Some(Self::Sha1),
            "SHA256" => Some(Self::Sha256),
            "SHA512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// URI-safe name for `otpauth://` parameters.
    pub fn uri_name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OTP type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Provisioning type, i.e. the URI host. Only time-based keys are
/// supported; `hotp` and anything else is rejected at parse time, so a
/// record always carries `Totp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpType {
    Totp,
}

impl Default for OtpType {
    fn default() -> Self {
        Self::Totp
    }
}

impl fmt::Display for OtpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Totp => write!(f, "totp"),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Key URI record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The structured content of one `otpauth://` key URI.
///
/// A transient value object: produced by [`crate::otpauth::uri::parse_otpauth_uri`],
/// consumed by [`crate::otpauth::uri::build_otpauth_uri`], with no identity or
/// lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpUriRecord {
    /// Provisioning type (always `totp`).
    pub otp_type: OtpType,
    /// Base-32 encoded secret, stored without trailing `=` padding.
    pub secret: String,
    /// Hash algorithm.
    pub algorithm: Algorithm,
    /// Number of code digits. Any integer the URI carries is kept as-is;
    /// range policy belongs to the code generator, not the parser.
    pub digits: i32,
    /// Time-step in seconds. Same as `digits`: no range policy here.
    pub period: i32,
    /// Account label (e.g. "user@example.com"). Never empty.
    pub label: String,
    /// Issuer (e.g. "GitHub"). May be empty; an empty issuer is still
    /// emitted when building, matching what was parsed.
    pub issuer: String,
}

impl OtpUriRecord {
    /// Create a minimal record with defaults.
    pub fn new(label: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            otp_type: OtpType::Totp,
            secret: secret.into(),
            algorithm: Algorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            label: label.into(),
            issuer: String::new(),
        }
    }

    /// Builder: set issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Builder: set algorithm.
    pub fn with_algorithm(mut self, algo: Algorithm) -> Self {
        self.algorithm = algo;
        self
    }

    /// Builder: set digit count.
    pub fn with_digits(mut self, digits: i32) -> Self {
        self.digits = digits;
        self
    }

    /// Builder: set time period.
    pub fn with_period(mut self, period: i32) -> Self {
        self.period = period;
        self
    }

    /// Display name: "Issuer (label)" or just "label".
    pub fn display_name(&self) -> String {
        if self.issuer.is_empty() {
            self.label.clone()
        } else {
            format!("{} ({})", self.issuer, self.label)
        }
    }

    /// The `"digits;period"` settings string credential stores keep next
    /// to the secret.
    pub fn settings(&self) -> String {
        crate::otpauth::settings::format_settings(self.digits, self.period)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Failure reason for key-URI handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyUriErrorKind {
    /// Input could not be split into scheme/host/path/query at all.
    InvalidUri,
    UnsupportedScheme,
    UnsupportedType,
    MissingLabel,
    MissingSecret,
    InvalidSecret,
    InvalidAlgorithm,
    InvalidDigits,
    InvalidPeriod,
    InvalidSettings,
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyUriError {
    pub kind: KeyUriErrorKind,
    pub message: String,
}

impl fmt::Display for KeyUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for KeyUriError {}

impl KeyUriError {
    pub fn new(kind: KeyUriErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }
}

impl From<KeyUriError> for String {
    fn from(e: KeyUriError) -> String {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Algorithm ────────────────────────────────────────────────

    #[test]
    fn algorithm_uri_names_round_trip() {
        for algo in [Algorithm::Sha1, Algorithm::Sha256, Algorithm::Sha512] {
            assert_eq!(Algorithm::from_uri_name(algo.uri_name()), Some(algo));
        }
    }

    #[test]
    fn algorithm_rejects_loose_spellings() {
        assert_eq!(Algorithm::from_uri_name("sha1"), None);
        assert_eq!(Algorithm::from_uri_name("SHA-256"), None);
        assert_eq!(Algorithm::from_uri_name("MD5"), None);
        assert_eq!(Algorithm::from_uri_name(""), None);
    }

    #[test]
    fn algorithm_default_is_sha1() {
        assert_eq!(Algorithm::default(), Algorithm::Sha1);
        assert_eq!(Algorithm::Sha1.to_string(), "SHA1");
    }

    // ── Record ───────────────────────────────────────────────────

    #[test]
    fn new_record_has_defaults() {
        let rec = OtpUriRecord::new("alice@example.com", "JBSWY3DPEHPK3PXP");
        assert_eq!(rec.otp_type, OtpType::Totp);
        assert_eq!(rec.digits, DEFAULT_DIGITS);
        assert_eq!(rec.period, DEFAULT_PERIOD);
        assert_eq!(rec.algorithm, Algorithm::Sha1);
        assert!(rec.issuer.is_empty());
    }

    #[test]
    fn display_name_with_and_without_issuer() {
        let rec = OtpUriRecord::new("alice", "AAAA");
        assert_eq!(rec.display_name(), "alice");
        let rec = rec.with_issuer("Example");
        assert_eq!(rec.display_name(), "Example (alice)");
    }

    #[test]
    fn record_serde_round_trip() {
        let rec = OtpUriRecord::new("alice", "JBSWY3DPEHPK3PXP")
            .with_issuer("Example")
            .with_algorithm(Algorithm::Sha256)
            .with_digits(8)
            .with_period(60);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"SHA256\""));
        assert!(json.contains("\"totp\""));
        let back: OtpUriRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    // ── Errors ───────────────────────────────────────────────────

    #[test]
    fn error_display_includes_kind_and_reason() {
        let e = KeyUriError::new(KeyUriErrorKind::MissingSecret, "missing 'secret' parameter");
        assert_eq!(e.to_string(), "[MissingSecret] missing 'secret' parameter");
    }
}
