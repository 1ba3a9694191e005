//! otpauth key-URI crate: sub-modules.

pub mod base32;
pub mod settings;
pub mod types;
pub mod uri;

// Re-export top-level items for convenience.
pub use base32::{has_invalid_padding, is_base32};
pub use settings::{format_settings, parse_settings};
pub use types::*;
pub use uri::{build_otpauth_uri, parse_otpauth_uri};
