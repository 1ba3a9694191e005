//! # keyuri - `otpauth://` key-provisioning URIs
//!
//! Parsing, validation and generation of the key URIs authenticator apps
//! exchange via QR codes and links:
//!
//! - **Key URIs**: parse `otpauth://totp/...` into a structured record and
//!   build the canonical URI back from one (Google Authenticator key-URI
//!   format, TOTP only)
//! - **Base-32 secrets**: character-level validation of RFC 4648 secrets,
//!   padding checks, plus decode/encode helpers
//! - **Settings strings**: the `"digits;period"` companion field credential
//!   stores keep next to the secret
//!
//! Everything here is synchronous and side-effect free; storage, code
//! generation and UI live in the surrounding application.

pub mod otpauth;
