//! URL-safe base64 as used by the Gmail API for message bodies
//!
//! Encoding uses the URL-safe alphabet (`-` and `_` in place of `+`
//! and `/`) with all trailing `=` stripped. Decoding accepts both
//! padded and unpadded input: missing padding is restored from the
//! input length before decoding.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

/// Encode bytes as unpadded URL-safe base64.
#[must_use]
pub fn encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode URL-safe base64, with or without trailing padding.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the input is not valid URL-safe
/// base64.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut padded = text.to_string();
    match text.len() % 4 {
        2 => padded.push_str("=="),
        3 => padded.push('='),
        _ => {}
    }

    URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| Error::Decode(e.to_string()))
}
