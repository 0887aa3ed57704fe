//! Content Digest (ETag)
//!
//! SHA-1 fingerprint of a response body, quoted per the HTTP entity-tag format.

use serde_json::Value;
use sha1::{Digest, Sha1};

/// Digest of already-serialized body bytes, e.g. `"a94a8fe5..."` (quotes included).
fn digest_bytes(bytes: &[u8]) -> String {
    let hash = Sha1::digest(bytes);
    format!("\"{}\"", hex::encode(hash))
}

// == Digest ==
/// Digest of a response payload.
///
/// A JSON string is hashed as its raw text. Anything else is serialized with
/// `serde_json` first; object keys come out sorted, so equal payloads always
/// produce the same tag.
pub fn digest(body: &Value) -> String {
    match body {
        Value::String(text) => digest_bytes(text.as_bytes()),
        other => digest_bytes(other.to_string().as_bytes()),
    }
}
