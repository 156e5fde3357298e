//! Base64 handling for free-form configuration blobs.
//!
//! Compose files and database `*_conf` contents are plain text in the local
//! record and base64 on the wire. Encoding happens when a request body is
//! built, decoding when a response is mapped back.
//!
//! Some platform versions echo a blob verbatim instead of base64. Plain text
//! can also be valid base64 (`abcd`, `true`), so decoding alone cannot tell
//! the two apart; [`decode_attr`] checks the recorded plain text first.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::value::Attr;

/// Encode a plain-text attribute for transmission; absent stays absent.
pub fn encode_attr(value: &Attr<String>) -> Option<String> {
    value.get().map(|plain| STANDARD.encode(plain.as_bytes()))
}

/// Encode a plain-text string.
pub fn encode(plain: &str) -> String {
    STANDARD.encode(plain.as_bytes())
}

/// Decode a wire blob back into plain text.
///
/// Blobs that are not valid base64, or that do not decode to UTF-8, are
/// returned unchanged. A verbatim echo that happens to be valid base64 is
/// still decoded; use [`decode_attr`] when the recorded value is at hand.
pub fn decode_lenient(wire: &str) -> String {
    STANDARD
        .decode(wire.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| wire.to_string())
}

/// Decode an optional wire blob into a three-state attribute.
///
/// A blob equal to the recorded plain text is a verbatim echo and is kept
/// as is.
pub fn decode_attr(wire: Option<&str>, recorded: &Attr<String>) -> Attr<String> {
    Attr::from_wire(wire.map(|wire| match recorded.get() {
        Some(plain) if plain == wire => plain.clone(),
        _ => decode_lenient(wire),
    }))
}
