//! Slack event signature verification.
//!
//! The expected signature is `"v0=" + hex(HMAC_SHA256(secret, "v0:<ts>:<body>"))`.
//! Verification runs over the raw request bytes as received; re-encoding the
//! parsed JSON would make the check sensitive to key order and whitespace.

use hmac::{Hmac, Mac};
use sha2::Sha256;

const SIGNATURE_VERSION: &str = "v0";

/// Computes the signature Slack would send for this timestamp and body.
pub fn sign(signing_secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("{}:{}:", SIGNATURE_VERSION, timestamp).as_bytes());
    mac.update(body);
    format!("{}={}", SIGNATURE_VERSION, hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a received signature against the raw request body.
///
/// Never fails: malformed or missing input simply yields `false`.
pub fn verify(signature: &str, timestamp: &str, body: &[u8], signing_secret: &str) -> bool {
    let expected = sign(signing_secret, timestamp, body);
    constant_time_eq(signature.as_bytes(), expected.as_bytes())
}

// Constant-time comparison to avoid timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

    #[test]
    fn test_sign_verify_round_trip() {
        let body = br#"{"key":"value"}"#;
        let signature = sign(SECRET, "1234567890", body);
        assert!(signature.starts_with("v0="));
        assert!(verify(&signature, "1234567890", body, SECRET));
    }

    #[test]
    fn test_mutated_signature_fails() {
        let body = br#"{"key":"value"}"#;
        let signature = sign(SECRET, "1234567890", body);

        // Flip one hex character at every position after the prefix
        for i in 3..signature.len() {
            let mut bytes = signature.clone().into_bytes();
            bytes[i] = if bytes[i] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(bytes).unwrap();
            if mutated != signature {
                assert!(!verify(&mutated, "1234567890", body, SECRET));
            }
        }
    }

    #[test]
    fn test_wrong_timestamp_fails() {
        let body = br#"{"key":"value"}"#;
        let signature = sign(SECRET, "1234567890", body);
        assert!(!verify(&signature, "1234567891", body, SECRET));
    }

    #[test]
    fn test_wrong_body_fails() {
        let signature = sign(SECRET, "1234567890", br#"{"key":"value"}"#);
        assert!(!verify(&signature, "1234567890", br#"{"key":"other"}"#, SECRET));
    }

    #[test]
    fn test_malformed_signature_is_false_not_panic() {
        assert!(!verify("", "1234567890", b"{}", SECRET));
        assert!(!verify("random_invalid_signature", "123457", b"{}", SECRET));
        assert!(!verify("v0=", "1234567890", b"{}", SECRET));
    }

    #[test]
    fn test_verification_over_raw_bytes() {
        // Same JSON document, different byte layout: only the exact bytes
        // that were signed verify.
        let compact = br#"{"a":1,"b":2}"#;
        let spaced = br#"{ "a": 1, "b": 2 }"#;
        let signature = sign(SECRET, "1700000000", compact);
        assert!(verify(&signature, "1700000000", compact, SECRET));
        assert!(!verify(&signature, "1700000000", spaced, SECRET));
    }
}
