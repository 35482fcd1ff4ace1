//! Certificate fingerprint (digest) computation.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 fingerprint of DER-encoded certificate bytes.
///
/// Returns a colon-separated uppercase hex string (e.g., "AB:CD:EF:...").
pub fn fingerprint_sha256(der_bytes: &[u8]) -> String {
    crate::util::hex_colon_upper(&Sha256::digest(der_bytes))
}
