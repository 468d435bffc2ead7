//! Content fingerprinting for planning-drift detection (spec §3, GLOSSARY).

use sha2::{Digest, Sha256};

/// Computes a hex-encoded SHA-256 digest of `bytes`, used as the index's
/// `Digests` field to detect divergence between the on-disk planning spec
/// and the digest recorded at the last run.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        assert_eq!(fingerprint(b"hello"), fingerprint(b"hello"));
    }

    #[test]
    fn fingerprint_differs_on_drift() {
        assert_ne!(fingerprint(b"plan v1"), fingerprint(b"plan v2"));
    }
}
