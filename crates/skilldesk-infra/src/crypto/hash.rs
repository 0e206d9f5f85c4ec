//! SHA-256 API key hasher.

use sha2::{Digest, Sha256};

use skilldesk_core::service::hash::KeyHasher;

/// Hex-encoded (lowercase) SHA-256 of the key bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256KeyHasher;

impl KeyHasher for Sha256KeyHasher {
    fn hash_key(&self, key: &str) -> String {
        Sha256::digest(key.as_bytes())
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_reference_digest() {
        assert_eq!(
            Sha256KeyHasher.hash_key("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_keys_differing_in_case_hash_differently() {
        let lower = Sha256KeyHasher.hash_key("skd_0123456789abcdef");
        let upper = Sha256KeyHasher.hash_key("skd_0123456789abcdeF");
        assert_eq!(lower.len(), 64);
        assert!(lower.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_ne!(lower, upper);
    }
}
