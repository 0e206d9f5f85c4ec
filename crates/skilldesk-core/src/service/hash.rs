//! One-way hashing of API keys.
//!
//! Only the hash of an issued key is persisted; authentication hashes the
//! presented key and looks the hash up.

pub trait KeyHasher: Send + Sync {
    /// Deterministic digest of `key`.
    fn hash_key(&self, key: &str) -> String;
}
