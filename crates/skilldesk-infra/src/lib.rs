//! Infrastructure layer for SkillDesk.
//!
//! Contains implementations of the ports defined in `skilldesk-core`:
//! SQLite storage, SHA-256 key hashing, configuration loading, and the
//! application-identity adapters (cloud metadata server, static config).

pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod identity;
pub mod sqlite;
