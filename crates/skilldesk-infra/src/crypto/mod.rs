//! Cryptographic helpers.

pub mod hash;
