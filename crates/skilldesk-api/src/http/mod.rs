//! HTTP layer for the skill editor.
//!
//! Axum routes with API key authentication, per-endpoint capability checks,
//! and an envelope response format.

pub mod acl;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
