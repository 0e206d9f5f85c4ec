//! Business logic and repository trait definitions for SkillDesk.
//!
//! This crate defines the "ports" (repository traits, the app-identity trait)
//! that the infrastructure layer implements. It depends only on
//! `skilldesk-types` -- never on `skilldesk-infra` or any database/IO crate.

pub mod acl;
pub mod identity;
pub mod repository;
pub mod service;
pub mod version;
