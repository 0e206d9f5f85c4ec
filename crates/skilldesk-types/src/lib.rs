//! Shared domain types for SkillDesk.
//!
//! This crate contains the core domain types used across the SkillDesk
//! platform: Skill, SkillChange, SkillRights, users and their permitted
//! actions, configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod change;
pub mod commit;
pub mod config;
pub mod error;
pub mod rights;
pub mod skill;
pub mod user;
