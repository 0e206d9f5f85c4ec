//! HTTP request handlers.

pub mod skill_editor;
