//! Observability setup for SkillDesk: structured logging plus optional
//! OpenTelemetry span export.

pub mod tracing_setup;
