//! Application identity port.
//!
//! The platform that hosts SkillDesk knows the application's id and its
//! default storage bucket. Services read them through [`AppIdentity`] so the
//! platform call can be replaced in tests and local development.

use skilldesk_types::error::IdentityError;

/// Read-only accessors for the hosting platform's application identity.
pub trait AppIdentity: Send + Sync {
    /// The application's platform id.
    fn get_application_id(
        &self,
    ) -> impl std::future::Future<Output = Result<String, IdentityError>> + Send;

    /// Name of the application's default storage bucket.
    fn get_default_storage_bucket_name(
        &self,
    ) -> impl std::future::Future<Output = Result<String, IdentityError>> + Send;
}
