//! Application identity adapters.
//!
//! Implements the `AppIdentity` port from `skilldesk-core`:
//! - [`MetadataAppIdentity`] asks the cloud metadata server.
//! - [`StaticAppIdentity`] returns configured values (local development).
//!
//! [`ConfiguredAppIdentity`] picks one of them from [`AppIdentityConfig`].

mod metadata;

pub use metadata::MetadataAppIdentity;

use skilldesk_core::identity::AppIdentity;
use skilldesk_types::config::{AppIdentityConfig, AppIdentityMode};
use skilldesk_types::error::IdentityError;

/// Default storage bucket naming convention of the hosting platform.
pub fn default_bucket_for(application_id: &str) -> String {
    format!("{application_id}.appspot.com")
}

/// Fixed application identity.
#[derive(Debug, Clone)]
pub struct StaticAppIdentity {
    application_id: String,
}

impl StaticAppIdentity {
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
        }
    }
}

impl AppIdentity for StaticAppIdentity {
    async fn get_application_id(&self) -> Result<String, IdentityError> {
        Ok(self.application_id.clone())
    }

    async fn get_default_storage_bucket_name(&self) -> Result<String, IdentityError> {
        Ok(default_bucket_for(&self.application_id))
    }
}

/// The identity backend selected by configuration.
pub enum ConfiguredAppIdentity {
    Static(StaticAppIdentity),
    Metadata(MetadataAppIdentity),
}

impl ConfiguredAppIdentity {
    pub fn from_config(config: &AppIdentityConfig) -> Self {
        match config.mode {
            AppIdentityMode::Static => {
                Self::Static(StaticAppIdentity::new(config.application_id.clone()))
            }
            AppIdentityMode::Metadata => {
                Self::Metadata(MetadataAppIdentity::new(config.metadata_url.clone()))
            }
        }
    }
}

impl AppIdentity for ConfiguredAppIdentity {
    async fn get_application_id(&self) -> Result<String, IdentityError> {
        match self {
            Self::Static(inner) => inner.get_application_id().await,
            Self::Metadata(inner) => inner.get_application_id().await,
        }
    }

    async fn get_default_storage_bucket_name(&self) -> Result<String, IdentityError> {
        match self {
            Self::Static(inner) => inner.get_default_storage_bucket_name().await,
            Self::Metadata(inner) => inner.get_default_storage_bucket_name().await,
        }
    }
}
