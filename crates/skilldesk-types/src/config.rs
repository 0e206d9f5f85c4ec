//! Global configuration types for SkillDesk.
//!
//! `AppConfig` represents the top-level `config.toml` that controls feature
//! flags, the server bind address, and the application-identity backend.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the SkillDesk server.
///
/// Loaded from `~/.skilldesk/config.toml`. All fields have defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gate for the skill editor ("new content structures"). Off by default.
    #[serde(default)]
    pub enable_new_structures: bool,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Which application-identity backend to use.
    #[serde(default)]
    pub app_identity: AppIdentityConfig,
}

fn default_bind() -> String {
    "127.0.0.1:8181".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_new_structures: false,
            bind: default_bind(),
            app_identity: AppIdentityConfig::default(),
        }
    }
}

/// Source of the application id / default bucket name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppIdentityMode {
    /// Fixed values from this config (local development).
    Static,
    /// Query the cloud metadata server.
    Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppIdentityConfig {
    #[serde(default = "default_identity_mode")]
    pub mode: AppIdentityMode,

    /// Application id reported in `static` mode.
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Base URL of the metadata server in `metadata` mode.
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
}

fn default_identity_mode() -> AppIdentityMode {
    AppIdentityMode::Static
}

fn default_application_id() -> String {
    "dev-skilldesk".to_string()
}

fn default_metadata_url() -> String {
    "http://metadata.google.internal".to_string()
}

impl Default for AppIdentityConfig {
    fn default() -> Self {
        Self {
            mode: default_identity_mode(),
            application_id: default_application_id(),
            metadata_url: default_metadata_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert!(!config.enable_new_structures);
        assert_eq!(config.bind, "127.0.0.1:8181");
        assert_eq!(config.app_identity.mode, AppIdentityMode::Static);
    }

    #[test]
    fn test_app_config_deserialize_with_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(!config.enable_new_structures);
        assert_eq!(config.app_identity.application_id, "dev-skilldesk");
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
enable_new_structures = true
bind = "0.0.0.0:9000"

[app_identity]
mode = "metadata"
metadata_url = "http://169.254.169.254"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.enable_new_structures);
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.app_identity.mode, AppIdentityMode::Metadata);
        assert_eq!(config.app_identity.metadata_url, "http://169.254.169.254");
        assert_eq!(config.app_identity.application_id, "dev-skilldesk");
    }
}
