//! Cloud metadata server client.
//!
//! `GET {base}/computeMetadata/v1/project/project-id` with the
//! `Metadata-Flavor: Google` header returns the project (application) id as
//! plain text.

use std::time::Duration;

use skilldesk_core::identity::AppIdentity;
use skilldesk_types::error::IdentityError;

use super::default_bucket_for;

const PROJECT_ID_PATH: &str = "project/project-id";

/// `AppIdentity` backed by the metadata server.
#[derive(Debug, Clone)]
pub struct MetadataAppIdentity {
    client: reqwest::Client,
    base_url: String,
}

impl MetadataAppIdentity {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<String, IdentityError> {
        let url = format!("{}/computeMetadata/v1/{path}", self.base_url);
        tracing::debug!(%url, "querying metadata server");

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status(status.as_u16()));
        }

        let value = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(IdentityError::EmptyValue(path.to_string()));
        }
        Ok(value.to_string())
    }
}

impl AppIdentity for MetadataAppIdentity {
    async fn get_application_id(&self) -> Result<String, IdentityError> {
        self.fetch(PROJECT_ID_PATH).await
    }

    async fn get_default_storage_bucket_name(&self) -> Result<String, IdentityError> {
        let application_id = self.get_application_id().await?;
        Ok(default_bucket_for(&application_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;

    /// Serve a fake metadata server on an ephemeral port and return its base URL.
    async fn fake_metadata_server(project_id: &'static str) -> String {
        let app = Router::new().route(
            "/computeMetadata/v1/project/project-id",
            get(move |headers: HeaderMap| async move {
                match headers.get("Metadata-Flavor").and_then(|v| v.to_str().ok()) {
                    Some("Google") => (StatusCode::OK, project_id.to_string()),
                    _ => (StatusCode::FORBIDDEN, String::new()),
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_reads_project_id_and_derives_bucket() {
        let base = fake_metadata_server("skilldesk-prod\n").await;
        let identity = MetadataAppIdentity::new(format!("{base}/"));

        assert_eq!(identity.get_application_id().await.unwrap(), "skilldesk-prod");
        assert_eq!(
            identity.get_default_storage_bucket_name().await.unwrap(),
            "skilldesk-prod.appspot.com"
        );
    }

    #[tokio::test]
    async fn test_empty_project_id_is_an_error() {
        let base = fake_metadata_server("  ").await;
        let err = MetadataAppIdentity::new(base)
            .get_application_id()
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::EmptyValue(_)));
    }

    #[tokio::test]
    async fn test_unknown_path_surfaces_status() {
        let base = fake_metadata_server("unused").await;
        let identity = MetadataAppIdentity::new(base);
        let err = identity.fetch("instance/zone").await.unwrap_err();
        assert!(matches!(err, IdentityError::Status(404)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let err = MetadataAppIdentity::new("http://127.0.0.1:9")
            .get_application_id()
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Request(_)));
    }
}
