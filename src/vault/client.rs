use crate::utils::errors::{CertFetchError, Result};
use reqwest::{Client, Response};
use serde_json::Value;

pub struct KeyVaultClient {
    client: Client,
    base_url: String,
    token: String,
}

impl KeyVaultClient {
    /// Create a client for a vault base URL with a bearer token already in hand
    pub fn new(base_url: String, token: String) -> Self {
        let client = super::create_http_client().expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            token,
        }
    }

    /// Get vault base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated GET against a full vault URL
    pub(crate) async fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!("Making GET request to: {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());
        self.handle_response(response).await
    }

    /// Handle HTTP response from the vault
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else if status == 404 {
            Err(CertFetchError::NotFound("Resource not found".to_string()))
        } else if status == 401 || status == 403 {
            Err(CertFetchError::Auth(
                "Access denied - token may be invalid, expired, or lack required permissions"
                    .to_string(),
            ))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CertFetchError::Api(error_text))
        }
    }
}
