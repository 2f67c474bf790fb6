use crate::utils::errors::{CertFetchError, Result};
use reqwest::Client;
use serde_json::Value;
use std::env;

/// Default Azure AD authority used to mint Key Vault access tokens
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// OAuth2 scope covering all Key Vault data-plane operations
pub const KEY_VAULT_SCOPE: &str = "https://vault.azure.net/.default";

/// Service-principal credentials picked up from the ambient environment
pub struct ClientCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Read AZURE_TENANT_ID / AZURE_CLIENT_ID / AZURE_CLIENT_SECRET
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tenant_id: require_env("AZURE_TENANT_ID")?,
            client_id: require_env("AZURE_CLIENT_ID")?,
            client_secret: require_env("AZURE_CLIENT_SECRET")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CertFetchError::Auth(format!(
            "{name} is not set. Provide service-principal credentials in the environment."
        ))),
    }
}

pub struct AzureAuth {
    client: Client,
    authority: String,
}

impl AzureAuth {
    pub fn new(authority: String) -> Self {
        let client = super::create_http_client().expect("Failed to create HTTP client");

        Self { client, authority }
    }

    /// Get an access token from the environment or the token endpoint
    pub async fn get_token(&self) -> Result<String> {
        // A pre-issued token takes precedence over the credential flow
        if let Ok(token) = env::var("KEYVAULT_ACCESS_TOKEN") {
            if !token.is_empty() {
                tracing::debug!("Found KEYVAULT_ACCESS_TOKEN in environment");
                return Ok(token);
            }
        }

        let credentials = ClientCredentials::from_env()?;
        self.fetch_token(&credentials).await
    }

    /// Run the OAuth2 client-credentials flow for the Key Vault scope
    pub async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<String> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority, credentials.tenant_id
        );

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", KEY_VAULT_SCOPE),
        ];

        let response = self.client.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CertFetchError::Auth(format!(
                "Token request failed: {status} - {error_text}"
            )));
        }

        let token_response: Value = response.json().await?;

        if let Some(access_token) = token_response.get("access_token") {
            if let Some(token) = access_token.as_str() {
                tracing::info!("Authenticated with Azure AD");
                return Ok(token.to_string());
            }
        }

        Err(CertFetchError::Auth(
            "Invalid response from identity provider".to_string(),
        ))
    }
}

impl Default for AzureAuth {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITY.to_string())
    }
}
