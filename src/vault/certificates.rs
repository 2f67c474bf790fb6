use crate::utils::errors::{CertFetchError, Result};
use crate::vault::client::KeyVaultClient;
use crate::vault::API_VERSION;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of the certificate version listing
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateVersionPage {
    #[serde(default)]
    pub value: Vec<CertificateVersionItem>,
    #[serde(rename = "nextLink")]
    pub next_link: Option<String>,
}

/// A raw listing entry as returned by the vault
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateVersionItem {
    pub id: String,
    pub attributes: CertificateAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificateAttributes {
    #[serde(default)]
    pub enabled: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub updated: DateTime<Utc>,
}

/// A certificate version record, reduced to what selection needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateVersion {
    pub version: String,
    pub enabled: bool,
    pub updated: DateTime<Utc>,
}

impl CertificateVersionItem {
    /// The version token is the last path segment of the entry's id URL
    pub fn version_token(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or_default()
    }
}

impl From<CertificateVersionItem> for CertificateVersion {
    fn from(item: CertificateVersionItem) -> Self {
        Self {
            version: item.version_token().to_string(),
            enabled: item.attributes.enabled,
            updated: item.attributes.updated,
        }
    }
}

/// The secret value backing a certificate: a base64-encoded PKCS#12 archive
#[derive(Debug, Clone, Deserialize)]
pub struct SecretBundle {
    pub value: String,
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
}

const PKCS12_CONTENT_TYPE: &str = "application/x-pkcs12";

impl KeyVaultClient {
    /// List all versions of a certificate, following pagination transparently
    pub async fn list_certificate_versions(&self, name: &str) -> Result<Vec<CertificateVersion>> {
        let mut versions = Vec::new();
        let mut url = Some(format!(
            "{}/certificates/{}/versions?api-version={}",
            self.base_url(),
            name,
            API_VERSION
        ));

        while let Some(page_url) = url {
            let page: CertificateVersionPage =
                serde_json::from_value(self.get_json(&page_url).await?)?;
            versions.extend(page.value.into_iter().map(CertificateVersion::from));
            url = page.next_link.filter(|link| !link.is_empty());
        }

        Ok(versions)
    }

    /// Fetch the secret holding a certificate version's key material
    pub async fn get_secret(&self, name: &str, version: &str) -> Result<SecretBundle> {
        if version.is_empty() {
            return Err(CertFetchError::NotFound(format!(
                "No version given for secret '{name}'"
            )));
        }

        let url = format!(
            "{}/secrets/{}/{}?api-version={}",
            self.base_url(),
            name,
            version,
            API_VERSION
        );

        let bundle: SecretBundle = serde_json::from_value(self.get_json(&url).await?)?;

        if let Some(content_type) = &bundle.content_type {
            if content_type != PKCS12_CONTENT_TYPE {
                tracing::warn!(
                    "Secret '{name}' has content type '{content_type}', expected '{PKCS12_CONTENT_TYPE}'"
                );
            }
        }

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn version_entry(base: &str, version: &str, enabled: bool, updated: i64) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{base}/certificates/web-tls/{version}"),
            "attributes": {
                "enabled": enabled,
                "created": updated,
                "updated": updated
            }
        })
    }

    #[test]
    fn test_version_token_from_id() {
        let item = CertificateVersionItem {
            id: "https://v.vault.azure.net/certificates/web-tls/abc123".to_string(),
            attributes: CertificateAttributes {
                enabled: true,
                updated: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            },
        };
        assert_eq!(item.version_token(), "abc123");
    }

    #[test]
    fn test_enabled_defaults_to_false() {
        let item: CertificateVersionItem = serde_json::from_value(serde_json::json!({
            "id": "https://v.vault.azure.net/certificates/web-tls/abc123",
            "attributes": { "updated": 1700000000 }
        }))
        .unwrap();
        assert!(!item.attributes.enabled);
    }

    #[tokio::test]
    async fn test_list_versions_follows_next_link() {
        let server = MockServer::start().await;
        let base = server.uri();

        let page_two = serde_json::json!({
            "value": [version_entry(&base, "v2", true, 1_700_000_100)],
            "nextLink": null
        });
        Mock::given(method("GET"))
            .and(path("/certificates/web-tls/versions"))
            .and(query_param("$skiptoken", "page2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_two))
            .mount(&server)
            .await;

        let page_one = serde_json::json!({
            "value": [version_entry(&base, "v1", false, 1_700_000_000)],
            "nextLink": format!("{base}/certificates/web-tls/versions?api-version={API_VERSION}&$skiptoken=page2")
        });
        Mock::given(method("GET"))
            .and(path("/certificates/web-tls/versions"))
            .and(query_param_is_missing("$skiptoken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_one))
            .mount(&server)
            .await;

        let client = KeyVaultClient::new(base, "test-token".to_string());
        let versions = client.list_certificate_versions("web-tls").await.unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, "v1");
        assert!(!versions[0].enabled);
        assert_eq!(versions[1].version, "v2");
        assert!(versions[1].enabled);
        assert_eq!(versions[1].updated.timestamp(), 1_700_000_100);
    }

    #[tokio::test]
    async fn test_get_secret_returns_bundle() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/secrets/web-tls/v2"))
            .and(query_param("api-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": "AAAA",
                "contentType": "application/x-pkcs12",
                "id": format!("{}/secrets/web-tls/v2", server.uri())
            })))
            .mount(&server)
            .await;

        let client = KeyVaultClient::new(server.uri(), "test-token".to_string());
        let bundle = client.get_secret("web-tls", "v2").await.unwrap();
        assert_eq!(bundle.value, "AAAA");
        assert_eq!(bundle.content_type.as_deref(), Some("application/x-pkcs12"));
    }

    #[tokio::test]
    async fn test_get_secret_unknown_version() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/secrets/web-tls/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = KeyVaultClient::new(server.uri(), "test-token".to_string());
        let err = client.get_secret("web-tls", "nope").await.unwrap_err();
        assert!(matches!(err, CertFetchError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_secret_empty_version_is_not_found() {
        let server = MockServer::start().await;
        let client = KeyVaultClient::new(server.uri(), "test-token".to_string());
        let err = client.get_secret("web-tls", "").await.unwrap_err();
        assert!(matches!(err, CertFetchError::NotFound(_)));
    }
}
