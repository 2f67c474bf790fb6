pub mod auth;
pub mod certificates;
pub mod client;

use reqwest::Client;

/// DNS suffix of the public-cloud Key Vault service
pub const KEY_VAULT_DNS_SUFFIX: &str = "vault.azure.net";

/// REST API version sent with every vault request
pub const API_VERSION: &str = "7.4";

/// Create a standardized HTTP client with security best practices
pub fn create_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .use_rustls_tls() // Use rustls with system certificate store
        .build()
}

/// Resolve a vault name to its base URL, e.g. `https://my-vault.vault.azure.net`
pub fn vault_base_url(vault_name: &str) -> String {
    format!("https://{vault_name}.{KEY_VAULT_DNS_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_base_url() {
        assert_eq!(
            vault_base_url("my-vault"),
            "https://my-vault.vault.azure.net"
        );
    }
}
