use crate::utils::errors::{CertFetchError, Result};
use base64::{engine::general_purpose, Engine as _};
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::x509::X509;

/// Key material extracted from a PKCS#12 archive
#[derive(Debug)]
pub struct DecodedCertificate {
    pub private_key: PKey<Private>,
    pub certificate: X509,
}

/// Decode a base64 PKCS#12 envelope into its private key and certificate.
///
/// The archive is never passphrase-protected and must contain exactly one
/// private key and one certificate.
pub fn decode_pfx_bundle(value: &str) -> Result<DecodedCertificate> {
    let der = general_purpose::STANDARD
        .decode(value.trim())
        .map_err(|e| CertFetchError::Decode(format!("Base64 decode error: {e}")))?;

    let archive = Pkcs12::from_der(&der)
        .map_err(|e| CertFetchError::Decode(format!("Malformed PKCS#12 archive: {e}")))?;

    let parsed = archive
        .parse2("")
        .map_err(|e| CertFetchError::Decode(format!("Failed to parse PKCS#12 archive: {e}")))?;

    let private_key = parsed
        .pkey
        .ok_or_else(|| CertFetchError::Decode("Archive contains no private key".to_string()))?;

    let certificate = parsed
        .cert
        .ok_or_else(|| CertFetchError::Decode("Archive contains no certificate".to_string()))?;

    if let Some(extra) = parsed.ca {
        if !extra.is_empty() {
            return Err(CertFetchError::Decode(format!(
                "Expected exactly one certificate, found {} extra",
                extra.len()
            )));
        }
    }

    Ok(DecodedCertificate {
        private_key,
        certificate,
    })
}
