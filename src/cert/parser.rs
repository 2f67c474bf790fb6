use crate::utils::errors::{CertFetchError, Result};
use chrono::{DateTime, Utc};
use x509_parser::prelude::*;

/// Operator-facing description of a fetched certificate
#[derive(Debug, Clone)]
pub struct CertificateSummary {
    pub common_name: String,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl CertificateSummary {
    /// Parse certificate DER bytes into a summary
    pub fn from_der(der_bytes: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(der_bytes)
            .map_err(|e| CertFetchError::Decode(format!("DER parsing error: {e}")))?;

        // Extract subject CN
        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or("Unknown")
            .to_string();

        // Extract issuer
        let issuer = cert
            .issuer()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or("Unknown")
            .to_string();

        // Extract validity dates
        let not_before = DateTime::from_timestamp(cert.validity().not_before.timestamp(), 0)
            .unwrap_or_else(Utc::now);
        let not_after = DateTime::from_timestamp(cert.validity().not_after.timestamp(), 0)
            .unwrap_or_else(Utc::now);

        Ok(Self {
            common_name,
            issuer,
            not_before,
            not_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::bundle::testutil::generate_identity;

    #[test]
    fn test_summary_from_der() {
        let (_, cert) = generate_identity("summary.example.com");
        let der = cert.to_der().unwrap();

        let summary = CertificateSummary::from_der(&der).unwrap();
        assert_eq!(summary.common_name, "summary.example.com");
        assert_eq!(summary.issuer, "summary.example.com");
        assert!(summary.not_after > summary.not_before);
    }

    #[test]
    fn test_summary_rejects_garbage() {
        let err = CertificateSummary::from_der(&[0x30, 0x03, 0x01, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, CertFetchError::Decode(_)));
    }
}
