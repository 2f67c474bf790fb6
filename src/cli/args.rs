use crate::utils::errors::{CertFetchError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "akv-cert-fetch")]
#[command(version = "1.0.0")]
#[command(about = "Fetches a TLS certificate from Azure Key Vault and writes it to disk as PEM")]
#[command(long_about = None)]
pub struct Cli {
    /// Key Vault name, resolved to https://<name>.vault.azure.net
    #[arg(long, env = "KEYVAULT_NAME")]
    pub vault_name: String,

    /// Name of the certificate inside the vault
    #[arg(long, env = "KEYVAULT_CERTIFICATE")]
    pub certificate_name: String,

    /// Directory the PEM files are written to (must already exist)
    #[arg(long, env = "KEYVAULT_OUTPUT_DIR", default_value = "./certs")]
    pub output_dir: PathBuf,

    /// Filename for the certificate PEM
    #[arg(long, default_value = "certificate.pem")]
    pub certificate_file: String,

    /// Filename for the private key PEM
    #[arg(long, default_value = "key.pem")]
    pub key_file: String,

    /// Seconds between status lines while idling after a successful fetch
    #[arg(long, default_value_t = 1)]
    pub heartbeat_interval: u64,

    /// Exit after writing the files instead of idling with a heartbeat
    #[arg(long)]
    pub oneshot: bool,

    /// Enable verbose logging (repeat for more verbosity: -v DEBUG, -vv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Validate the configuration before any network call is made
    pub fn validate(&self) -> Result<()> {
        validate_dns_label("vault name", &self.vault_name)?;
        validate_dns_label("certificate name", &self.certificate_name)?;
        validate_filename("certificate file", &self.certificate_file)?;
        validate_filename("key file", &self.key_file)?;

        if self.heartbeat_interval == 0 {
            return Err(CertFetchError::Config(
                "heartbeat interval must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_dns_label(what: &str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(CertFetchError::Config(format!(
            "Invalid {what} '{value}': expected alphanumeric characters and hyphens"
        )))
    }
}

fn validate_filename(what: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(CertFetchError::Config(format!(
            "Invalid {what} '{value}': expected a bare filename"
        )));
    }
    Ok(())
}
