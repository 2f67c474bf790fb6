use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertFetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Key Vault API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bundle decode error: {0}")]
    Decode(String),

    #[error("PEM encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CertFetchError>;
