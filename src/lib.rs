pub mod cert;
pub mod cli;
pub mod storage;
pub mod utils;
pub mod vault;

// Re-export specific items to avoid conflicts
pub use cert::{decode_pfx_bundle, select_latest_enabled, CertificateSummary, DecodedCertificate};
pub use cli::{args, commands};
pub use storage::local;
pub use utils::errors;
pub use vault::{auth, client};
