pub mod bundle;
pub mod parser;
pub mod pem;
pub mod selector;

pub use bundle::{decode_pfx_bundle, DecodedCertificate};
pub use parser::CertificateSummary;
pub use pem::{certificate_to_pem, private_key_to_pem};
pub use selector::select_latest_enabled;
