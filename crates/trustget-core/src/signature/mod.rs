//! Detached-signature verification capability.

mod gpg;

pub use gpg::GpgVerifier;

use std::path::Path;

/// Verdict from the signature tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCheck {
    pub valid: bool,
    /// Long key id or fingerprint of the signing key, when reported.
    pub key_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("signature could not be checked: {0}")]
    Unverifiable(String),
}

/// Checks `signature` as a detached signature over `file`.
pub trait SignatureVerifier {
    fn verify_detached(&self, file: &Path, signature: &Path) -> Result<SignatureCheck, SignatureError>;
}
