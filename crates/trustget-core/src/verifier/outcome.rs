//! Verification outcome values.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::checksum::HashAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Mismatch,
    NotFound,
    Error,
    Skipped,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::Mismatch => "MISMATCH",
            VerificationStatus::NotFound => "NOT_FOUND",
            VerificationStatus::Error => "ERROR",
            VerificationStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one hash or signature check.
///
/// For hash checks, `Verified` implies `expected_hash == actual_hash` and
/// `Mismatch` implies both are present and differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    #[serde(rename = "filepath")]
    pub file: PathBuf,
    pub algorithm: Option<HashAlgorithm>,
    pub expected_hash: Option<String>,
    pub actual_hash: Option<String>,
    /// Where the expected value came from, e.g. `SHA256SUMS:3`.
    #[serde(rename = "source")]
    pub provenance: Option<String>,
    pub error: Option<String>,
    #[serde(rename = "gpg_verified")]
    pub signature_verified: bool,
    #[serde(rename = "gpg_key_id")]
    pub signature_key_id: Option<String>,
    /// `"valid"` or `"invalid"` once a signature was checked.
    #[serde(rename = "gpg_key_status")]
    pub signature_key_status: Option<String>,
}

impl VerificationOutcome {
    pub fn new(status: VerificationStatus, file: &Path) -> Self {
        Self {
            status,
            file: file.to_path_buf(),
            algorithm: None,
            expected_hash: None,
            actual_hash: None,
            provenance: None,
            error: None,
            signature_verified: false,
            signature_key_id: None,
            signature_key_status: None,
        }
    }

    pub(crate) fn failed(status: VerificationStatus, file: &Path, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(status, file)
        }
    }

    pub(crate) fn with_provenance(mut self, provenance: String) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names() {
        let mut o = VerificationOutcome::new(VerificationStatus::NotFound, Path::new("/tmp/a.iso"));
        o.provenance = Some("SHA256SUMS:2".into());
        o.algorithm = Some(HashAlgorithm::Sha256);
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["status"], "NOT_FOUND");
        assert_eq!(v["filepath"], "/tmp/a.iso");
        assert_eq!(v["algorithm"], "sha256");
        assert_eq!(v["source"], "SHA256SUMS:2");
        assert_eq!(v["gpg_verified"], false);
        assert!(v["gpg_key_id"].is_null());
        assert!(v["gpg_key_status"].is_null());
        assert!(v["error"].is_null());
        assert_eq!(v.as_object().unwrap().len(), 10);
    }
}
