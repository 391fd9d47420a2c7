//! Value types produced by a scan.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::checksum::HashAlgorithm;

/// Kind of integrity source, as classified from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChecksumKind {
    Sha256,
    Sha512,
    Sha1,
    Md5,
    Generic,
    Signature,
}

impl ChecksumKind {
    /// Order in which sources are consulted when several describe the same file.
    pub const RESOLUTION_ORDER: [ChecksumKind; 5] = [
        ChecksumKind::Sha256,
        ChecksumKind::Sha512,
        ChecksumKind::Sha1,
        ChecksumKind::Md5,
        ChecksumKind::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChecksumKind::Sha256 => "SHA256",
            ChecksumKind::Sha512 => "SHA512",
            ChecksumKind::Sha1 => "SHA1",
            ChecksumKind::Md5 => "MD5",
            ChecksumKind::Generic => "GENERIC",
            ChecksumKind::Signature => "SIGNATURE",
        }
    }
}

impl fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `hash -> filename` line of a checksum file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumEntry {
    /// Lowercase hex.
    pub hash_value: String,
    pub filename: String,
    /// Inferred from the hex length; `None` serializes as `"unknown"`.
    #[serde(serialize_with = "algorithm_or_unknown")]
    pub algorithm: Option<HashAlgorithm>,
    /// 1-based line number in the source.
    pub source_line: usize,
}

impl ChecksumEntry {
    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.map(HashAlgorithm::as_str).unwrap_or("unknown")
    }

    pub fn matches(&self, filename: &str) -> bool {
        self.filename.to_lowercase() == filename.to_lowercase()
    }
}

fn algorithm_or_unknown<S: Serializer>(alg: &Option<HashAlgorithm>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(alg.map(HashAlgorithm::as_str).unwrap_or("unknown"))
}

/// A fetched (or local) checksum file or a signature reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumSource {
    /// URL or path the content came from.
    pub origin: String,
    pub filename: String,
    pub kind: ChecksumKind,
    #[serde(skip_serializing)]
    pub raw_content: String,
    pub entries: Vec<ChecksumEntry>,
}

impl ChecksumSource {
    /// First entry whose filename equals `filename`, ignoring case.
    pub fn entry_for(&self, filename: &str) -> Option<&ChecksumEntry> {
        self.entries.iter().find(|e| e.matches(filename))
    }
}

/// Everything one `scan` call discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub base: String,
    pub sources: Vec<ChecksumSource>,
    pub signature_origins: Vec<String>,
    /// Every URL requested during the scan, in request order.
    pub probed_origins: Vec<String>,
}

impl ScanResult {
    pub fn empty(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.signature_origins.is_empty()
    }

    /// Source and entry for `filename` following [`ChecksumKind::RESOLUTION_ORDER`];
    /// within one kind, sources are tried in discovery order.
    pub fn resolve(&self, filename: &str) -> Option<(&ChecksumSource, &ChecksumEntry)> {
        ChecksumKind::RESOLUTION_ORDER.iter().find_map(|kind| {
            self.sources
                .iter()
                .filter(|s| s.kind == *kind)
                .find_map(|s| s.entry_for(filename).map(|e| (s, e)))
        })
    }

    pub fn get_checksum_for(&self, filename: &str) -> Option<&ChecksumEntry> {
        self.resolve(filename).map(|(_, e)| e)
    }

    pub fn has_checksum_for(&self, filename: &str) -> bool {
        self.sources.iter().any(|s| s.entry_for(filename).is_some())
    }
}
