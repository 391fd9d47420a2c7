//! Supported hash algorithms and detection from hex length.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash algorithms the verifier can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

/// Returned when an algorithm name is not one of md5/sha1/sha256/sha512.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported algorithm: {0}")]
pub struct UnsupportedAlgorithm(pub String);

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length of the hex digest this algorithm produces.
    pub fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha512 => 128,
        }
    }

    /// Infers the algorithm from the length of a hex digest (surrounding
    /// whitespace ignored). Returns `None` for any other length.
    pub fn detect(hex_digest: &str) -> Option<Self> {
        let len = hex_digest.trim().len();
        Self::ALL.into_iter().find(|a| a.hex_len() == len)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = UnsupportedAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnsupportedAlgorithm(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_by_length() {
        assert_eq!(HashAlgorithm::detect(&"a".repeat(32)), Some(HashAlgorithm::Md5));
        assert_eq!(HashAlgorithm::detect(&"a".repeat(40)), Some(HashAlgorithm::Sha1));
        assert_eq!(HashAlgorithm::detect(&"a".repeat(64)), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::detect(&"a".repeat(128)), Some(HashAlgorithm::Sha512));
    }

    #[test]
    fn detect_other_lengths_undetectable() {
        for len in [0usize, 1, 31, 33, 39, 56, 63, 65, 96, 127, 129] {
            assert_eq!(HashAlgorithm::detect(&"f".repeat(len)), None, "len {len}");
        }
    }

    #[test]
    fn detect_ignores_surrounding_whitespace() {
        let padded = format!("  {}\n", "0".repeat(64));
        assert_eq!(HashAlgorithm::detect(&padded), Some(HashAlgorithm::Sha256));
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        let err = "blake2b".parse::<HashAlgorithm>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported algorithm: blake2b");
    }
}
