//! File digests for verification (MD5, SHA-1, SHA-256, SHA-512).
//!
//! Digests are computed on demand after a download completes, reading the
//! file in fixed-size chunks so memory use stays bounded for large artifacts.

mod algorithm;

pub use algorithm::{HashAlgorithm, UnsupportedAlgorithm};

use anyhow::{Context, Result};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute the digest of a file with `algorithm` and return it as lowercase hex.
pub fn digest_path(path: &Path, algorithm: HashAlgorithm) -> Result<String> {
    match algorithm {
        HashAlgorithm::Md5 => digest_with::<Md5>(path),
        HashAlgorithm::Sha1 => digest_with::<Sha1>(path),
        HashAlgorithm::Sha256 => digest_with::<Sha256>(path),
        HashAlgorithm::Sha512 => digest_with::<Sha512>(path),
    }
}

fn digest_with<D: Digest>(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
