//! `trustget verify` – check a local file's hash and, optionally, its signature.

use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;
use trustget_core::{TrustgetConfig, VerificationOutcome, Verifier};

use crate::cli::{exit, output};

#[derive(Debug)]
pub struct VerifyArgs {
    pub file: PathBuf,
    pub checksum: Option<String>,
    pub algorithm: Option<String>,
    pub checksum_file: Option<PathBuf>,
    pub url: Option<String>,
    pub gpg: bool,
    pub signature: Option<PathBuf>,
    pub json: bool,
}

impl VerifyArgs {
    fn wants_signature(&self) -> bool {
        self.gpg || self.signature.is_some()
    }
}

pub fn run_verify(cfg: &TrustgetConfig, args: &VerifyArgs) -> Result<i32> {
    let verifier = Verifier::from_config(cfg);
    let hash = verify_hash(&verifier, args);
    let signature = args
        .wants_signature()
        .then(|| verifier.verify_gpg(&args.file, args.signature.as_deref()));

    if args.json {
        output::print_json(&json!({ "checksum": hash, "signature": signature }))?;
    } else {
        print!("{}", output::render_outcome("checksum", &hash));
        if let Some(sig) = &signature {
            print!("{}", output::render_outcome("signature", sig));
        }
    }
    Ok(exit::for_outcomes(std::iter::once(&hash).chain(signature.as_ref())))
}

/// Explicit hash, then explicit checksum file, then automatic discovery.
fn verify_hash(verifier: &Verifier, args: &VerifyArgs) -> VerificationOutcome {
    let file = args.file.as_path();
    let algorithm = args.algorithm.as_deref();
    match (&args.checksum, &args.checksum_file) {
        (Some(checksum), _) if algorithm.is_some() => {
            let hash = checksum.split_whitespace().next().unwrap_or_default();
            verifier.verify_hash(file, hash, algorithm)
        }
        (Some(checksum), _) => verifier.verify_checksum_string(file, checksum),
        (None, Some(sums)) => verifier.verify_with_checksum_file(file, sums, algorithm),
        (None, None) => verifier.verify_auto(file, args.url.as_deref()),
    }
}
