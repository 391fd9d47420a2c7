//! `trustget check` – verify a downloaded file, then score where it came from.
//!
//! The checksum and signature outcomes feed the trust analysis, so the score
//! reflects what was actually verified.

use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;
use trustget_core::{AnalysisInput, TrustEngine, TrustgetConfig, VerificationStatus, Verifier};

use crate::cli::{exit, output};

#[derive(Debug)]
pub struct CheckArgs {
    pub file: PathBuf,
    pub url: String,
    pub redirects: Vec<String>,
    pub json: bool,
    pub min_score: Option<u8>,
}

pub fn run_check(cfg: &TrustgetConfig, args: &CheckArgs) -> Result<i32> {
    let verifier = Verifier::from_config(cfg);
    let engine = TrustEngine::from_config(cfg)?;

    let checksum = verifier.verify_auto(&args.file, Some(&args.url));
    let signature = verifier.verify_gpg(&args.file, None);
    let input = AnalysisInput {
        checksum_verified: checksum.is_verified(),
        checksum_available: checksum.status == VerificationStatus::Mismatch,
        gpg_verified: signature.signature_verified,
        redirect_history: args.redirects.clone(),
    };
    let report = engine.analyze(&args.url, &input);

    if args.json {
        output::print_json(&json!({
            "checksum": checksum,
            "signature": signature,
            "trust": report,
        }))?;
    } else {
        print!("{}", output::render_outcome("checksum", &checksum));
        print!("{}", output::render_outcome("signature", &signature));
        print!("{}", output::render_report(&report));
    }

    let mismatched = [&checksum, &signature]
        .iter()
        .any(|o| o.status == VerificationStatus::Mismatch);
    if mismatched {
        return Ok(exit::MISMATCH);
    }
    Ok(exit::for_report(&report, args.min_score.or(cfg.trust.min_score)))
}
