//! `trustget trust` – score a URL before downloading.

use anyhow::Result;
use trustget_core::{TrustEngine, TrustgetConfig};

use crate::cli::{exit, output};

pub fn run_trust(cfg: &TrustgetConfig, url: &str, json: bool, min_score: Option<u8>) -> Result<i32> {
    let engine = TrustEngine::from_config(cfg)?;
    let report = engine.analyze_minimal(url);
    let min_score = min_score.or(cfg.trust.min_score);

    if json {
        output::print_json(&report)?;
    } else {
        print!("{}", output::render_report(&report));
        if let Some(min) = min_score.filter(|m| report.score < *m) {
            eprintln!("trust score {} is below minimum {}", report.score, min);
        }
    }
    Ok(exit::for_report(&report, min_score))
}
