//! Human-readable and JSON rendering of command results.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use trustget_core::release::{ReleaseInfo, RepoInfo};
use trustget_core::{ScanResult, TrustReport, VerificationOutcome};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn render_report(report: &TrustReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "URL:   {}", report.url);
    let _ = writeln!(out, "Trust: {}", report.summary());
    for f in report.factors.iter().filter(|f| f.applied) {
        let _ = writeln!(out, "  {:>4}  {:<22} {}", f.display_weight(), f.name(), f.reason);
    }
    out
}

pub fn render_outcome(label: &str, outcome: &VerificationOutcome) -> String {
    let mut out = format!("{label}: {} ({})\n", outcome.status, outcome.file.display());
    if let Some(algo) = outcome.algorithm {
        let _ = writeln!(out, "  algorithm: {algo}");
    }
    if let Some(expected) = &outcome.expected_hash {
        let _ = writeln!(out, "  expected:  {expected}");
    }
    if let Some(actual) = &outcome.actual_hash {
        let _ = writeln!(out, "  actual:    {actual}");
    }
    if let Some(source) = &outcome.provenance {
        let _ = writeln!(out, "  source:    {source}");
    }
    if let Some(key) = &outcome.signature_key_id {
        let _ = writeln!(out, "  key:       {key}");
    }
    if let Some(err) = &outcome.error {
        let _ = writeln!(out, "  error:     {err}");
    }
    out
}

pub fn render_scan(result: &ScanResult) -> String {
    let mut out = String::new();
    if result.is_empty() {
        let _ = writeln!(out, "No checksum sources found for {}", result.base);
    } else {
        let _ = writeln!(out, "Checksum sources for {}:", result.base);
    }
    for source in &result.sources {
        let _ = writeln!(
            out,
            "  [{}] {} ({} entries)",
            source.kind,
            source.origin,
            source.entries.len()
        );
        for entry in &source.entries {
            let _ = writeln!(
                out,
                "      {:<7} {}  {}",
                entry.algorithm_name(),
                entry.hash_value,
                entry.filename
            );
        }
    }
    for sig in &result.signature_origins {
        let _ = writeln!(out, "  [SIGNATURE] {sig}");
    }
    out
}

pub fn render_release(release: &ReleaseInfo, repo: &RepoInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Repository: {}/{}", repo.owner_login, repo.name);
    let _ = writeln!(out, "Release:    {} ({})", release.name, release.tag_name);
    if let Some(author) = &release.author_login {
        let _ = writeln!(out, "Author:     {author}");
    }
    match release.published_at {
        Some(at) => {
            let _ = writeln!(out, "Published:  {}", at.format("%Y-%m-%d"));
        }
        None => {
            let _ = writeln!(out, "Published:  (unpublished)");
        }
    }
    if release.prerelease || release.draft {
        let _ = writeln!(out, "Flags:      {}", if release.draft { "draft" } else { "prerelease" });
    }
    let _ = writeln!(out, "Assets:     {}", release.assets.len());
    for asset in &release.assets {
        let _ = writeln!(out, "  {} ({} bytes)", asset.name, asset.size);
    }
    out
}
