//! Tests for verify.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_verify_auto() {
    match parse(&["trustget", "verify", "a.iso"]) {
        CliCommand::Verify {
            file,
            checksum,
            algorithm,
            checksum_file,
            url,
            gpg,
            signature,
            json,
        } => {
            assert_eq!(file, PathBuf::from("a.iso"));
            assert!(checksum.is_none());
            assert!(algorithm.is_none());
            assert!(checksum_file.is_none());
            assert!(url.is_none());
            assert!(!gpg);
            assert!(signature.is_none());
            assert!(!json);
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_verify_explicit_hash() {
    match parse(&["trustget", "verify", "a.iso", "--checksum", "abc123", "-a", "sha256"]) {
        CliCommand::Verify {
            checksum, algorithm, ..
        } => {
            assert_eq!(checksum.as_deref(), Some("abc123"));
            assert_eq!(algorithm.as_deref(), Some("sha256"));
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_verify_checksum_file_and_url() {
    match parse(&[
        "trustget",
        "verify",
        "a.iso",
        "--checksum-file",
        "SHA256SUMS",
        "--url",
        "https://example.com/a.iso",
    ]) {
        CliCommand::Verify {
            checksum_file, url, ..
        } => {
            assert_eq!(checksum_file, Some(PathBuf::from("SHA256SUMS")));
            assert_eq!(url.as_deref(), Some("https://example.com/a.iso"));
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_verify_signature() {
    match parse(&["trustget", "verify", "a.iso", "--signature", "a.iso.asc", "--json"]) {
        CliCommand::Verify {
            gpg, signature, json, ..
        } => {
            assert!(!gpg);
            assert_eq!(signature, Some(PathBuf::from("a.iso.asc")));
            assert!(json);
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_verify_checksum_conflicts_with_file() {
    let r = Cli::try_parse_from([
        "trustget",
        "verify",
        "a.iso",
        "--checksum",
        "abc",
        "--checksum-file",
        "SHA256SUMS",
    ]);
    assert!(r.is_err());
}
