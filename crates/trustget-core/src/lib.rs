//! Download trust decisions: checksum discovery, verification and scoring.
//!
//! The three engines ([`Scanner`], [`Verifier`], [`TrustEngine`]) only talk to
//! their collaborators through traits ([`Fetcher`], [`ReleaseMetadata`],
//! [`SignatureVerifier`]); curl, the GitHub REST API and GnuPG back the
//! default implementations.

pub mod checksum;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod release;
pub mod scanner;
pub mod signature;
pub mod trust;
pub mod url_model;
pub mod verifier;

pub use checksum::HashAlgorithm;
pub use config::TrustgetConfig;
pub use fetch::{CurlFetcher, FetchError, FetchResponse, Fetcher};
pub use release::{GithubClient, ReleaseMetadata, ReleaseUrl};
pub use scanner::{ChecksumEntry, ChecksumKind, ChecksumSource, ScanResult, Scanner};
pub use signature::{GpgVerifier, SignatureCheck, SignatureVerifier};
pub use trust::{AnalysisInput, RiskLevel, TrustEngine, TrustReport};
pub use verifier::{BatchItem, BatchVerificationResult, VerificationOutcome, VerificationStatus, Verifier};
