//! Checksum discovery.
//!
//! [`Scanner::scan`] tries three strategies in order and returns the first
//! that yields any source:
//!
//! 1. inline probe: `<target>.sha256`, then `<target>.sha512`;
//! 2. release assets, when the target is a GitHub release download;
//! 3. the HTML listing of the target's parent directory.
//!
//! Every failure inside a strategy is an internal [`ScanError`], logged at
//! debug level and collapsed into "nothing found". A scan never fails.

mod classify;
mod grammar;
mod listing;
mod types;

pub use classify::{classify, should_skip};
pub use grammar::parse;
pub use types::{ChecksumEntry, ChecksumKind, ChecksumSource, ScanResult};

use std::collections::HashMap;

use crate::config::TrustgetConfig;
use crate::fetch::{CurlFetcher, FetchError, FetchResponse, Fetcher};
use crate::release::{GithubClient, ReleaseError, ReleaseMetadata, ReleaseUrl};
use crate::url_model::{filename_from_url_path, join_link, parent_directory};

const INLINE_PROBES: [(&str, ChecksumKind); 2] = [
    (".sha256", ChecksumKind::Sha256),
    (".sha512", ChecksumKind::Sha512),
];

/// Why a single strategy produced nothing.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ScanError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("HTTP {0}")]
    Status(u32),
    #[error("not a directory listing (content-type {0:?})")]
    NotListing(Option<String>),
    #[error(transparent)]
    Release(#[from] ReleaseError),
    #[error("no release metadata lookup configured")]
    NoReleaseLookup,
    #[error("cannot derive parent directory")]
    NoParent,
    #[error("no checksum sources")]
    Empty,
}

/// Sources a strategy found, before the audit trail is attached.
struct Discovered {
    base: String,
    sources: Vec<ChecksumSource>,
    signatures: Vec<String>,
}

impl Discovered {
    fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            sources: Vec::new(),
            signatures: Vec::new(),
        }
    }

    fn non_empty(self) -> Result<Self, ScanError> {
        if self.sources.is_empty() && self.signatures.is_empty() {
            Err(ScanError::Empty)
        } else {
            Ok(self)
        }
    }
}

/// Fetch wrapper that records every requested URL.
struct Probe<'a> {
    fetcher: &'a dyn Fetcher,
    visited: Vec<String>,
}

impl<'a> Probe<'a> {
    fn get(&mut self, url: &str) -> Result<FetchResponse, ScanError> {
        self.visited.push(url.to_string());
        let resp = self.fetcher.get(url, &HashMap::new())?;
        if !resp.is_success() {
            return Err(ScanError::Status(resp.status));
        }
        Ok(resp)
    }

    /// Fetches and parses a checksum file into a source.
    fn source(&mut self, url: &str, filename: &str, kind: ChecksumKind) -> Result<ChecksumSource, ScanError> {
        let content = self.get(url)?.text();
        let entries = parse(&content);
        tracing::debug!(url, entries = entries.len(), %kind, "parsed checksum source");
        Ok(ChecksumSource {
            origin: url.to_string(),
            filename: filename.to_string(),
            kind,
            raw_content: content,
            entries,
        })
    }
}

/// Checksum discovery over an owned HTTP session.
pub struct Scanner {
    fetcher: Box<dyn Fetcher>,
    releases: Option<Box<dyn ReleaseMetadata>>,
}

impl Scanner {
    /// Scanner without release lookup; release URLs fall through to the listing scan.
    pub fn new(fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            releases: None,
        }
    }

    pub fn with_release_metadata(mut self, releases: Box<dyn ReleaseMetadata>) -> Self {
        self.releases = Some(releases);
        self
    }

    /// Curl transport plus a GitHub client on its own session.
    pub fn from_config(config: &TrustgetConfig) -> Self {
        let github = GithubClient::new(Box::new(CurlFetcher::new(&config.http)), &config.github);
        Self::new(Box::new(CurlFetcher::new(&config.http))).with_release_metadata(Box::new(github))
    }

    /// Discovers checksum sources for `target`.
    ///
    /// `hint_filename` names the file when `target` is a directory URL
    /// (ending in `/`); it is then used for the inline probe.
    pub fn scan(&self, target: &str, hint_filename: Option<&str>) -> ScanResult {
        let mut probe = Probe {
            fetcher: self.fetcher.as_ref(),
            visited: Vec::new(),
        };

        let inline_target = match hint_filename {
            Some(hint) if target.ends_with('/') && !hint.is_empty() => format!("{target}{hint}"),
            _ => target.to_string(),
        };

        let found = self
            .inline_probe(&mut probe, &inline_target)
            .or_else(|e| {
                tracing::debug!(target, error = %e, "inline probe found nothing");
                self.release_scan(&mut probe, target)
            })
            .or_else(|e| {
                tracing::debug!(target, error = %e, "release scan found nothing");
                self.directory_scan(&mut probe, target)
            });

        match found {
            Ok(d) => {
                tracing::info!(
                    target,
                    base = %d.base,
                    sources = d.sources.len(),
                    signatures = d.signatures.len(),
                    "checksum sources discovered"
                );
                ScanResult {
                    base: d.base,
                    sources: d.sources,
                    signature_origins: d.signatures,
                    probed_origins: probe.visited,
                }
            }
            Err(e) => {
                tracing::debug!(target, error = %e, "directory scan found nothing");
                ScanResult {
                    probed_origins: probe.visited,
                    ..ScanResult::empty(target)
                }
            }
        }
    }

    /// `scan` followed by priority resolution for `filename`.
    pub fn scan_for_file(&self, url: &str, filename: &str) -> Option<ChecksumEntry> {
        self.scan(url, Some(filename)).get_checksum_for(filename).cloned()
    }

    fn inline_probe(&self, probe: &mut Probe<'_>, target: &str) -> Result<Discovered, ScanError> {
        let mut last = ScanError::Empty;
        for (suffix, kind) in INLINE_PROBES {
            let url = format!("{target}{suffix}");
            let filename = filename_from_url_path(&url).unwrap_or_else(|| url.clone());
            match probe.source(&url, &filename, kind) {
                Ok(source) if !source.entries.is_empty() => {
                    let mut found = Discovered::new(url);
                    found.sources.push(source);
                    return Ok(found);
                }
                Ok(_) => last = ScanError::Empty,
                Err(e) => last = e,
            }
        }
        Err(last)
    }

    fn release_scan(&self, probe: &mut Probe<'_>, target: &str) -> Result<Discovered, ScanError> {
        let Some(release_url) = ReleaseUrl::parse(target) else {
            return Err(ScanError::Empty);
        };
        let releases = self.releases.as_deref().ok_or(ScanError::NoReleaseLookup)?;
        let release = releases.release(&release_url.owner, &release_url.repo, &release_url.tag)?;

        let mut found = Discovered::new(release_url.releases_page());
        for asset in &release.assets {
            if should_skip(&asset.name) {
                continue;
            }
            match classify(&asset.name) {
                None => {}
                Some(ChecksumKind::Signature) => found.signatures.push(asset.download_url.clone()),
                Some(kind) => match probe.source(&asset.download_url, &asset.name, kind) {
                    Ok(source) => found.sources.push(source),
                    Err(e) => tracing::debug!(asset = %asset.name, error = %e, "release asset skipped"),
                },
            }
        }
        found.non_empty()
    }

    fn directory_scan(&self, probe: &mut Probe<'_>, target: &str) -> Result<Discovered, ScanError> {
        let dir = parent_directory(target).ok_or(ScanError::NoParent)?;
        let resp = probe.get(&dir)?;
        let content_type = resp.header("Content-Type");
        if !listing::is_html(content_type) {
            return Err(ScanError::NotListing(content_type.map(str::to_string)));
        }

        let mut found = Discovered::new(dir.clone());
        for link in listing::extract_links(&resp.text()) {
            let Some((url, filename)) = join_link(&dir, &link) else {
                continue;
            };
            if should_skip(&filename) {
                continue;
            }
            match classify(&filename) {
                None => {}
                Some(ChecksumKind::Signature) => found.signatures.push(url),
                Some(kind) => match probe.source(&url, &filename, kind) {
                    Ok(source) => found.sources.push(source),
                    Err(e) => tracing::debug!(%url, error = %e, "listed checksum file skipped"),
                },
            }
        }
        found.non_empty()
    }
}
