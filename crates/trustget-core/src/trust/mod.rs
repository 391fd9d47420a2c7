//! Additive trust scoring.
//!
//! Each signal becomes a named [`TrustFactor`] carrying its weight and the
//! reason it was (or was not) applied, so every point of the final score can
//! be traced. The score is the sum of applied weights clamped to 0..=100.

mod domains;
mod factor;
mod report;
mod weights;

pub use domains::default_known_domains;
pub use factor::{FactorKind, TrustFactor};
pub use report::{risk_from_score, RiskLevel, TrustReport};
pub use weights::WeightTable;

use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;

use crate::config::{TrustPolicy, TrustgetConfig};
use crate::fetch::CurlFetcher;
use crate::release::{GithubClient, ReleaseMetadata, ReleaseUrl};
use crate::url_model::{hostname, is_https};

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrustConfigError {
    #[error("unknown trust factor: {0}")]
    UnknownFactor(String),
}

const REPO_ESTABLISHED_DAYS: i64 = 365;
const REPO_NEW_DAYS: i64 = 90;
const RELEASE_RECENT_DAYS: i64 = 30;

/// Verification signals known at analysis time.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub checksum_verified: bool,
    pub checksum_available: bool,
    pub gpg_verified: bool,
    /// URLs visited while following redirects, in order.
    pub redirect_history: Vec<String>,
}

pub struct TrustEngine {
    weights: WeightTable,
    known_domains: BTreeMap<String, u32>,
    releases: Option<Box<dyn ReleaseMetadata>>,
}

impl Default for TrustEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustEngine {
    /// Default weights and domain table, no release metadata lookup.
    pub fn new() -> Self {
        Self {
            weights: WeightTable::default(),
            known_domains: default_known_domains(),
            releases: None,
        }
    }

    pub fn with_weights(overrides: &BTreeMap<String, i32>) -> Result<Self, TrustConfigError> {
        let mut engine = Self::new();
        engine.weights.apply_overrides(overrides)?;
        Ok(engine)
    }

    pub fn with_release_metadata(mut self, releases: Box<dyn ReleaseMetadata>) -> Self {
        self.releases = Some(releases);
        self
    }

    /// Engine with the configured policy and a GitHub client on its own session.
    pub fn from_config(config: &TrustgetConfig) -> Result<Self, TrustConfigError> {
        let mut engine = Self::new();
        engine.import_policy(&config.trust)?;
        let github = GithubClient::new(Box::new(CurlFetcher::new(&config.http)), &config.github);
        Ok(engine.with_release_metadata(Box::new(github)))
    }

    /// Merges weight overrides and extra known domains into this engine.
    pub fn import_policy(&mut self, policy: &TrustPolicy) -> Result<(), TrustConfigError> {
        self.weights.apply_overrides(&policy.weights)?;
        for (domain, bonus) in &policy.known_domains {
            self.add_known_domain(domain, *bonus);
        }
        Ok(())
    }

    pub fn add_known_domain(&mut self, domain: &str, bonus: u32) {
        self.known_domains.insert(domain.trim().to_lowercase(), bonus);
    }

    pub fn remove_known_domain(&mut self, domain: &str) -> Option<u32> {
        self.known_domains.remove(&domain.trim().to_lowercase())
    }

    pub fn known_domains(&self) -> BTreeMap<String, u32> {
        self.known_domains.clone()
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    fn factor(&self, kind: FactorKind, applied: bool, reason: impl Into<String>) -> TrustFactor {
        TrustFactor::new(kind, self.weights.get(kind), applied, reason)
    }

    /// Pre-download analysis: no checksum, signature or redirect information.
    pub fn analyze_minimal(&self, url: &str) -> TrustReport {
        self.analyze(url, &AnalysisInput::default())
    }

    pub fn analyze(&self, url: &str, input: &AnalysisInput) -> TrustReport {
        let mut factors = Vec::new();
        let mut metadata = BTreeMap::new();

        let https = is_https(url);
        factors.push(self.factor(
            FactorKind::Https,
            https,
            if https { "HTTPS connection" } else { "HTTP (insecure)" },
        ));

        let host = hostname(url);
        let shown = host.as_deref().unwrap_or("<none>");
        match host.as_deref().filter(|h| self.known_domains.contains_key(*h)) {
            Some(h) => factors.push(self.factor(FactorKind::KnownDomain, true, format!("Trusted domain: {h}"))),
            None => factors.push(self.factor(
                FactorKind::UnknownDomain,
                true,
                format!("Unknown domain: {shown}"),
            )),
        }
        if let Some(h) = &host {
            metadata.insert("domain".to_string(), json!(h));
        }

        if input.checksum_verified {
            factors.push(self.factor(FactorKind::ChecksumVerified, true, "Checksum verified successfully"));
        } else if input.checksum_available {
            factors.push(self.factor(
                FactorKind::ChecksumAvailable,
                true,
                "Checksum file available (not yet verified)",
            ));
        } else {
            factors.push(self.factor(FactorKind::NoChecksum, true, "No checksum file found"));
        }

        if input.gpg_verified {
            factors.push(self.factor(FactorKind::GpgSigned, true, "GPG signature verified"));
        }

        if let Some(other) = input
            .redirect_history
            .iter()
            .map(|r| hostname(r))
            .find(|h| *h != host)
        {
            let target = other.as_deref().unwrap_or("<none>");
            factors.push(self.factor(
                FactorKind::HttpRedirect,
                true,
                format!("Redirect to different domain: {target}"),
            ));
        }

        if let Some(release_url) = ReleaseUrl::parse(url) {
            self.release_factors(&release_url, &mut factors, &mut metadata);
        }

        let report = TrustReport::new(url, factors, metadata);
        tracing::info!(url, score = report.score, risk = %report.risk, "trust analysis");
        report
    }

    fn release_factors(
        &self,
        release_url: &ReleaseUrl,
        factors: &mut Vec<TrustFactor>,
        metadata: &mut BTreeMap<String, serde_json::Value>,
    ) {
        let Some(lookup) = self.releases.as_deref() else {
            return;
        };
        let fetched = lookup
            .release(&release_url.owner, &release_url.repo, &release_url.tag)
            .and_then(|release| {
                lookup
                    .repository(&release_url.owner, &release_url.repo)
                    .map(|repo| (release, repo))
            });
        let (release, repo) = match fetched {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(release = %release_url, error = %e, "release metadata unavailable");
                metadata.insert("github_error".to_string(), json!(e.to_string()));
                return;
            }
        };

        let now = Utc::now();
        let repo_age = repo.age_days(now);
        let release_age = release.age_days(now);
        let is_maintainer = release.authored_by(&repo.owner_login);

        if is_maintainer {
            let author = release.author_login.as_deref().unwrap_or_default();
            factors.push(self.factor(
                FactorKind::MaintainerVerified,
                true,
                format!("Release by @{author} (repo owner)"),
            ));
        }
        if repo_age > REPO_ESTABLISHED_DAYS {
            factors.push(self.factor(
                FactorKind::RepoAgeEstablished,
                true,
                format!("Repository is {repo_age} days old"),
            ));
        } else if repo_age < REPO_NEW_DAYS {
            factors.push(self.factor(
                FactorKind::RepoNew,
                true,
                format!("Repository is only {repo_age} days old"),
            ));
        }
        if release_age < RELEASE_RECENT_DAYS {
            factors.push(self.factor(
                FactorKind::ReleaseRecent,
                true,
                format!("Release published {release_age} days ago"),
            ));
        }
        if release.prerelease || release.draft {
            factors.push(self.factor(FactorKind::Prerelease, true, "This is a pre-release or draft version"));
        }

        metadata.insert(
            "github".to_string(),
            json!({
                "owner": release_url.owner,
                "repo": release_url.repo,
                "tag": release_url.tag,
                "release_name": release.name,
                "published_at": release.published_at,
                "repo_age_days": repo_age,
                "release_age_days": release_age,
                "is_maintainer": is_maintainer,
            }),
        );
    }
}
