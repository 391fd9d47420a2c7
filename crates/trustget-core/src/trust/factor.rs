//! Named score contributors.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::str::FromStr;

use super::TrustConfigError;

/// Every factor the engine can apply. The name is the key used in weight overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FactorKind {
    Https,
    ChecksumAvailable,
    ChecksumVerified,
    GpgSigned,
    KnownDomain,
    MaintainerVerified,
    RepoAgeEstablished,
    ReleaseRecent,
    HttpRedirect,
    UnknownDomain,
    NoChecksum,
    RepoNew,
    Prerelease,
}

impl FactorKind {
    pub const ALL: [FactorKind; 13] = [
        FactorKind::Https,
        FactorKind::ChecksumAvailable,
        FactorKind::ChecksumVerified,
        FactorKind::GpgSigned,
        FactorKind::KnownDomain,
        FactorKind::MaintainerVerified,
        FactorKind::RepoAgeEstablished,
        FactorKind::ReleaseRecent,
        FactorKind::HttpRedirect,
        FactorKind::UnknownDomain,
        FactorKind::NoChecksum,
        FactorKind::RepoNew,
        FactorKind::Prerelease,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FactorKind::Https => "https",
            FactorKind::ChecksumAvailable => "checksum_available",
            FactorKind::ChecksumVerified => "checksum_verified",
            FactorKind::GpgSigned => "gpg_signed",
            FactorKind::KnownDomain => "known_domain",
            FactorKind::MaintainerVerified => "maintainer_verified",
            FactorKind::RepoAgeEstablished => "repo_age_established",
            FactorKind::ReleaseRecent => "release_recent",
            FactorKind::HttpRedirect => "http_redirect",
            FactorKind::UnknownDomain => "unknown_domain",
            FactorKind::NoChecksum => "no_checksum",
            FactorKind::RepoNew => "repo_new",
            FactorKind::Prerelease => "prerelease",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FactorKind::Https => "Secure HTTPS connection",
            FactorKind::ChecksumAvailable => "Checksum file available",
            FactorKind::ChecksumVerified => "Checksum verified successfully",
            FactorKind::GpgSigned => "GPG signature verified",
            FactorKind::KnownDomain => "Known/trusted domain",
            FactorKind::MaintainerVerified => "Release by repository maintainer",
            FactorKind::RepoAgeEstablished => "Repository age > 1 year",
            FactorKind::ReleaseRecent => "Release published < 30 days ago",
            FactorKind::HttpRedirect => "HTTP redirect to different domain",
            FactorKind::UnknownDomain => "Unknown domain",
            FactorKind::NoChecksum => "No checksum file found",
            FactorKind::RepoNew => "Repository < 3 months old",
            FactorKind::Prerelease => "Pre-release or draft version",
        }
    }

    pub fn default_weight(self) -> i32 {
        match self {
            FactorKind::Https => 20,
            FactorKind::ChecksumAvailable => 10,
            FactorKind::ChecksumVerified => 25,
            FactorKind::GpgSigned => 25,
            FactorKind::KnownDomain => 10,
            FactorKind::MaintainerVerified => 20,
            FactorKind::RepoAgeEstablished => 7,
            FactorKind::ReleaseRecent => 10,
            FactorKind::HttpRedirect => -10,
            FactorKind::UnknownDomain => -20,
            FactorKind::NoChecksum => -15,
            FactorKind::RepoNew => -20,
            FactorKind::Prerelease => -10,
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FactorKind {
    type Err = TrustConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| TrustConfigError::UnknownFactor(s.to_string()))
    }
}

/// One line of a trust report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustFactor {
    pub kind: FactorKind,
    pub description: String,
    pub weight: i32,
    pub applied: bool,
    pub reason: String,
}

impl TrustFactor {
    pub(crate) fn new(kind: FactorKind, weight: i32, applied: bool, reason: impl Into<String>) -> Self {
        Self {
            kind,
            description: kind.description().to_string(),
            weight,
            applied,
            reason: reason.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn points(&self) -> i32 {
        if self.applied {
            self.weight
        } else {
            0
        }
    }

    /// Weight with an explicit `+` for positive values.
    pub fn display_weight(&self) -> String {
        if self.weight > 0 {
            format!("+{}", self.weight)
        } else {
            self.weight.to_string()
        }
    }
}

impl Serialize for TrustFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TrustFactor", 6)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("weight", &self.weight)?;
        s.serialize_field("applied", &self.applied)?;
        s.serialize_field("reason", &self.reason)?;
        s.serialize_field("points", &self.points())?;
        s.end()
    }
}
