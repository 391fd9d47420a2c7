//! Recognition of release download URLs.

use std::fmt;

/// Components of `https://github.com/<owner>/<repo>/releases/download/<tag>/<file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseUrl {
    pub owner: String,
    pub repo: String,
    pub tag: String,
    /// Asset path after the tag; may itself contain `/`.
    pub asset: String,
}

impl ReleaseUrl {
    /// Returns `None` unless `url` is an http(s) GitHub release download URL.
    pub fn parse(url: &str) -> Option<Self> {
        let parsed = ::url::Url::parse(url).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        if parsed.host_str()? != "github.com" {
            return None;
        }
        let mut segments = parsed.path().trim_start_matches('/').splitn(6, '/');
        let owner = segments.next().filter(|s| !s.is_empty())?;
        let repo = segments.next().filter(|s| !s.is_empty())?;
        if segments.next()? != "releases" || segments.next()? != "download" {
            return None;
        }
        let tag = segments.next().filter(|s| !s.is_empty())?;
        let asset = segments.next().filter(|s| !s.is_empty())?;
        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            tag: tag.to_string(),
            asset: asset.to_string(),
        })
    }

    /// `https://github.com/<owner>/<repo>/releases`, used as the scan base.
    pub fn releases_page(&self) -> String {
        format!("https://github.com/{}/{}/releases", self.owner, self.repo)
    }
}

impl fmt::Display for ReleaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.tag)
    }
}
