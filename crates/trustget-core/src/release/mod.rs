//! Release-hosting metadata: URL recognition and the lookup capability.
//!
//! Only GitHub releases are recognised. [`GithubClient`] is the default
//! [`ReleaseMetadata`] implementation over any [`Fetcher`](crate::fetch::Fetcher).

mod client;
mod types;
mod url;
mod wire;

pub use client::GithubClient;
pub use types::{ReleaseAsset, ReleaseInfo, RepoInfo};
pub use self::url::ReleaseUrl;

use crate::fetch::FetchError;

/// Why a metadata lookup produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("release lookup failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("GitHub API rate limit exceeded; set a token for higher limits")]
    RateLimited,
    #[error("GitHub API error: {0}")]
    Status(u32),
    #[error("unexpected GitHub API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API base URL: {0}")]
    InvalidBase(String),
}

/// Blocking lookup of release and repository metadata.
pub trait ReleaseMetadata {
    fn release(&self, owner: &str, repo: &str, tag: &str) -> Result<ReleaseInfo, ReleaseError>;
    fn repository(&self, owner: &str, repo: &str) -> Result<RepoInfo, ReleaseError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned metadata for scanner and trust engine tests.

    use super::*;

    pub(crate) struct StubReleases {
        pub(crate) release: Result<ReleaseInfo, u32>,
        pub(crate) repo: Result<RepoInfo, u32>,
    }

    impl StubReleases {
        pub(crate) fn new(release: ReleaseInfo, repo: RepoInfo) -> Self {
            Self {
                release: Ok(release),
                repo: Ok(repo),
            }
        }

        pub(crate) fn failing(status: u32) -> Self {
            Self {
                release: Err(status),
                repo: Err(status),
            }
        }
    }

    impl ReleaseMetadata for StubReleases {
        fn release(&self, _owner: &str, _repo: &str, _tag: &str) -> Result<ReleaseInfo, ReleaseError> {
            self.release.clone().map_err(ReleaseError::Status)
        }

        fn repository(&self, _owner: &str, _repo: &str) -> Result<RepoInfo, ReleaseError> {
            self.repo.clone().map_err(ReleaseError::Status)
        }
    }
}
