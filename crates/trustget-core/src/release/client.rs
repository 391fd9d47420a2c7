//! GitHub REST client over an injected [`Fetcher`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use url::Url;

use super::{wire, ReleaseError, ReleaseInfo, ReleaseMetadata, RepoInfo};
use crate::config::GithubConfig;
use crate::fetch::Fetcher;

const API_VERSION: &str = "2022-11-28";

pub struct GithubClient {
    fetcher: Box<dyn Fetcher>,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    /// Builds a client; the token is read from `config.token_env` if set and non-empty.
    pub fn new(fetcher: Box<dyn Fetcher>, config: &GithubConfig) -> Self {
        let token = config
            .token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|t| !t.trim().is_empty());
        Self {
            fetcher,
            api_base: config.api_base.clone(),
            token,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<String, ReleaseError> {
        let mut url =
            Url::parse(&self.api_base).map_err(|_| ReleaseError::InvalidBase(self.api_base.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ReleaseError::InvalidBase(self.api_base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn request<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ReleaseError> {
        let url = self.endpoint(segments)?;
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/vnd.github+json".to_string());
        headers.insert("X-GitHub-Api-Version".to_string(), API_VERSION.to_string());
        if let Some(token) = &self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let resp = self.fetcher.get(&url, &headers)?;
        if resp.status == 403 && resp.header("X-RateLimit-Remaining").map(str::trim) == Some("0") {
            return Err(ReleaseError::RateLimited);
        }
        if !resp.is_success() {
            return Err(ReleaseError::Status(resp.status));
        }
        Ok(serde_json::from_slice(&resp.body)?)
    }
}

impl ReleaseMetadata for GithubClient {
    fn release(&self, owner: &str, repo: &str, tag: &str) -> Result<ReleaseInfo, ReleaseError> {
        tracing::debug!(owner, repo, tag, "fetching release metadata");
        let raw: wire::Release = self.request(&["repos", owner, repo, "releases", "tags", tag])?;
        Ok(raw.into())
    }

    fn repository(&self, owner: &str, repo: &str) -> Result<RepoInfo, ReleaseError> {
        tracing::debug!(owner, repo, "fetching repository metadata");
        let raw: wire::Repository = self.request(&["repos", owner, repo])?;
        Ok(raw.into())
    }
}
