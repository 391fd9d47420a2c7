//! GitHub REST API response bodies (only the fields we read).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::{ReleaseAsset, ReleaseInfo, RepoInfo};

#[derive(Debug, Deserialize)]
pub(super) struct User {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Asset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct Release {
    pub tag_name: String,
    pub name: Option<String>,
    pub author: Option<User>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Repository {
    pub owner: User,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Release> for ReleaseInfo {
    fn from(r: Release) -> Self {
        let name = r
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| r.tag_name.clone());
        ReleaseInfo {
            tag_name: r.tag_name,
            name,
            author_login: r.author.map(|u| u.login),
            published_at: r.published_at,
            created_at: r.created_at,
            draft: r.draft,
            prerelease: r.prerelease,
            assets: r
                .assets
                .into_iter()
                .map(|a| ReleaseAsset {
                    name: a.name,
                    download_url: a.browser_download_url,
                    size: a.size,
                })
                .collect(),
        }
    }
}

impl From<Repository> for RepoInfo {
    fn from(r: Repository) -> Self {
        RepoInfo {
            owner_login: r.owner.login,
            name: r.name,
            created_at: r.created_at,
        }
    }
}
