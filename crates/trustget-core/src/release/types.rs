//! Release and repository metadata as consumed by the trust engine.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    /// Release title; falls back to the tag when the API returns none.
    pub name: String,
    pub author_login: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub draft: bool,
    pub prerelease: bool,
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    /// Whole days since publication (creation for unpublished drafts).
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        let at = self.published_at.unwrap_or(self.created_at);
        (now - at).num_days()
    }

    /// True when the author's login equals `owner`, ignoring case.
    pub fn authored_by(&self, owner: &str) -> bool {
        self.author_login
            .as_deref()
            .is_some_and(|login| login.eq_ignore_ascii_case(owner))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoInfo {
    pub owner_login: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl RepoInfo {
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn release(published: Option<DateTime<Utc>>) -> ReleaseInfo {
        ReleaseInfo {
            tag_name: "v1".into(),
            name: "v1".into(),
            author_login: Some("Acme".into()),
            published_at: published,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            draft: false,
            prerelease: false,
            assets: Vec::new(),
        }
    }

    #[test]
    fn age_prefers_published_at() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let r = release(Some(now - Duration::days(3)));
        assert_eq!(r.age_days(now), 3);
        let draft = release(None);
        assert_eq!(draft.age_days(now), 60);
    }

    #[test]
    fn author_match_ignores_case() {
        let r = release(None);
        assert!(r.authored_by("acme"));
        assert!(!r.authored_by("someone-else"));
        let anonymous = ReleaseInfo { author_login: None, ..r };
        assert!(!anonymous.authored_by("acme"));
    }

    #[test]
    fn repo_age() {
        let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let repo = RepoInfo {
            owner_login: "acme".into(),
            name: "tool".into(),
            created_at: created,
        };
        assert_eq!(repo.age_days(created + Duration::days(400)), 400);
    }
}
