//! `trustget info` – release metadata (for GitHub release assets) and trust report.

use anyhow::{Context, Result};
use serde_json::json;
use trustget_core::release::{ReleaseInfo, RepoInfo};
use trustget_core::{CurlFetcher, GithubClient, ReleaseMetadata, ReleaseUrl, TrustEngine, TrustgetConfig};

use crate::cli::{exit, output};

pub fn run_info(cfg: &TrustgetConfig, url: &str, json: bool) -> Result<i32> {
    let github = match ReleaseUrl::parse(url) {
        Some(release_url) => {
            let client = GithubClient::new(Box::new(CurlFetcher::new(&cfg.http)), &cfg.github);
            Some(lookup(&client, &release_url)?)
        }
        None => None,
    };
    let report = TrustEngine::from_config(cfg)?.analyze_minimal(url);

    if json {
        let github = github
            .as_ref()
            .map(|(release, repo)| json!({ "release": release, "repository": repo }));
        output::print_json(&json!({ "url": url, "github": github, "trust": report }))?;
    } else {
        if let Some((release, repo)) = &github {
            println!("{}", output::render_release(release, repo));
        }
        print!("{}", output::render_report(&report));
    }
    Ok(exit::OK)
}

fn lookup(client: &dyn ReleaseMetadata, url: &ReleaseUrl) -> Result<(ReleaseInfo, RepoInfo)> {
    let release = client
        .release(&url.owner, &url.repo, &url.tag)
        .with_context(|| format!("release lookup for {url}"))?;
    let repo = client
        .repository(&url.owner, &url.repo)
        .with_context(|| format!("repository lookup for {}/{}", url.owner, url.repo))?;
    Ok((release, repo))
}
