use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;

use super::types::{GitHubRepo, Release};
use crate::http::HttpClient;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LatestRelease: Send + Sync {
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Release>;
    fn api_url(&self) -> &str;
}

pub struct GitHub {
    pub client: HttpClient,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { client, api_url }
    }

    pub fn latest_release_url(&self, repo: &GitHubRepo) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        )
    }
}

#[async_trait]
impl LatestRelease for GitHub {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Release> {
        let url = self.latest_release_url(repo);
        debug!("Fetching latest release from {}...", url);

        self.client
            .get_json::<Release>(&url)
            .await
            .with_context(|| format!("Failed to fetch the latest release of {}", repo))
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Returns `version` when given, otherwise the version of the latest release.
#[tracing::instrument(skip(github))]
pub async fn resolve_version<G: LatestRelease>(
    github: &G,
    repo: &GitHubRepo,
    version: Option<String>,
) -> Result<String> {
    match version {
        Some(v) => {
            let trimmed = v.trim();
            let v = trimmed.strip_prefix('v').unwrap_or(trimmed);
            if v.is_empty() {
                bail!(
                    "Invalid --version {:?}: expected a libvips version such as 8.15.0",
                    trimmed
                );
            }
            debug!("Using supplied version {}", v);
            Ok(v.to_string())
        }
        None => {
            let release = github.latest_release(repo).await?;
            debug!("Latest release of {} is {}", repo, release.tag_name);
            Ok(release.version().to_string())
        }
    }
}
