use anyhow::Result;
use log::debug;

use crate::{
    github::{LatestRelease, resolve_version},
    platform::{self, PlatformSource},
    runtime::Runtime,
    selection::{Architecture, Choice, Linking, Selection, Variant, apply, enforce},
};

pub mod config;
mod download;
mod link;
mod options;

pub use download::{download, run_download};
pub use link::{link, render_link};
pub use options::{options, render_options};

use config::Config;

/// What the user asked for. Unset fields fall back to the detected defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    pub architecture: Option<Architecture>,
    pub variant: Option<Variant>,
    pub linking: Option<Linking>,
    pub version: Option<String>,
    pub platform: PlatformSource,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            architecture: None,
            variant: None,
            linking: None,
            version: None,
            platform: PlatformSource::Host,
        }
    }
}

impl SelectionRequest {
    /// Explicit choices in the order they are applied.
    pub fn changes(&self) -> Vec<Choice> {
        let mut changes = Vec::new();
        if let Some(a) = self.architecture {
            changes.push(Choice::Architecture(a));
        }
        if let Some(v) = self.variant {
            changes.push(Choice::Variant(v));
        }
        if let Some(l) = self.linking {
            changes.push(Choice::Linking(l));
        }
        changes
    }
}

/// Detects the platform, resolves the version and runs every requested
/// change through the rule table.
#[tracing::instrument(skip(config))]
pub async fn resolve_selection<R: Runtime, G: LatestRelease>(
    config: &Config<R, G>,
    request: &SelectionRequest,
) -> Result<Selection> {
    let architecture = match request.architecture {
        Some(a) => a,
        None => platform::detect(&config.runtime, &request.platform),
    };

    let version = resolve_version(&config.github, &config.repo, request.version.clone()).await?;

    let mut selection = enforce(Selection::defaults_for(architecture, version));
    for change in request.changes() {
        selection = apply(&selection, change);
        debug!("After {:?}: {:?}", change, selection);
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GitHubRepo, MockLatestRelease, Release};
    use crate::http::HttpClient;
    use crate::platform::ClientHints;
    use crate::runtime::MockRuntime;
    use reqwest::Client;

    pub(crate) fn test_config(
        runtime: MockRuntime,
        github: MockLatestRelease,
    ) -> Config<MockRuntime, MockLatestRelease> {
        Config {
            runtime,
            github,
            http: HttpClient::new(Client::new()),
            repo: GitHubRepo::libvips_windows(),
            download_prefix: crate::render::DOWNLOAD_PREFIX.to_string(),
        }
    }

    fn latest(tag: &'static str) -> MockLatestRelease {
        let mut github = MockLatestRelease::new();
        github.expect_latest_release().returning(move |_| {
            Ok(Release {
                tag_name: tag.to_string(),
            })
        });
        github
    }

    #[test]
    fn test_changes_order() {
        let request = SelectionRequest {
            architecture: Some(Architecture::Arm64),
            variant: Some(Variant::All),
            linking: Some(Linking::StaticFfi),
            ..Default::default()
        };

        assert_eq!(
            request.changes(),
            vec![
                Choice::Architecture(Architecture::Arm64),
                Choice::Variant(Variant::All),
                Choice::Linking(Linking::StaticFfi),
            ]
        );
        assert!(SelectionRequest::default().changes().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_selection_host_defaults() {
        let mut runtime = MockRuntime::new();
        runtime.expect_host_arch().returning(|| "x86_64");

        let config = test_config(runtime, latest("v8.15.0"));
        let selection = resolve_selection(&config, &SelectionRequest::default())
            .await
            .unwrap();

        assert_eq!(
            selection,
            Selection {
                architecture: Architecture::W64,
                variant: Variant::Web,
                linking: Linking::Shared,
                version: "8.15.0".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_selection_client_hints_arm() {
        let request = SelectionRequest {
            platform: PlatformSource::ClientHints(ClientHints {
                architecture: Some("arm".to_string()),
                bitness: Some("64".to_string()),
            }),
            version: Some("8.15.0".to_string()),
            ..Default::default()
        };

        let config = test_config(MockRuntime::new(), MockLatestRelease::new());
        let selection = resolve_selection(&config, &request).await.unwrap();

        assert_eq!(selection.architecture, Architecture::Arm64);
        assert_eq!(selection.linking, Linking::Static);
    }

    #[tokio::test]
    async fn test_resolve_selection_explicit_arch_skips_detection() {
        let request = SelectionRequest {
            architecture: Some(Architecture::W32),
            version: Some("8.15.0".to_string()),
            ..Default::default()
        };

        // No host_arch expectation: detection must not run
        let config = test_config(MockRuntime::new(), MockLatestRelease::new());
        let selection = resolve_selection(&config, &request).await.unwrap();

        assert_eq!(selection.architecture, Architecture::W32);
    }

    #[tokio::test]
    async fn test_resolve_selection_applies_rules() {
        let request = SelectionRequest {
            variant: Some(Variant::All),
            linking: Some(Linking::Static),
            version: Some("8.15.0".to_string()),
            platform: PlatformSource::UserAgent(
                "Mozilla/5.0 (Windows NT 10.0; ARM64) AppleWebKit/537.36".to_string(),
            ),
            ..Default::default()
        };

        let config = test_config(MockRuntime::new(), MockLatestRelease::new());
        let selection = resolve_selection(&config, &request).await.unwrap();

        assert_eq!(selection.architecture, Architecture::W64);
        assert_eq!(selection.variant, Variant::All);
        assert_eq!(selection.linking, Linking::Shared);
    }

    #[tokio::test]
    async fn test_resolve_selection_fetch_failure() {
        let mut runtime = MockRuntime::new();
        runtime.expect_host_arch().returning(|| "x86_64");

        let mut github = MockLatestRelease::new();
        github
            .expect_latest_release()
            .returning(|_| Err(anyhow::anyhow!("HTTP error! Status: 500")));

        let config = test_config(runtime, github);
        let result = resolve_selection(&config, &SelectionRequest::default()).await;

        assert!(result.is_err());
    }
}
