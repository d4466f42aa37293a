use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    github::{GitHub, GitHubRepo, LatestRelease},
    http::HttpClient,
    render::DOWNLOAD_PREFIX,
    runtime::Runtime,
};

pub struct Config<R: Runtime, G: LatestRelease> {
    pub runtime: R,
    pub github: G,
    pub http: HttpClient,
    pub repo: GitHubRepo,
    /// Release-asset prefix the version and filename are appended to.
    pub download_prefix: String,
}

impl<R: Runtime> Config<R, GitHub> {
    pub fn new(
        runtime: R,
        api_url: Option<String>,
        download_prefix: Option<String>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
        }

        let client = Client::builder()
            .user_agent(concat!("vips-dl/", env!("VIPS_DL_VERSION")))
            .default_headers(headers)
            .build()?;

        let http = HttpClient::new(client);
        let github = GitHub::new(http.clone(), api_url);

        Ok(Self {
            runtime,
            github,
            http,
            repo: GitHubRepo::libvips_windows(),
            download_prefix: download_prefix.unwrap_or_else(|| DOWNLOAD_PREFIX.to_string()),
        })
    }
}

/// Keeps the first 8 and last 4 characters of long tokens, hides short ones.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }

    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
