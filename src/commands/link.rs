use anyhow::Result;
use serde::Serialize;

use super::{SelectionRequest, config::Config, resolve_selection};
use crate::{
    github::LatestRelease,
    render::DownloadTarget,
    runtime::Runtime,
    selection::Selection,
};

#[derive(Serialize)]
struct LinkJson<'a> {
    #[serde(flatten)]
    selection: &'a Selection,
    title: &'a str,
    href: &'a str,
}

/// Print the download filename and URL for the requested selection
#[tracing::instrument(skip(runtime, api_url, download_prefix))]
pub async fn link<R: Runtime>(
    runtime: R,
    request: &SelectionRequest,
    api_url: Option<String>,
    download_prefix: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::new(runtime, api_url, download_prefix)?;
    print!("{}", render_link(&config, request, json).await?);
    Ok(())
}

pub async fn render_link<R: Runtime, G: LatestRelease>(
    config: &Config<R, G>,
    request: &SelectionRequest,
    json: bool,
) -> Result<String> {
    let selection = resolve_selection(config, request).await?;
    let target = DownloadTarget::with_prefix(&selection, &config.download_prefix);

    if json {
        let body = LinkJson {
            selection: &selection,
            title: &target.title,
            href: &target.href,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&body)?));
    }

    Ok(format!("{}\n{}\n", target.title, target.href))
}
