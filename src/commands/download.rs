use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use super::{SelectionRequest, config::Config, resolve_selection};
use crate::{
    download::download_target, github::LatestRelease, render::DownloadTarget, runtime::Runtime,
};

/// Download the archive for the requested selection
#[tracing::instrument(skip(runtime, api_url, download_prefix))]
pub async fn download<R: Runtime>(
    runtime: R,
    request: &SelectionRequest,
    output: Option<PathBuf>,
    api_url: Option<String>,
    download_prefix: Option<String>,
) -> Result<()> {
    let config = Config::new(runtime, api_url, download_prefix)?;
    let (path, bytes) = run_download(&config, request, output).await?;
    println!("Saved {} ({} bytes)", path.display(), bytes);
    Ok(())
}

/// Returns where the archive was written and its size.
pub async fn run_download<R: Runtime, G: LatestRelease>(
    config: &Config<R, G>,
    request: &SelectionRequest,
    output: Option<PathBuf>,
) -> Result<(PathBuf, u64)> {
    let selection = resolve_selection(config, request).await?;
    let target = DownloadTarget::with_prefix(&selection, &config.download_prefix);

    let path = match output {
        Some(p) if config.runtime.is_dir(&p) => p.join(&target.title),
        Some(p) => p,
        None => Path::new(&target.title).to_path_buf(),
    };
    info!("Saving {} to {}", target.title, path.display());

    let bytes = download_target(&config.runtime, &target, &path, &config.http).await?;
    Ok((path, bytes))
}
