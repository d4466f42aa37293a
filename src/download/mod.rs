use crate::http::HttpClient;
use crate::render::DownloadTarget;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::{info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Sibling of `dest` that receives the body while the download is running.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Downloads the archive behind `target` to `dest`.
/// Returns the number of bytes written.
///
/// The body goes to [`partial_path`] first and is renamed to `dest` once the
/// whole stream has been written. On failure the partial file is removed.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn download_target<R: Runtime>(
    runtime: &R,
    target: &DownloadTarget,
    dest: &Path,
    http_client: &HttpClient,
) -> Result<u64> {
    info!("Downloading {} from {}...", target.title, target.href);

    let temp_path = partial_path(dest);
    let mut created = false;

    let result = http_client
        .download_file(&target.href, || {
            let writer = runtime
                .create_file(&temp_path)
                .with_context(|| format!("Failed to create {}", temp_path.display()))?;
            created = true;
            Ok(writer)
        })
        .await;

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(e) => {
            if created {
                if let Err(cleanup) = runtime.remove_file(&temp_path) {
                    warn!("Failed to clean up {}: {:#}", temp_path.display(), cleanup);
                }
            }
            return Err(e).with_context(|| format!("Failed to download {}", target.title));
        }
    };

    runtime.rename(&temp_path, dest)?;

    info!("Download complete.");
    Ok(bytes)
}
