use anyhow::Result;
use serde::Serialize;

use super::{SelectionRequest, config::Config, resolve_selection};
use crate::{
    github::LatestRelease,
    render::{OptionBoard, OptionState},
    runtime::Runtime,
    selection::Selection,
};

#[derive(Serialize)]
struct OptionsJson<'a> {
    selection: &'a Selection,
    options: &'a [OptionState],
}

/// Print which options are active and which are disabled
#[tracing::instrument(skip(runtime, api_url))]
pub async fn options<R: Runtime>(
    runtime: R,
    request: &SelectionRequest,
    api_url: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::new(runtime, api_url, None)?;
    print!("{}", render_options(&config, request, json).await?);
    Ok(())
}

pub async fn render_options<R: Runtime, G: LatestRelease>(
    config: &Config<R, G>,
    request: &SelectionRequest,
    json: bool,
) -> Result<String> {
    let selection = resolve_selection(config, request).await?;
    let board = OptionBoard::new(&selection);

    if json {
        let body = OptionsJson {
            selection: &selection,
            options: &board.options,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&body)?));
    }

    Ok(format!("version: {}\n{}", selection.version, board))
}
