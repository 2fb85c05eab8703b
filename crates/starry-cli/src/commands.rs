//! CLI command implementations

use crate::output::render_video;
use anyhow::Context;
use starry_core::catalog::{extract_video, is_show_id};
use starry_core::config::{ENV_API_ENDPOINT, ENV_REGION};
use starry_core::{ApiConfig, CatalogClient, Error, VideoRepository};
use std::path::Path;
use tracing::warn;

/// Defaults, then the environment, then command-line flags; validated once at the end
pub fn api_config(
    endpoint: Option<String>,
    region: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> starry_core::Result<ApiConfig> {
    let config = ApiConfig::default().with_overrides(|key| match key {
        ENV_API_ENDPOINT => endpoint.clone().or_else(|| env(key)),
        ENV_REGION => region.clone().or_else(|| env(key)),
        _ => env(key),
    })?;
    config.validate()?;
    Ok(config)
}

/// Series mode when forced, or when the file name mentions shows
fn is_show_file(file: &Path, show: bool) -> bool {
    show || file
        .file_name()
        .is_some_and(|name| is_show_id(&name.to_string_lossy()))
}

/// Resolve a deep link and print the details
pub async fn details(config: ApiConfig, id: &str, token: &str, format: &str) -> anyhow::Result<()> {
    let client = CatalogClient::new(config)?;

    let video = match client.fetch_video_details(id, token).await {
        Ok(video) => video,
        Err(Error::TokenExpired) => {
            warn!("Session token is stale; sign in again and pass the new token");
            return Err(Error::TokenExpired.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", render_video(&video, format));
    Ok(())
}

/// Extract details from a saved response document
pub fn inspect(config: &ApiConfig, file: &Path, show: bool, format: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not JSON", file.display()))?;

    let is_show = is_show_file(file, show);
    let video = extract_video(&document, is_show, &config.image_base_url)?;

    println!("{}", render_video(&video, format));
    Ok(())
}
