//! Catalog access through the start API
//!
//! A deep link such as `shows/67890` is posted to the start endpoint; the
//! resolved page document is handed to [`extract::extract_video`].

pub mod extract;

pub use extract::{extract_episodes, extract_video, is_show_id, parse_episode_number};

use crate::{ApiConfig, Error, Result, Video};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const HEADER_USER_TOKEN: &str = "x-hs-usertoken";
pub const HEADER_PLATFORM: &str = "X-HS-Platform";
pub const HEADER_COUNTRY_CODE: &str = "X-Country-Code";

/// Source of video details
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Resolve a deep-link identifier into a [`Video`]
    async fn fetch_video_details(&self, video_id: &str, user_token: &str) -> Result<Video>;
}

/// Body of a start request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartRequest {
    pub deeplink_url: String,
    pub app_launch_count: u32,
}

impl StartRequest {
    pub fn new(config: &ApiConfig, video_id: &str) -> Self {
        Self {
            deeplink_url: config.deeplink_path(video_id),
            app_launch_count: config.app_launch_count,
        }
    }
}

/// HTTP client for the start API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    config: ApiConfig,
}

impl CatalogClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    /// Use an existing reqwest client
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl VideoRepository for CatalogClient {
    #[instrument(skip(self, user_token))]
    async fn fetch_video_details(&self, video_id: &str, user_token: &str) -> Result<Video> {
        let request = StartRequest::new(&self.config, video_id);
        info!(deeplink = %request.deeplink_url, "Resolving deep link");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(HEADER_USER_TOKEN, user_token)
            .header(HEADER_PLATFORM, &self.config.platform)
            .header(HEADER_COUNTRY_CODE, &self.config.region)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Start response received");

        let is_show = is_show_id(video_id);
        let image_base_url = self.config.image_base_url.clone();

        // The page document can be large; walk it off the async workers.
        tokio::task::spawn_blocking(move || interpret_response(status, &body, is_show, &image_base_url))
            .await
            .map_err(|e| Error::Internal(format!("extraction task failed: {e}")))?
    }
}

/// Turn a start response into a [`Video`] or the matching error.
pub fn interpret_response(
    status: StatusCode,
    body: &str,
    is_show: bool,
    image_base_url: &str,
) -> Result<Video> {
    if status != StatusCode::OK {
        warn!(status = status.as_u16(), "Start request rejected");
        return Err(Error::Http {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let document: Value = serde_json::from_str(body)?;
    let success = document.get("success");
    let flag = |name: &str| success.and_then(|s| s.get(name)).and_then(Value::as_bool);

    if flag("is_deeplink_resolved") == Some(true) {
        let video = extract_video(&document, is_show, image_base_url)?;
        info!(
            title = video.title(),
            episodes = video.episodes().len(),
            "Video details extracted"
        );
        return Ok(video);
    }

    if flag("is_pre_launch") == Some(true) {
        warn!("Deep link landed on profile selection; token is stale");
        return Err(Error::TokenExpired);
    }

    Err(Error::UnreadableBody)
}
