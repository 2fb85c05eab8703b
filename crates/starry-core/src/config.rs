//! Configuration for the catalog client and the playback adapter

use crate::{DrmSystem, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

pub const ENV_API_ENDPOINT: &str = "STARRY_API_ENDPOINT";
pub const ENV_IMAGE_BASE_URL: &str = "STARRY_IMAGE_BASE_URL";
pub const ENV_PLATFORM: &str = "STARRY_PLATFORM";
pub const ENV_REGION: &str = "STARRY_REGION";
pub const ENV_TIMEOUT_MS: &str = "STARRY_TIMEOUT_MS";
pub const ENV_USER_AGENT: &str = "STARRY_USER_AGENT";

/// Start API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Deep-link resolution endpoint
    pub endpoint: String,
    /// CDN prefix for image sources
    pub image_base_url: String,
    /// Value of the platform header
    pub platform: String,
    /// Region used in the deep link path and the country header
    pub region: String,
    /// Launch counter reported in the request body
    pub app_launch_count: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.hotstar.com/api/internal/bff/v2/start".to_string(),
            image_base_url: "https://img1.hotstarext.com/image/upload/f_auto/".to_string(),
            platform: "web".to_string(),
            region: "in".to_string(),
            app_launch_count: 10,
            request_timeout_ms: 30_000,
        }
    }
}

impl ApiConfig {
    /// Defaults overlaid with `STARRY_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self::default().with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from a key lookup. The result is not validated.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(endpoint) = lookup(ENV_API_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(base) = lookup(ENV_IMAGE_BASE_URL) {
            self.image_base_url = base;
        }
        if let Some(platform) = lookup(ENV_PLATFORM) {
            self.platform = platform;
        }
        if let Some(region) = lookup(ENV_REGION) {
            self.region = region;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.request_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("{ENV_TIMEOUT_MS}={timeout}")))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.endpoint)
            .map_err(|e| Error::InvalidConfig(format!("endpoint {}: {e}", self.endpoint)))?;
        if self.region.is_empty() {
            return Err(Error::InvalidConfig("region must not be empty".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig("request timeout must be positive".into()));
        }
        Ok(())
    }

    /// Deep link path for a content identifier
    pub fn deeplink_path(&self, video_id: &str) -> String {
        format!("/{}/{}", self.region, video_id)
    }
}

/// Playback adapter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// User agent for manifest, segment and license requests
    pub user_agent: String,
    /// Key system requested from the engine
    pub key_system: DrmSystem,
    /// Start playback as soon as the engine is ready
    pub autoplay: bool,
    /// Extra headers sent with license requests
    pub license_headers: HashMap<String, String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("DRMVideoPlayer/{}", crate::VERSION),
            key_system: DrmSystem::Widevine,
            autoplay: true,
            license_headers: HashMap::new(),
        }
    }
}

impl PlayerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(agent) = std::env::var(ENV_USER_AGENT) {
            config.user_agent = agent;
        }
        config
    }

    /// Add a custom header for license requests
    pub fn with_license_header(mut self, key: &str, value: &str) -> Self {
        self.license_headers.insert(key.to_string(), value.to_string());
        self
    }
}
