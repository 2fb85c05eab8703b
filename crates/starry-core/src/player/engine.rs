//! Native engine boundary
//!
//! The engine owns DASH parsing, segment scheduling, the license exchange and
//! adaptive selection. This module only describes what the controller needs
//! from it: lifecycle calls, the current track set, track-selection
//! parameters and a listener for its events.

use crate::{DrmSystem, Error, PlayerConfig, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use url::Url;
use uuid::Uuid;

/// Engine playback-state codes
pub const STATE_IDLE: i32 = 1;
pub const STATE_BUFFERING: i32 = 2;
pub const STATE_READY: i32 = 3;
pub const STATE_ENDED: i32 = 4;

/// Media component carried by a track group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackType {
    Video,
    Audio,
    Text,
    Other,
}

/// Encoding of a single track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    pub width: i32,
    pub height: i32,
    /// Peak bitrate in bits per second
    pub bitrate: i32,
}

impl Format {
    pub fn new(width: i32, height: i32, bitrate: i32) -> Self {
        Self { width, height, bitrate }
    }
}

/// Alternative encodings of one media component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup {
    pub id: String,
    pub track_type: TrackType,
    pub formats: Vec<Format>,
}

impl TrackGroup {
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Track groups currently exposed by the engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tracks {
    pub groups: Vec<TrackGroup>,
}

impl Tracks {
    pub fn new(groups: Vec<TrackGroup>) -> Self {
        Self { groups }
    }

    /// First group of the given type, in engine order
    pub fn first_of_type(&self, track_type: TrackType) -> Option<&TrackGroup> {
        self.groups.iter().find(|g| g.track_type == track_type)
    }
}

/// Pins a track group to specific tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSelectionOverride {
    pub group_id: String,
    pub track_type: TrackType,
    pub track_indices: Vec<usize>,
}

/// Manual overrides layered over the engine's adaptive selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackSelectionParameters {
    overrides: HashMap<TrackType, TrackSelectionOverride>,
}

impl TrackSelectionParameters {
    pub fn clear_overrides_of_type(mut self, track_type: TrackType) -> Self {
        self.overrides.remove(&track_type);
        self
    }

    /// Replace any override for the override's track type
    pub fn set_override_for_type(mut self, track_override: TrackSelectionOverride) -> Self {
        self.overrides.insert(track_override.track_type, track_override);
        self
    }

    pub fn override_for(&self, track_type: TrackType) -> Option<&TrackSelectionOverride> {
        self.overrides.get(&track_type)
    }
}

/// License server settings for the engine's DRM session manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseConfig {
    pub key_system: DrmSystem,
    /// Protection system ID of `key_system`
    pub system_id: Uuid,
    pub license_url: Url,
    pub headers: HashMap<String, String>,
}

/// How protected content will be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrmProvision {
    Licensed(LicenseConfig),
    /// Protected streams will fail inside the engine
    Unsupported,
}

impl DrmProvision {
    /// License acquisition against `license_server_uri`.
    ///
    /// An unusable URI does not abort player construction; the engine then
    /// reports the failure when it meets protected content.
    pub fn for_license_server(license_server_uri: &str, config: &PlayerConfig) -> Self {
        match Url::parse(license_server_uri) {
            Ok(license_url) => DrmProvision::Licensed(LicenseConfig {
                key_system: config.key_system,
                system_id: config.key_system.system_id(),
                license_url,
                headers: config.license_headers.clone(),
            }),
            Err(e) => {
                warn!(uri = license_server_uri, error = %e, "Cannot create DRM session manager");
                DrmProvision::Unsupported
            }
        }
    }
}

/// DASH source handed to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashMediaSource {
    pub manifest_uri: Url,
    pub user_agent: String,
    pub drm: DrmProvision,
}

impl DashMediaSource {
    pub fn new(manifest_uri: &str, user_agent: &str, drm: DrmProvision) -> Result<Self> {
        let manifest_uri = Url::parse(manifest_uri)
            .map_err(|e| Error::PlayerConstruction(format!("invalid manifest URI {manifest_uri}: {e}")))?;
        Ok(Self {
            manifest_uri,
            user_agent: user_agent.to_string(),
            drm,
        })
    }
}

/// Receives engine events, possibly on an engine thread
pub trait EngineListener: Send + Sync {
    fn on_playback_state_changed(&self, state: i32);

    fn on_tracks_changed(&self, tracks: &Tracks);

    fn on_player_error(&self, message: Option<&str>);
}

/// A native DASH + DRM player instance
pub trait PlaybackEngine: Send + Sync {
    fn add_listener(&self, listener: Arc<dyn EngineListener>);

    fn set_media_source(&self, source: DashMediaSource) -> Result<()>;

    /// Start loading the media source
    fn prepare(&self) -> Result<()>;

    fn set_play_when_ready(&self, play_when_ready: bool);

    fn is_playing(&self) -> bool;

    fn stop(&self);

    /// Free native resources; the instance is unusable afterwards.
    ///
    /// Listeners may still be invoked by events already in flight.
    fn release(&self);

    fn current_tracks(&self) -> Tracks;

    fn track_selection_parameters(&self) -> TrackSelectionParameters;

    fn set_track_selection_parameters(&self, parameters: TrackSelectionParameters);
}

/// Builds engine instances
pub trait EngineFactory: Send + Sync {
    fn create(&self, config: &PlayerConfig) -> Result<Arc<dyn PlaybackEngine>>;
}
