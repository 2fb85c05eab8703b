//! Core types for Starry

use crate::player::engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a prepared playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A title resolved from a deep link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Video {
    /// Episodic content with its episode tray
    Show {
        thumbnail: String,
        title: String,
        description: String,
        episodes: Vec<Episode>,
    },
    /// Single feature
    Movie {
        thumbnail: String,
        title: String,
        description: String,
    },
}

impl Video {
    pub fn thumbnail(&self) -> &str {
        match self {
            Video::Show { thumbnail, .. } | Video::Movie { thumbnail, .. } => thumbnail,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Video::Show { title, .. } | Video::Movie { title, .. } => title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Video::Show { description, .. } | Video::Movie { description, .. } => description,
        }
    }

    /// Episodes in tray order; always empty for movies
    pub fn episodes(&self) -> &[Episode] {
        match self {
            Video::Show { episodes, .. } => episodes,
            Video::Movie { .. } => &[],
        }
    }

    pub fn is_show(&self) -> bool {
        matches!(self, Video::Show { .. })
    }
}

/// One entry of a show's episode tray
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// 1-based episode number, 0 when the tag could not be read
    pub number: u32,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
}

/// Track index reserved for the adaptive entry
pub const AUTO_TRACK_INDEX: i32 = -1;

/// A selectable video quality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionInfo {
    /// Index within the first video track group, or [`AUTO_TRACK_INDEX`]
    pub track_index: i32,
    pub display_name: String,
    pub width: i32,
    pub height: i32,
    pub bitrate: i32,
    pub is_auto: bool,
}

impl ResolutionInfo {
    /// The synthesized adaptive-selection entry
    pub fn auto() -> Self {
        Self {
            track_index: AUTO_TRACK_INDEX,
            display_name: "Auto".to_string(),
            width: 0,
            height: 0,
            bitrate: 0,
            is_auto: true,
        }
    }
}

impl std::fmt::Display for ResolutionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Playback state as seen by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Buffering,
    Ready,
    Ended,
    #[default]
    Unknown,
}

impl PlaybackState {
    /// Relabel an engine playback-state code
    pub fn from_engine_code(code: i32) -> Self {
        match code {
            engine::STATE_IDLE => PlaybackState::Idle,
            engine::STATE_BUFFERING => PlaybackState::Buffering,
            engine::STATE_READY => PlaybackState::Ready,
            engine::STATE_ENDED => PlaybackState::Ended,
            _ => PlaybackState::Unknown,
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Buffering => write!(f, "buffering"),
            PlaybackState::Ready => write!(f, "ready"),
            PlaybackState::Ended => write!(f, "ended"),
            PlaybackState::Unknown => write!(f, "unknown"),
        }
    }
}

/// DRM system types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrmSystem {
    #[default]
    Widevine,
    PlayReady,
    ClearKey,
}

impl DrmSystem {
    /// Protection system ID the engine's DRM session manager is keyed by
    pub fn system_id(&self) -> Uuid {
        match self {
            DrmSystem::Widevine => Uuid::from_u128(0xedef8ba9_79d6_4ace_a3c8_27dcd51d21ed),
            DrmSystem::PlayReady => Uuid::from_u128(0x9a04f079_9840_4286_ab92_e65be0885f95),
            DrmSystem::ClearKey => Uuid::from_u128(0x1077efec_c0b2_4d02_ace3_3c1e52e2fb4b),
        }
    }
}
