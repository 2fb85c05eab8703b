//! Starry Core - Deep-link metadata and DRM playback library
//!
//! This crate provides the core functionality behind the Starry player:
//! - Deep-link resolution against the streaming service's start API
//! - Extraction of show/movie metadata from the nested response document
//! - Adaptation of a native DASH + Widevine engine to an application model
//! - A headless playback session for player screens
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       Starry Core                         │
//! ├───────────────────────────────────────────────────────────┤
//! │                                                           │
//! │  ┌──────────────┐                  ┌──────────────┐       │
//! │  │   Catalog    │                  │   Playback   │       │
//! │  │   Client     │                  │   Session    │       │
//! │  └──────┬───────┘                  └──────┬───────┘       │
//! │         │                                 │               │
//! │  ┌──────┴───────┐                  ┌──────┴───────┐       │
//! │  │   Metadata   │                  │     DRM      │       │
//! │  │  Extractor   │                  │  Controller  │       │
//! │  └──────────────┘                  └──────┬───────┘       │
//! │                                           │               │
//! │                                    ┌──────┴───────┐       │
//! │                                    │    Engine    │       │
//! │                                    │   (native)   │       │
//! │                                    └──────────────┘       │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod catalog;
pub mod player;
pub mod session;

pub use error::{Error, ParseError, Result};
pub use types::*;
pub use config::{ApiConfig, PlayerConfig};
pub use catalog::{CatalogClient, VideoRepository};
pub use player::{DrmPlaybackController, PlaybackCallback, VideoPlaybackController};
pub use session::{PlaybackSession, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "Starry Core initialized");
}
