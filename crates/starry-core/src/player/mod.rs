//! DRM playback adapter
//!
//! [`DrmPlaybackController`] drives a native engine built by an
//! [`EngineFactory`] and reports its events through a [`PlaybackCallback`]:
//!
//! ```text
//!  engine state code ──► PlaybackState ──► on_state_changed
//!  engine track set  ──► [Auto, 4K, 1080p, ...] ──► on_tracks_changed
//!  engine error      ──► message ──► on_error
//! ```

pub mod engine;
pub mod tracks;

pub use engine::{
    DashMediaSource, DrmProvision, EngineFactory, EngineListener, Format, LicenseConfig,
    PlaybackEngine, TrackGroup, TrackSelectionOverride, TrackSelectionParameters, TrackType, Tracks,
};
pub use tracks::{apply_resolution, build_resolution_list, resolution_label};

use crate::{Error, PlaybackState, PlayerConfig, ResolutionInfo, Result, SessionId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Shared handle to a prepared engine, for rendering surfaces
pub type PlayerHandle = Arc<dyn PlaybackEngine>;

/// Receives playback events from the controller
pub trait PlaybackCallback: Send + Sync {
    fn on_error(&self, message: &str);

    fn on_state_changed(&self, state: PlaybackState);

    /// Called with the complete list on every track change
    fn on_tracks_changed(&self, resolutions: Vec<ResolutionInfo>);
}

/// Commands understood by a playback controller
#[async_trait]
pub trait VideoPlaybackController: Send + Sync {
    /// Build and start a player for a protected DASH stream.
    ///
    /// Returns `None` when the player could not be built; the reason is
    /// reported through `callback`.
    async fn prepare(
        &mut self,
        manifest_uri: &str,
        license_server_uri: &str,
        callback: Arc<dyn PlaybackCallback>,
    ) -> Option<PlayerHandle>;

    /// Switch to `resolution`. Returns false when the request was ignored.
    async fn change_resolution(&mut self, resolution: &ResolutionInfo) -> bool;

    /// Tear down the current player, if any
    async fn release(&mut self);
}

/// Forwards engine events to the application callback until disconnected
struct CallbackBridge {
    session_id: SessionId,
    callback: Arc<dyn PlaybackCallback>,
    connected: Arc<AtomicBool>,
}

impl CallbackBridge {
    fn is_connected(&self) -> bool {
        let connected = self.connected.load(Ordering::Acquire);
        if !connected {
            debug!(session_id = %self.session_id, "Dropping event from released player");
        }
        connected
    }
}

impl EngineListener for CallbackBridge {
    fn on_playback_state_changed(&self, state: i32) {
        if !self.is_connected() {
            return;
        }
        let state = PlaybackState::from_engine_code(state);
        debug!(session_id = %self.session_id, %state, "Playback state changed");
        self.callback.on_state_changed(state);
    }

    fn on_tracks_changed(&self, tracks: &Tracks) {
        if !self.is_connected() {
            return;
        }
        let resolutions = build_resolution_list(tracks);
        debug!(session_id = %self.session_id, count = resolutions.len(), "Tracks changed");
        self.callback.on_tracks_changed(resolutions);
    }

    fn on_player_error(&self, message: Option<&str>) {
        if !self.is_connected() {
            return;
        }
        let message = message.unwrap_or("Unknown playback error");
        error!(session_id = %self.session_id, message, "Player error");
        self.callback.on_error(message);
    }
}

/// Controller over a DASH + DRM engine
pub struct DrmPlaybackController<F: EngineFactory> {
    factory: F,
    config: PlayerConfig,
    player: Option<PlayerHandle>,
    session_id: Option<SessionId>,
    /// Cleared when the current player is released; its events are dropped after that
    connected: Option<Arc<AtomicBool>>,
}

impl<F: EngineFactory> DrmPlaybackController<F> {
    pub fn new(factory: F, config: PlayerConfig) -> Self {
        Self {
            factory,
            config,
            player: None,
            session_id: None,
            connected: None,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Current player, if one is prepared
    pub fn player(&self) -> Option<&PlayerHandle> {
        self.player.as_ref()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    fn build(
        &self,
        manifest_uri: &str,
        license_server_uri: &str,
        callback: Arc<dyn PlaybackCallback>,
        session_id: SessionId,
        connected: Arc<AtomicBool>,
    ) -> Result<PlayerHandle> {
        let drm = DrmProvision::for_license_server(license_server_uri, &self.config);
        let source = DashMediaSource::new(manifest_uri, &self.config.user_agent, drm)?;

        let engine = self.factory.create(&self.config)?;
        let started = (|| -> Result<()> {
            engine.add_listener(Arc::new(CallbackBridge {
                session_id,
                callback,
                connected: connected.clone(),
            }));
            engine.set_media_source(source)?;
            engine.prepare()?;
            engine.set_play_when_ready(self.config.autoplay);
            Ok(())
        })();

        match started {
            Ok(()) => Ok(engine),
            Err(e) => {
                connected.store(false, Ordering::Release);
                engine.release();
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<F: EngineFactory> VideoPlaybackController for DrmPlaybackController<F> {
    #[instrument(skip(self, callback))]
    async fn prepare(
        &mut self,
        manifest_uri: &str,
        license_server_uri: &str,
        callback: Arc<dyn PlaybackCallback>,
    ) -> Option<PlayerHandle> {
        if self.player.is_some() {
            warn!("Preparing over an existing player; releasing it first");
            self.release().await;
        }

        let session_id = SessionId::new();
        let connected = Arc::new(AtomicBool::new(true));
        match self.build(
            manifest_uri,
            license_server_uri,
            callback.clone(),
            session_id,
            connected.clone(),
        ) {
            Ok(player) => {
                info!(%session_id, "Player prepared");
                self.player = Some(player.clone());
                self.session_id = Some(session_id);
                self.connected = Some(connected);
                Some(player)
            }
            Err(e) => {
                let e = match e {
                    Error::PlayerConstruction(_) => e,
                    other => Error::PlayerConstruction(other.to_string()),
                };
                error!(error = %e, "Error creating player");
                callback.on_error(&e.to_string());
                None
            }
        }
    }

    async fn change_resolution(&mut self, resolution: &ResolutionInfo) -> bool {
        let Some(player) = &self.player else {
            debug!("No player; ignoring resolution change");
            return false;
        };

        let tracks = player.current_tracks();
        match apply_resolution(player.track_selection_parameters(), &tracks, resolution) {
            Some(parameters) => {
                player.set_track_selection_parameters(parameters);
                info!(resolution = %resolution, track_index = resolution.track_index, "Resolution changed");
                true
            }
            None => {
                warn!(
                    track_index = resolution.track_index,
                    "Track not in first video group; keeping current selection"
                );
                false
            }
        }
    }

    async fn release(&mut self) {
        let Some(player) = self.player.take() else {
            return;
        };
        if let Some(connected) = self.connected.take() {
            connected.store(false, Ordering::Release);
        }
        if player.is_playing() {
            player.stop();
        }
        player.release();
        info!(session_id = ?self.session_id.take(), "Player released");
    }
}
