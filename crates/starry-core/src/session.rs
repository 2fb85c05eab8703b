//! Playback Session - headless state for a player screen
//!
//! Coordinates:
//! - Preparing and tearing down the player through a controller
//! - Folding controller callbacks into a [`SessionState`]
//! - Resolution selection and retry

use crate::{
    player::{PlaybackCallback, PlayerHandle, VideoPlaybackController},
    PlaybackState, ResolutionInfo,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{info, instrument};

/// What a player screen renders
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub is_loading: bool,
    pub playback_state: PlaybackState,
    pub resolution_dialog_visible: bool,
    pub available_resolutions: Vec<ResolutionInfo>,
    pub current_resolution: Option<ResolutionInfo>,
    pub error_message: Option<String>,
}

/// Callback half of the session; publishes every change
struct StateReporter {
    state_tx: watch::Sender<SessionState>,
}

impl PlaybackCallback for StateReporter {
    fn on_error(&self, message: &str) {
        self.state_tx
            .send_modify(|state| state.error_message = Some(message.to_string()));
    }

    fn on_state_changed(&self, playback_state: PlaybackState) {
        self.state_tx.send_modify(|state| {
            match playback_state {
                PlaybackState::Buffering => state.is_loading = true,
                PlaybackState::Ready => state.is_loading = false,
                PlaybackState::Idle | PlaybackState::Ended | PlaybackState::Unknown => {}
            }
            state.playback_state = playback_state;
        });
    }

    fn on_tracks_changed(&self, resolutions: Vec<ResolutionInfo>) {
        self.state_tx.send_modify(|state| {
            if state.current_resolution.is_none() {
                state.current_resolution = resolutions.iter().find(|r| r.is_auto).cloned();
            }
            state.available_resolutions = resolutions;
        });
    }
}

/// A single protected stream bound to a controller
pub struct PlaybackSession {
    manifest_uri: String,
    license_server_uri: String,
    controller: Mutex<Box<dyn VideoPlaybackController>>,
    handle: Mutex<Option<PlayerHandle>>,
    reporter: Arc<StateReporter>,
}

impl PlaybackSession {
    pub fn new(
        controller: Box<dyn VideoPlaybackController>,
        manifest_uri: impl Into<String>,
        license_server_uri: impl Into<String>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::default());
        Self {
            manifest_uri: manifest_uri.into(),
            license_server_uri: license_server_uri.into(),
            controller: Mutex::new(controller),
            handle: Mutex::new(None),
            reporter: Arc::new(StateReporter { state_tx }),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.reporter.state_tx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.reporter.state_tx.subscribe()
    }

    /// Player to attach a rendering surface to
    pub async fn handle(&self) -> Option<PlayerHandle> {
        self.handle.lock().await.clone()
    }

    /// Prepare the stream from a clean state. Returns true when a player exists afterwards.
    #[instrument(skip(self), fields(manifest = %self.manifest_uri))]
    pub async fn load(&self) -> bool {
        self.reporter.state_tx.send_replace(SessionState::default());

        let callback: Arc<dyn PlaybackCallback> = self.reporter.clone();
        let handle = self
            .controller
            .lock()
            .await
            .prepare(&self.manifest_uri, &self.license_server_uri, callback)
            .await;

        let loaded = handle.is_some();
        *self.handle.lock().await = handle;
        info!(loaded, "Session loaded");
        loaded
    }

    pub fn show_resolution_dialog(&self) {
        self.reporter
            .state_tx
            .send_modify(|state| state.resolution_dialog_visible = true);
    }

    pub fn dismiss_resolution_dialog(&self) {
        self.reporter
            .state_tx
            .send_modify(|state| state.resolution_dialog_visible = false);
    }

    /// Apply a resolution picked from the dialog
    pub async fn select_resolution(&self, resolution: ResolutionInfo) -> bool {
        let applied = self
            .controller
            .lock()
            .await
            .change_resolution(&resolution)
            .await;

        if applied {
            self.reporter.state_tx.send_modify(|state| {
                state.current_resolution = Some(resolution);
                state.resolution_dialog_visible = false;
            });
        }
        applied
    }

    /// Release the current player and prepare again
    pub async fn retry(&self) -> bool {
        info!("Retrying playback");
        self.close().await;
        self.load().await
    }

    /// Release the player
    pub async fn close(&self) {
        self.handle.lock().await.take();
        self.controller.lock().await.release().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> (StateReporter, watch::Receiver<SessionState>) {
        let (state_tx, state_rx) = watch::channel(SessionState::default());
        (StateReporter { state_tx }, state_rx)
    }

    #[test]
    fn test_buffering_and_ready_toggle_loading() {
        let (reporter, rx) = reporter();

        reporter.on_state_changed(PlaybackState::Buffering);
        assert!(rx.borrow().is_loading);
        assert_eq!(rx.borrow().playback_state, PlaybackState::Buffering);

        reporter.on_state_changed(PlaybackState::Ended);
        assert!(rx.borrow().is_loading);

        reporter.on_state_changed(PlaybackState::Ready);
        assert!(!rx.borrow().is_loading);
        assert_eq!(rx.borrow().playback_state, PlaybackState::Ready);
    }

    #[test]
    fn test_first_track_list_selects_auto() {
        let (reporter, rx) = reporter();
        let hd = ResolutionInfo {
            track_index: 0,
            display_name: "720p".into(),
            width: 1280,
            height: 720,
            bitrate: 2_000_000,
            is_auto: false,
        };

        reporter.on_tracks_changed(vec![ResolutionInfo::auto(), hd.clone()]);
        assert_eq!(rx.borrow().current_resolution, Some(ResolutionInfo::auto()));
        assert_eq!(rx.borrow().available_resolutions.len(), 2);

        reporter.state_tx.send_modify(|s| s.current_resolution = Some(hd.clone()));
        reporter.on_tracks_changed(vec![ResolutionInfo::auto(), hd.clone()]);
        assert_eq!(rx.borrow().current_resolution, Some(hd));
    }

    struct Unavailable;

    #[async_trait::async_trait]
    impl VideoPlaybackController for Unavailable {
        async fn prepare(
            &mut self,
            _manifest_uri: &str,
            _license_server_uri: &str,
            callback: Arc<dyn PlaybackCallback>,
        ) -> Option<PlayerHandle> {
            callback.on_error("Failed to create player: offline");
            None
        }

        async fn change_resolution(&mut self, _resolution: &ResolutionInfo) -> bool {
            false
        }

        async fn release(&mut self) {}
    }

    #[test]
    fn test_load_without_player() {
        let session = PlaybackSession::new(Box::new(Unavailable), "https://a/m.mpd", "https://a/l");
        tokio_test::block_on(async {
            assert!(!session.load().await);
            assert!(session.handle().await.is_none());
            assert!(!session.select_resolution(ResolutionInfo::auto()).await);
            session.close().await;
        });
        let state = session.state();
        assert_eq!(state.error_message.as_deref(), Some("Failed to create player: offline"));
        assert_eq!(state.current_resolution, None);
    }

    #[test]
    fn test_error_recorded() {
        let (reporter, rx) = reporter();
        reporter.on_error("license denied");
        assert_eq!(rx.borrow().error_message.as_deref(), Some("license denied"));
    }
}
