//! Shared player state
//!
//! One [`PlayerModel`] instance is shared by reference between the queue
//! manager callers, the transport controller and the library store. All
//! mutation goes through its async accessors; the persisted subset is
//! written through on every library/settings mutation.

use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::Mutex;

use crate::error::PlayerError;
use crate::storage::{PersistedState, Storage};

use super::library::LibraryState;
use super::playback::{PlaybackSnapshot, TransportSession};
use super::queue::{AdvanceOutcome, PlayQueue, RetreatOutcome};
use super::types::{Playlist, RepeatMode, Theme, Track};

pub struct PlayerModel {
    queue: Mutex<PlayQueue>,
    transport: Mutex<TransportSession>,
    library: Mutex<LibraryState>,
    theme: Mutex<Theme>,
    search_results: Mutex<Vec<Track>>,
    last_error: Mutex<Option<PlayerError>>,
    storage: Arc<dyn Storage>,
}

impl PlayerModel {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_queue(storage, PlayQueue::new())
    }

    /// Build with a seeded queue RNG so shuffle is deterministic in tests.
    pub fn with_queue_rng(storage: Arc<dyn Storage>, rng: StdRng) -> Self {
        Self::with_queue(storage, PlayQueue::with_rng(rng))
    }

    fn with_queue(storage: Arc<dyn Storage>, queue: PlayQueue) -> Self {
        Self {
            queue: Mutex::new(queue),
            transport: Mutex::new(TransportSession::default()),
            library: Mutex::new(LibraryState::default()),
            theme: Mutex::new(Theme::default()),
            search_results: Mutex::new(Vec::new()),
            last_error: Mutex::new(None),
            storage,
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Rehydrate the persisted subset. Called once at startup.
    pub async fn restore(&self) {
        match self.storage.load() {
            Ok(Some(state)) => {
                self.transport.lock().await.set_volume(state.volume);
                self.queue
                    .lock()
                    .await
                    .restore_policy(state.shuffled, state.repeat);
                *self.theme.lock().await = state.theme;
                *self.library.lock().await = state.library;
                tracing::info!("persisted state restored");
            }
            Ok(None) => tracing::info!("no persisted state, starting fresh"),
            Err(e) => tracing::warn!(error = %e, "could not load persisted state"),
        }
    }

    /// Write the persisted subset through to storage. Failures are logged
    /// and never escalate: in-memory state is already consistent.
    async fn persist(&self) {
        let state = {
            let queue = self.queue.lock().await;
            let transport = self.transport.lock().await;
            let library = self.library.lock().await;
            let theme = self.theme.lock().await;
            PersistedState {
                volume: transport.volume,
                shuffled: queue.is_shuffled(),
                repeat: queue.repeat(),
                theme: *theme,
                library: library.clone(),
            }
        };
        if let Err(e) = self.storage.save(&state) {
            tracing::warn!(error = %e, "could not persist state");
        }
    }

    // ========================================================================
    // Queue
    // ========================================================================

    pub async fn set_queue(
        &self,
        tracks: Vec<Track>,
        start: Option<usize>,
    ) -> Result<(), PlayerError> {
        self.queue.lock().await.set_queue(tracks, start)
    }

    pub async fn enqueue(&self, track: Track) {
        self.queue.lock().await.enqueue(track);
    }

    pub async fn dequeue(&self, index: usize) -> Option<Track> {
        self.queue.lock().await.dequeue(index)
    }

    pub async fn advance(&self) -> AdvanceOutcome {
        self.queue.lock().await.advance()
    }

    pub async fn retreat(&self, elapsed_secs: f64) -> RetreatOutcome {
        self.queue.lock().await.retreat(elapsed_secs)
    }

    pub async fn toggle_shuffle(&self) -> bool {
        let shuffled = {
            let mut queue = self.queue.lock().await;
            queue.toggle_shuffle();
            queue.is_shuffled()
        };
        self.persist().await;
        shuffled
    }

    pub async fn set_repeat(&self, mode: RepeatMode) {
        self.queue.lock().await.set_repeat(mode);
        self.persist().await;
    }

    pub async fn cycle_repeat(&self) -> RepeatMode {
        let mode = self.queue.lock().await.cycle_repeat();
        self.persist().await;
        mode
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.queue.lock().await.current().cloned()
    }

    pub async fn current_track_id(&self) -> Option<String> {
        self.queue.lock().await.current_id().map(str::to_owned)
    }

    pub async fn queue_tracks(&self) -> Vec<Track> {
        self.queue.lock().await.tracks().to_vec()
    }

    pub async fn queue_position(&self) -> Option<usize> {
        self.queue.lock().await.position()
    }

    // ========================================================================
    // Transport
    // ========================================================================

    pub async fn begin_load(&self, track_id: &str) -> u64 {
        self.transport.lock().await.begin_load(track_id)
    }

    pub async fn is_latest_load(&self, token: u64) -> bool {
        self.transport.lock().await.is_latest_load(token)
    }

    pub async fn mark_ready(&self, duration_secs: f64) {
        self.transport.lock().await.mark_ready(duration_secs);
    }

    pub async fn record_position(&self, secs: f64) {
        self.transport.lock().await.record_position(secs);
    }

    pub async fn reset_position(&self) {
        self.transport.lock().await.record_position(0.0);
    }

    pub async fn position_secs(&self) -> f64 {
        self.transport.lock().await.position_secs
    }

    pub async fn clamp_seek(&self, target_secs: f64) -> f64 {
        self.transport.lock().await.clamp_seek(target_secs)
    }

    pub async fn play_requested(&self) -> bool {
        self.transport.lock().await.play_requested
    }

    pub async fn set_play_intent(&self, requested: bool) {
        self.transport.lock().await.play_requested = requested;
    }

    pub async fn toggle_play_intent(&self) -> bool {
        let mut transport = self.transport.lock().await;
        transport.play_requested = !transport.play_requested;
        transport.play_requested
    }

    pub async fn is_ready(&self) -> bool {
        self.transport.lock().await.ready
    }

    pub async fn loaded_track_id(&self) -> Option<String> {
        self.transport.lock().await.loaded_track_id.clone()
    }

    pub async fn set_volume(&self, volume: f64) -> f64 {
        let applied = self.transport.lock().await.set_volume(volume);
        self.persist().await;
        applied
    }

    pub async fn toggle_mute(&self) -> f64 {
        let applied = self.transport.lock().await.toggle_mute();
        self.persist().await;
        applied
    }

    pub async fn playback_snapshot(&self) -> PlaybackSnapshot {
        let queue = self.queue.lock().await;
        let transport = self.transport.lock().await;
        PlaybackSnapshot {
            track: queue.current().cloned(),
            position_secs: transport.position_secs,
            duration_secs: transport.duration_secs,
            play_requested: transport.play_requested,
            ready: transport.ready,
            volume: transport.volume,
            muted: transport.muted,
            shuffled: queue.is_shuffled(),
            repeat: queue.repeat(),
        }
    }

    // ========================================================================
    // Library & history (write-through persisted)
    // ========================================================================

    pub async fn toggle_liked(&self, track: Track) -> bool {
        let liked = self.library.lock().await.toggle_liked(track);
        self.persist().await;
        liked
    }

    pub async fn is_liked(&self, track_id: &str) -> bool {
        self.library.lock().await.is_liked(track_id)
    }

    pub async fn liked_tracks(&self) -> Vec<Track> {
        self.library.lock().await.liked().to_vec()
    }

    pub async fn record_play(&self, track: Track) {
        self.library.lock().await.record_play(track);
        self.persist().await;
    }

    pub async fn recent_plays(&self) -> Vec<Track> {
        self.library.lock().await.recent().to_vec()
    }

    pub async fn create_playlist(&self, name: &str) -> Playlist {
        let playlist = self.library.lock().await.create_playlist(name);
        self.persist().await;
        playlist
    }

    pub async fn add_to_playlist(&self, playlist_id: &str, track: Track) {
        let result = self.library.lock().await.add_to_playlist(playlist_id, track);
        self.log_not_found(result);
        self.persist().await;
    }

    pub async fn remove_from_playlist(&self, playlist_id: &str, track_id: &str) {
        let result = self
            .library
            .lock()
            .await
            .remove_from_playlist(playlist_id, track_id);
        self.log_not_found(result);
        self.persist().await;
    }

    pub async fn delete_playlist(&self, playlist_id: &str) {
        let result = self.library.lock().await.delete_playlist(playlist_id);
        self.log_not_found(result);
        self.persist().await;
    }

    pub async fn playlists(&self) -> Vec<Playlist> {
        self.library.lock().await.playlists().to_vec()
    }

    pub async fn record_search(&self, query: &str) {
        self.library.lock().await.record_search(query);
        self.persist().await;
    }

    pub async fn search_history(&self) -> Vec<String> {
        self.library.lock().await.search_history().to_vec()
    }

    pub async fn clear_search_history(&self) {
        self.library.lock().await.clear_search_history();
        self.persist().await;
    }

    pub async fn toggle_theme(&self) -> Theme {
        let theme = {
            let mut theme = self.theme.lock().await;
            *theme = theme.toggle();
            *theme
        };
        self.persist().await;
        theme
    }

    pub async fn theme(&self) -> Theme {
        *self.theme.lock().await
    }

    /// Referencing a playlist that no longer exists is a no-op, not a
    /// failure.
    fn log_not_found(&self, result: Result<(), PlayerError>) {
        if let Err(e) = result {
            tracing::debug!(error = %e, "library operation was a no-op");
        }
    }

    // ========================================================================
    // Search results & errors
    // ========================================================================

    pub async fn set_search_results(&self, tracks: Vec<Track>) {
        *self.search_results.lock().await = tracks;
    }

    pub async fn search_results(&self) -> Vec<Track> {
        self.search_results.lock().await.clone()
    }

    pub async fn set_error(&self, error: PlayerError) {
        tracing::warn!(error = %error, "player error");
        *self.last_error.lock().await = Some(error);
    }

    pub async fn last_error(&self) -> Option<PlayerError> {
        self.last_error.lock().await.clone()
    }

    pub async fn take_error(&self) -> Option<PlayerError> {
        self.last_error.lock().await.take()
    }
}
