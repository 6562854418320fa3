//! Playback control methods and current-track synchronization

use crate::error::PlayerError;
use crate::model::{AdvanceOutcome, RetreatOutcome, Track};

use super::PlayerController;

impl PlayerController {
    /// Replace the queue and start playback from `start`.
    pub async fn play_tracks(
        &self,
        tracks: Vec<Track>,
        start: Option<usize>,
    ) -> Result<(), PlayerError> {
        self.model.set_queue(tracks, start).await?;
        self.model.set_play_intent(true).await;
        self.sync_current_track().await;
        Ok(())
    }

    /// Append a track without touching the current position. On an empty
    /// queue the track becomes current, so the transport picks it up.
    pub async fn enqueue(&self, track: Track) {
        let before = self.model.current_track_id().await;
        self.model.enqueue(track).await;
        if self.model.current_track_id().await != before {
            self.sync_current_track().await;
        }
    }

    /// Remove the queue entry at `index`. Removing the current track hands
    /// playback to its closest successor.
    pub async fn dequeue(&self, index: usize) -> Option<Track> {
        let before = self.model.current_track_id().await;
        let removed = self.model.dequeue(index).await;
        let after = self.model.current_track_id().await;
        if after != before {
            if after.is_none() {
                // Nothing left to play.
                self.model.set_play_intent(false).await;
                self.backend.pause();
            } else {
                self.sync_current_track().await;
            }
        }
        removed
    }

    /// Toggle play/pause intent. The command reaches the resource only once
    /// the loaded source is ready; before that the intent is remembered and
    /// honored when metadata-ready fires.
    pub async fn toggle_playback(&self) {
        let requested = self.model.toggle_play_intent().await;
        tracing::debug!(requested, "toggling playback");

        if self.model.is_ready().await {
            if requested {
                self.backend.play();
            } else {
                self.backend.pause();
            }
        } else if requested && self.model.loaded_track_id().await.is_none() {
            // Nothing was ever bound (or the last selection failed to
            // resolve); pressing play is the explicit retry.
            self.sync_current_track().await;
        }
    }

    pub async fn next_track(&self) {
        tracing::debug!("skipping to next track");
        match self.model.advance().await {
            AdvanceOutcome::Moved | AdvanceOutcome::Replay => {
                self.sync_current_track().await;
            }
            AdvanceOutcome::Exhausted => {
                // End of queue with repeat off: intent stops, position stays.
                self.model.set_play_intent(false).await;
            }
        }
    }

    pub async fn previous_track(&self) {
        let elapsed = self.model.position_secs().await;
        let outcome = self.model.retreat(elapsed).await;
        self.model.set_play_intent(true).await;
        match outcome {
            RetreatOutcome::Restart => {
                tracing::debug!(elapsed, "restarting current track");
                self.model.reset_position().await;
                self.backend.seek(0.0);
                if self.model.is_ready().await {
                    self.backend.play();
                }
            }
            RetreatOutcome::Moved => {
                self.sync_current_track().await;
            }
        }
    }

    /// Clamp and apply a seek. The position is written optimistically; the
    /// resource's next position update is authoritative.
    pub async fn seek(&self, target_secs: f64) {
        let target = self.model.clamp_seek(target_secs).await;
        self.backend.seek(target);
    }

    pub async fn set_volume(&self, volume: f64) {
        let applied = self.model.set_volume(volume).await;
        self.backend.set_volume(applied);
    }

    pub async fn toggle_mute(&self) {
        let applied = self.model.toggle_mute().await;
        self.backend.set_volume(applied);
    }

    /// Shuffle keeps the current track pinned, so no reload is needed.
    pub async fn toggle_shuffle(&self) -> bool {
        self.model.toggle_shuffle().await
    }

    pub async fn cycle_repeat(&self) -> crate::model::RepeatMode {
        self.model.cycle_repeat().await
    }

    pub async fn toggle_liked(&self, track: Track) -> bool {
        self.model.toggle_liked(track).await
    }

    /// React to a change of the queue's current track: resolve a stream
    /// URL, bind it, and record the play.
    ///
    /// Resolution is asynchronous; if the user moved on in the meantime the
    /// stale result is discarded rather than clobbering the newer
    /// selection. On resolution failure the queue stays put; skipping
    /// silently could loop forever over an entirely broken catalog.
    pub(crate) async fn sync_current_track(&self) {
        let Some(track) = self.model.current_track().await else {
            tracing::debug!("queue is empty, nothing to load");
            return;
        };

        match self
            .resolver
            .resolve_playable(&track, self.catalog.as_ref())
            .await
        {
            Ok(url) => {
                let current = self.model.current_track_id().await;
                if current.as_deref() != Some(track.id.as_str()) {
                    tracing::debug!(
                        resolved = %track.id,
                        current = ?current,
                        "discarding stale resolution"
                    );
                    return;
                }
                let token = self.model.begin_load(&track.id).await;
                // Recently-played means "selected", not "finished": record
                // on load-attempt.
                self.model.record_play(track.clone()).await;
                tracing::info!(track_id = %track.id, title = %track.title, "loading track");
                self.backend.bind(&url, token);
            }
            Err(e) => {
                self.model.set_error(e).await;
            }
        }
    }
}
