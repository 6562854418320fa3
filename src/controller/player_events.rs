//! Audio resource notification handling
//!
//! Notifications arrive on a channel and are processed one at a time, in
//! arrival order, by a single task. Events tagged with a superseded load
//! token are dropped before they can touch any state.

use crate::audio::{AudioEvent, AudioEventKind, AudioEventReceiver};
use crate::error::PlayerError;
use crate::model::AdvanceOutcome;

use super::PlayerController;

impl PlayerController {
    /// Spawn the listener task consuming the backend's event channel.
    pub fn start_audio_event_listener(&self, mut events: AudioEventReceiver) {
        let controller = self.clone();
        tracing::info!("starting audio event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                controller.handle_audio_event(event).await;
            }
            tracing::debug!("audio event channel closed");
        });
    }

    /// Apply one resource notification.
    pub async fn handle_audio_event(&self, event: AudioEvent) {
        if !self.model.is_latest_load(event.token).await {
            tracing::trace!(token = event.token, "ignoring event from superseded load");
            return;
        }

        match event.kind {
            AudioEventKind::MetadataReady { duration_secs } => {
                tracing::debug!(duration_secs, "metadata ready");
                self.model.mark_ready(duration_secs).await;
                // Honor a play pressed while the load was still in flight.
                if self.model.play_requested().await {
                    self.backend.play();
                }
            }
            AudioEventKind::Position { secs } => {
                self.model.record_position(secs).await;
            }
            AudioEventKind::Finished => {
                tracing::debug!("track finished");
                self.handle_track_finished().await;
            }
            AudioEventKind::Error { detail } => {
                // Keep the queue and current selection so the UI can offer
                // retry or skip.
                self.model.set_play_intent(false).await;
                self.model
                    .set_error(PlayerError::Playback { detail })
                    .await;
            }
        }
    }

    async fn handle_track_finished(&self) {
        match self.model.advance().await {
            AdvanceOutcome::Moved | AdvanceOutcome::Replay => {
                self.sync_current_track().await;
            }
            AdvanceOutcome::Exhausted => {
                self.model.set_play_intent(false).await;
            }
        }
    }
}
