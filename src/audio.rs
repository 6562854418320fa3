//! Audio rendering resource contract
//!
//! The engine treats the actual audio sink as an opaque external resource:
//! it can be told to bind a source, play, pause, seek and change volume,
//! and it reports back asynchronously over an event channel. Exactly one
//! source is bound at a time; binding a new one supersedes the previous
//! load. Every bind carries a token that the resource echoes in its
//! notifications, so the controller can drop events from a superseded
//! source without an explicit cancellation primitive.

use tokio::sync::mpsc;

/// Notification from the audio resource, tagged with the load it belongs to.
#[derive(Clone, Debug)]
pub struct AudioEvent {
    pub token: u64,
    pub kind: AudioEventKind,
}

#[derive(Clone, Debug)]
pub enum AudioEventKind {
    /// The bound source is decodable and its duration is known. Play
    /// commands issued before this point must be deferred, not dropped.
    MetadataReady { duration_secs: f64 },
    /// Periodic playback position report. The only writer of playback
    /// position during normal playback.
    Position { secs: f64 },
    /// The bound source played to its end.
    Finished,
    /// The resource failed after a successful bind.
    Error { detail: String },
}

pub type AudioEventSender = mpsc::UnboundedSender<AudioEvent>;
pub type AudioEventReceiver = mpsc::UnboundedReceiver<AudioEvent>;

/// Channel a backend uses to deliver notifications to the controller.
/// Unbounded so a slow consumer can never make the resource drop events;
/// arrival order is preserved.
pub fn event_channel() -> (AudioEventSender, AudioEventReceiver) {
    mpsc::unbounded_channel()
}

/// Command surface of the audio rendering resource.
///
/// Commands are fire-and-forget: outcomes come back as [`AudioEvent`]s.
/// Implementations must be cheap to call from the control flow and do their
/// real work elsewhere.
pub trait AudioBackend: Send + Sync {
    /// Bind a new source, superseding whatever was bound before. `token`
    /// must be echoed in every notification for this source.
    fn bind(&self, url: &str, token: u64);
    fn play(&self);
    fn pause(&self);
    fn seek(&self, position_secs: f64);
    /// Volume in `[0, 1]`.
    fn set_volume(&self, volume: f64);
}
