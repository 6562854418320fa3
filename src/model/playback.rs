//! Transport session: the live binding between the queue's current track
//! and the audio rendering resource

use super::types::{RepeatMode, Track};

/// State of the session with the audio resource.
///
/// `loaded_track_id` may lag the queue's current track while a load is in
/// flight; `load_token` increases on every bind so notifications from a
/// superseded source can be recognized and dropped.
#[derive(Clone, Debug)]
pub struct TransportSession {
    pub loaded_track_id: Option<String>,
    /// Metadata-ready has fired for the currently loaded source.
    pub ready: bool,
    /// User/system intent to play, independent of resource readiness.
    pub play_requested: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: f64,
    pub muted: bool,
    muted_volume: Option<f64>,
    load_token: u64,
}

impl Default for TransportSession {
    fn default() -> Self {
        Self {
            loaded_track_id: None,
            ready: false,
            play_requested: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: 1.0,
            muted: false,
            muted_volume: None,
            load_token: 0,
        }
    }
}

impl TransportSession {
    /// Start a new load for `track_id` and return the token that tags it.
    /// Any notification carrying an older token belongs to a superseded
    /// source.
    pub fn begin_load(&mut self, track_id: &str) -> u64 {
        self.load_token += 1;
        self.loaded_track_id = Some(track_id.to_string());
        self.ready = false;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.load_token
    }

    pub fn is_latest_load(&self, token: u64) -> bool {
        token == self.load_token
    }

    pub fn current_load_token(&self) -> u64 {
        self.load_token
    }

    pub fn mark_ready(&mut self, duration_secs: f64) {
        self.ready = true;
        self.duration_secs = duration_secs.max(0.0);
    }

    /// Overwrite the position with the resource's authoritative value.
    pub fn record_position(&mut self, secs: f64) {
        self.position_secs = secs.max(0.0);
    }

    /// Clamp a seek target into the known duration and apply it
    /// optimistically; a later position update may correct it.
    pub fn clamp_seek(&mut self, target_secs: f64) -> f64 {
        let target = target_secs.clamp(0.0, self.duration_secs.max(0.0));
        self.position_secs = target;
        target
    }

    /// Clamp and store a volume. Zero surfaces as muted; any audible volume
    /// clears the mute cache since the user picked a level explicitly.
    pub fn set_volume(&mut self, volume: f64) -> f64 {
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        self.muted = volume == 0.0;
        if volume > 0.0 {
            self.muted_volume = None;
        }
        volume
    }

    /// Toggle mute, caching the pre-mute volume so unmuting restores it.
    /// Returns the volume to forward to the resource.
    pub fn toggle_mute(&mut self) -> f64 {
        if self.muted {
            let restored = self.muted_volume.take().unwrap_or(1.0);
            self.volume = restored;
            self.muted = false;
            restored
        } else {
            self.muted_volume = Some(self.volume);
            self.volume = 0.0;
            self.muted = true;
            0.0
        }
    }
}

/// Combined playback state handed to the view layer.
#[derive(Clone, Debug)]
pub struct PlaybackSnapshot {
    pub track: Option<Track>,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub play_requested: bool,
    pub ready: bool,
    pub volume: f64,
    pub muted: bool,
    pub shuffled: bool,
    pub repeat: RepeatMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_load_resets_session_and_bumps_token() {
        let mut session = TransportSession::default();
        session.mark_ready(200.0);
        session.record_position(42.0);

        let first = session.begin_load("t1");
        assert_eq!(session.loaded_track_id.as_deref(), Some("t1"));
        assert!(!session.ready);
        assert_eq!(session.position_secs, 0.0);
        assert_eq!(session.duration_secs, 0.0);

        let second = session.begin_load("t2");
        assert!(second > first);
        assert!(session.is_latest_load(second));
        assert!(!session.is_latest_load(first));
    }

    #[test]
    fn seek_clamps_into_duration() {
        let mut session = TransportSession::default();
        session.begin_load("t1");
        session.mark_ready(100.0);

        assert_eq!(session.clamp_seek(150.0), 100.0);
        assert_eq!(session.clamp_seek(-3.0), 0.0);
        assert_eq!(session.clamp_seek(42.5), 42.5);
        assert_eq!(session.position_secs, 42.5);
    }

    #[test]
    fn mute_caches_and_restores_volume() {
        let mut session = TransportSession::default();
        session.set_volume(0.7);

        assert_eq!(session.toggle_mute(), 0.0);
        assert!(session.muted);
        assert_eq!(session.volume, 0.0);

        assert_eq!(session.toggle_mute(), 0.7);
        assert!(!session.muted);
        assert_eq!(session.volume, 0.7);
    }

    #[test]
    fn unmute_without_cached_volume_defaults_to_full() {
        let mut session = TransportSession::default();
        // Muted through set_volume, so nothing was cached.
        session.set_volume(0.0);
        assert!(session.muted);
        assert_eq!(session.toggle_mute(), 1.0);
        assert_eq!(session.volume, 1.0);
    }

    #[test]
    fn set_volume_zero_surfaces_as_muted() {
        let mut session = TransportSession::default();
        assert_eq!(session.set_volume(0.0), 0.0);
        assert!(session.muted);
        assert_eq!(session.set_volume(0.4), 0.4);
        assert!(!session.muted);
    }

    #[test]
    fn set_volume_clamps() {
        let mut session = TransportSession::default();
        assert_eq!(session.set_volume(1.7), 1.0);
        assert_eq!(session.set_volume(-0.5), 0.0);
    }
}
