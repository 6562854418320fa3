//! Core type definitions for the playback engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized playable item: identity, display metadata, and
/// quality-tiered stream/image candidates.
///
/// `id` is the sole equality key; two tracks with the same id are the same
/// track no matter how the rest of the fields drift between catalog
/// responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Display string, e.g. "Artist A, Artist B".
    pub artists: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    /// Artwork candidates ordered by ascending quality. A slot may be empty.
    #[serde(default)]
    pub images: Vec<Option<String>>,
    /// Stream URL candidates ordered by ascending quality. A slot may be empty.
    #[serde(default)]
    pub streams: Vec<Option<String>>,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl std::hash::Hash for Track {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Track {
    /// Pick an artwork URL for the given quality tier.
    ///
    /// Artwork comes in three sizes, so higher stream tiers map to the top
    /// image slot. Falls back to the last, then first, available candidate.
    pub fn image_url(&self, quality: Quality) -> Option<&str> {
        let index = quality.index().min(2);
        let at = |i: usize| self.images.get(i).and_then(|c| c.as_deref());
        at(index)
            .or_else(|| self.images.iter().rev().find_map(|c| c.as_deref()))
            .or_else(|| self.images.iter().find_map(|c| c.as_deref()))
    }
}

/// Ordinal stream quality tier. The index doubles as the position in a
/// track's candidate list (lowest bitrate first).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
    VeryHigh,
    Highest,
}

impl Quality {
    pub fn index(self) -> usize {
        match self {
            Quality::Low => 0,
            Quality::Medium => 1,
            Quality::High => 2,
            Quality::VeryHigh => 3,
            Quality::Highest => 4,
        }
    }
}

/// Repeat policy governing behavior at queue end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    None,
    All,
    One,
}

impl RepeatMode {
    /// none -> all -> one -> none
    pub fn next(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::None,
        }
    }
}

/// UI theme. Persisted alongside the library so the shell can restore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// A user playlist: named, ordered, duplicates rejected by track id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            tracks: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with_images(images: Vec<Option<String>>) -> Track {
        Track {
            id: "t1".to_string(),
            title: "Song".to_string(),
            artists: "Artist".to_string(),
            album: None,
            duration_secs: None,
            images,
            streams: Vec::new(),
        }
    }

    #[test]
    fn equality_is_keyed_on_id_only() {
        let a = Track {
            id: "same".to_string(),
            title: "Title A".to_string(),
            artists: "X".to_string(),
            album: Some("Album".to_string()),
            duration_secs: Some(100.0),
            images: Vec::new(),
            streams: Vec::new(),
        };
        let mut b = a.clone();
        b.title = "Completely different".to_string();
        b.duration_secs = None;
        assert_eq!(a, b);
    }

    #[test]
    fn image_url_picks_tier_then_falls_back() {
        let track = track_with_images(vec![
            Some("small.jpg".to_string()),
            None,
            Some("large.jpg".to_string()),
        ]);
        assert_eq!(track.image_url(Quality::Low), Some("small.jpg"));
        // Empty medium slot falls back to the best available candidate.
        assert_eq!(track.image_url(Quality::Medium), Some("large.jpg"));
        // Stream tiers above the image range clamp to the top image slot.
        assert_eq!(track.image_url(Quality::Highest), Some("large.jpg"));
    }

    #[test]
    fn image_url_empty_candidates() {
        let track = track_with_images(vec![None, None]);
        assert_eq!(track.image_url(Quality::High), None);
        let track = track_with_images(Vec::new());
        assert_eq!(track.image_url(Quality::High), None);
    }

    #[test]
    fn repeat_mode_cycles() {
        assert_eq!(RepeatMode::None.next(), RepeatMode::All);
        assert_eq!(RepeatMode::All.next(), RepeatMode::One);
        assert_eq!(RepeatMode::One.next(), RepeatMode::None);
    }
}
