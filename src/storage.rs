//! Durable persistence for the library and user settings
//!
//! Loaded once at startup, saved write-through after every mutation of the
//! persisted subset. The queue and transport session are deliberately not
//! part of this: they are process-lifetime state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{LibraryState, RepeatMode, Theme};

fn default_volume() -> f64 {
    1.0
}

/// The subset of player state that survives restarts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub shuffled: bool,
    #[serde(default)]
    pub repeat: RepeatMode,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub library: LibraryState,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            shuffled: false,
            repeat: RepeatMode::None,
            theme: Theme::Dark,
            library: LibraryState::default(),
        }
    }
}

/// Persistence collaborator. The engine only needs load-once and
/// save-on-mutation.
pub trait Storage: Send + Sync {
    /// Read the persisted subset. `Ok(None)` means a fresh profile.
    fn load(&self) -> Result<Option<PersistedState>>;
    fn save(&self, state: &PersistedState) -> Result<()>;
}

/// JSON file storage.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content)?;
        Ok(Some(state))
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artists: "Test Artist".to_string(),
            album: None,
            duration_secs: Some(120.0),
            images: vec![Some("img.jpg".to_string())],
            streams: vec![None, Some("stream.mp3".to_string())],
        }
    }

    #[test]
    fn load_missing_file_is_fresh_profile() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("state.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("nested/state.json"));

        let mut state = PersistedState {
            volume: 0.35,
            shuffled: true,
            repeat: RepeatMode::All,
            theme: Theme::Light,
            library: LibraryState::default(),
        };
        state.library.toggle_liked(track("a"));
        state.library.record_play(track("b"));
        state.library.record_search("some query");
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap().expect("state was saved");
        assert_eq!(loaded.volume, 0.35);
        assert!(loaded.shuffled);
        assert_eq!(loaded.repeat, RepeatMode::All);
        assert_eq!(loaded.theme, Theme::Light);
        assert!(loaded.library.is_liked("a"));
        assert_eq!(loaded.library.recent()[0].id, "b");
        assert_eq!(loaded.library.search_history()[0], "some query");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{}").unwrap();

        let loaded = JsonStorage::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.volume, 1.0);
        assert_eq!(loaded.repeat, RepeatMode::None);
        assert_eq!(loaded.theme, Theme::Dark);
        assert!(loaded.library.liked().is_empty());
    }
}
