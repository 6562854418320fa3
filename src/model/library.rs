//! Library and history: liked tracks, recent plays, playlists, search history
//!
//! Pure collection state; the owning model persists it write-through after
//! every mutation.

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use super::types::{Playlist, Track};

/// Most-recent-first recent-plays bound.
pub const RECENT_CAP: usize = 50;
/// Most-recent-first search-history bound.
pub const SEARCH_HISTORY_CAP: usize = 10;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LibraryState {
    /// Liked tracks, insertion order preserved for display.
    liked: Vec<Track>,
    /// Recent plays, newest first, deduplicated by id.
    recent: Vec<Track>,
    playlists: Vec<Playlist>,
    /// Committed search queries, newest first, deduplicated.
    search_history: Vec<String>,
}

impl LibraryState {
    pub fn liked(&self) -> &[Track] {
        &self.liked
    }

    pub fn recent(&self) -> &[Track] {
        &self.recent
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn search_history(&self) -> &[String] {
        &self.search_history
    }

    pub fn is_liked(&self, track_id: &str) -> bool {
        self.liked.iter().any(|t| t.id == track_id)
    }

    /// Like or unlike a track. Returns the new liked status.
    pub fn toggle_liked(&mut self, track: Track) -> bool {
        if let Some(pos) = self.liked.iter().position(|t| t.id == track.id) {
            self.liked.remove(pos);
            false
        } else {
            self.liked.push(track);
            true
        }
    }

    /// Front-insert into recent plays, dropping any older entry with the
    /// same id and trimming to [`RECENT_CAP`].
    pub fn record_play(&mut self, track: Track) {
        self.recent.retain(|t| t.id != track.id);
        self.recent.insert(0, track);
        self.recent.truncate(RECENT_CAP);
    }

    pub fn create_playlist(&mut self, name: impl Into<String>) -> Playlist {
        let playlist = Playlist::new(name);
        self.playlists.push(playlist.clone());
        playlist
    }

    pub fn add_to_playlist(&mut self, playlist_id: &str, track: Track) -> Result<(), PlayerError> {
        let playlist = self.playlist_mut(playlist_id)?;
        if !playlist.tracks.iter().any(|t| t.id == track.id) {
            playlist.tracks.push(track);
        }
        Ok(())
    }

    pub fn remove_from_playlist(
        &mut self,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), PlayerError> {
        let playlist = self.playlist_mut(playlist_id)?;
        playlist.tracks.retain(|t| t.id != track_id);
        Ok(())
    }

    pub fn delete_playlist(&mut self, playlist_id: &str) -> Result<(), PlayerError> {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != playlist_id);
        if self.playlists.len() == before {
            return Err(PlayerError::NotFound {
                entity: "playlist",
                id: playlist_id.to_string(),
            });
        }
        Ok(())
    }

    /// Front-insert a committed query, deduplicated, trimmed to
    /// [`SEARCH_HISTORY_CAP`].
    pub fn record_search(&mut self, query: &str) {
        self.search_history.retain(|q| q != query);
        self.search_history.insert(0, query.to_string());
        self.search_history.truncate(SEARCH_HISTORY_CAP);
    }

    pub fn clear_search_history(&mut self) {
        self.search_history.clear();
    }

    fn playlist_mut(&mut self, playlist_id: &str) -> Result<&mut Playlist, PlayerError> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or(PlayerError::NotFound {
                entity: "playlist",
                id: playlist_id.to_string(),
            })
    }
}
