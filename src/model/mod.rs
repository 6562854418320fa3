//! Model module - player state and data types
//!
//! This module contains all the data structures and state management for
//! the engine. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (tracks, quality tiers, repeat modes)
//! - `queue`: The play queue and its transition logic
//! - `playback`: Transport session state (load, position, volume)
//! - `library`: Liked tracks, recent plays, playlists, search history
//! - `catalog_client`: Catalog service contract and HTTP client
//! - `app_model`: The shared state object with async accessors

mod types;
mod queue;
mod playback;
mod library;
mod catalog_client;
mod app_model;

pub use types::{Playlist, Quality, RepeatMode, Theme, Track};

pub use queue::{AdvanceOutcome, PlayQueue, RetreatOutcome, RESTART_THRESHOLD_SECS};

pub use playback::{PlaybackSnapshot, TransportSession};

pub use library::{LibraryState, RECENT_CAP, SEARCH_HISTORY_CAP};

pub use catalog_client::{Catalog, CatalogClient, DEFAULT_BASE_URL};

pub use app_model::PlayerModel;
