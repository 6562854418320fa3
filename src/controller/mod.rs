//! Controller module - coordinating logic
//!
//! The controller keeps the audio resource's bound source, play state,
//! position and volume consistent with the queue and user intent, across
//! the asynchronous notifications the resource emits. It is organized into
//! submodules by responsibility:
//!
//! - `playback`: transport commands and current-track synchronization
//! - `player_events`: the audio resource notification loop
//! - `search`: debounced catalog search

mod playback;
mod player_events;
mod search;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::audio::AudioBackend;
use crate::model::{Catalog, PlayerModel};
use crate::resolver::StreamResolver;

pub use search::SEARCH_DEBOUNCE;

#[derive(Clone)]
pub struct PlayerController {
    pub(crate) model: Arc<PlayerModel>,
    pub(crate) backend: Arc<dyn AudioBackend>,
    pub(crate) catalog: Arc<dyn Catalog>,
    pub(crate) resolver: Arc<StreamResolver>,
    /// Generation counter for debounced searches; newer keystrokes
    /// supersede pending ones.
    pub(crate) search_seq: Arc<AtomicU64>,
}

impl PlayerController {
    pub fn new(
        model: Arc<PlayerModel>,
        backend: Arc<dyn AudioBackend>,
        catalog: Arc<dyn Catalog>,
        resolver: StreamResolver,
    ) -> Self {
        Self {
            model,
            backend,
            catalog,
            resolver: Arc::new(resolver),
            search_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn model(&self) -> &Arc<PlayerModel> {
        &self.model
    }
}
