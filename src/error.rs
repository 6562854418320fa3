//! Error types for the playback engine

use thiserror::Error;

/// Structured outcomes surfaced to the caller/UI layer.
///
/// None of these corrupt persisted state, and none clear the queue or the
/// current selection; the view decides how to present them.
#[derive(Debug, Clone, Error)]
pub enum PlayerError {
    /// No playable stream URL could be obtained for a track. Playback for
    /// that track stops; the queue position is kept so the user can retry
    /// or skip explicitly.
    #[error("no playable stream for track {track_id}")]
    ResolutionFailure { track_id: String },

    /// The audio resource reported an error after a successful bind.
    #[error("playback failed: {detail}")]
    Playback { detail: String },

    /// An operation referenced an out-of-range queue position.
    #[error("queue index {index} out of range")]
    InvalidIndex { index: usize },

    /// A library operation referenced a playlist or track that no longer
    /// exists. Treated as a no-op by the store, never escalated.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A catalog request failed (network or malformed response).
    #[error("catalog request failed: {detail}")]
    Catalog { detail: String },
}
