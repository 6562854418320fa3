//! Play queue: ordered sequence, current position, shuffle and repeat policy
//!
//! All transition logic lives here as pure, synchronous methods; the
//! controller decides what each outcome means for the audio resource.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PlayerError;
use super::types::{RepeatMode, Track};

/// "Previous" restarts the current track once playback is meaningfully
/// under way; under this threshold it moves to the prior track.
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Result of [`PlayQueue::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Position moved (including a wrap to 0 under repeat-all). The current
    /// track changed, or was reloaded from the top of the queue.
    Moved,
    /// Repeat-one at the last index: same position, replay the track.
    Replay,
    /// End of queue with repeat off: playback intent stops, position stays
    /// at the last index.
    Exhausted,
}

/// Result of [`PlayQueue::retreat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetreatOutcome {
    /// Position moved to the previous index (or wrapped to the last).
    Moved,
    /// Playback was far enough in that "previous" means restart from 0.
    Restart,
}

/// The ordered play sequence and its policy flags.
pub struct PlayQueue {
    order: Vec<Track>,
    /// Pre-shuffle order, used to restore exactly when shuffle turns off.
    base_order: Vec<Track>,
    position: Option<usize>,
    shuffled: bool,
    repeat: RepeatMode,
    rng: StdRng,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Inject the random source so shuffle is deterministic in tests.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            order: Vec::new(),
            base_order: Vec::new(),
            position: None,
            shuffled: false,
            repeat: RepeatMode::None,
            rng,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn current(&self) -> Option<&Track> {
        self.position.and_then(|p| self.order.get(p))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current().map(|t| t.id.as_str())
    }

    /// Replace the whole queue. `start` is clamped into range; passing a
    /// start index with an empty track list is an error, an empty list
    /// alone just clears the queue. Shuffle is reset.
    pub fn set_queue(
        &mut self,
        tracks: Vec<Track>,
        start: Option<usize>,
    ) -> Result<(), PlayerError> {
        if tracks.is_empty() {
            if let Some(index) = start {
                return Err(PlayerError::InvalidIndex { index });
            }
            self.order.clear();
            self.base_order.clear();
            self.position = None;
            self.shuffled = false;
            return Ok(());
        }

        let position = start.unwrap_or(0).min(tracks.len() - 1);
        self.base_order = tracks.clone();
        self.order = tracks;
        self.position = Some(position);
        self.shuffled = false;
        Ok(())
    }

    /// Append a track. Does not move the position; an empty queue stays
    /// without a current track until `set_queue` or `advance` style
    /// operations establish one.
    pub fn enqueue(&mut self, track: Track) {
        // Enqueueing onto an empty queue starts a new one, so the restore
        // snapshot must include the track even with shuffle still toggled.
        if !self.shuffled || self.order.is_empty() {
            self.base_order.push(track.clone());
        }
        self.order.push(track);
        if self.position.is_none() {
            self.position = Some(0);
        }
    }

    /// Remove the entry at `index`. Out-of-range indices are a no-op.
    ///
    /// Removing before the current track keeps the current track unchanged;
    /// removing the current track selects its closest successor (the entry
    /// now occupying the same index), clamping back at the tail.
    pub fn dequeue(&mut self, index: usize) -> Option<Track> {
        if index >= self.order.len() {
            return None;
        }
        let removed = self.order.remove(index);

        if self.shuffled {
            if let Some(pos) = self.base_order.iter().position(|t| t.id == removed.id) {
                self.base_order.remove(pos);
            }
        } else {
            self.base_order.remove(index);
        }

        self.position = match self.position {
            Some(p) if index < p => Some(p - 1),
            Some(p) if index == p => {
                if self.order.is_empty() {
                    None
                } else {
                    Some(p.min(self.order.len() - 1))
                }
            }
            other => other,
        };

        Some(removed)
    }

    /// Move to the next track, honoring the repeat policy at the end of
    /// the queue.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let Some(position) = self.position else {
            return AdvanceOutcome::Exhausted;
        };

        let next = position + 1;
        if next < self.order.len() {
            self.position = Some(next);
            return AdvanceOutcome::Moved;
        }

        match self.repeat {
            RepeatMode::All => {
                self.position = Some(0);
                AdvanceOutcome::Moved
            }
            RepeatMode::One => AdvanceOutcome::Replay,
            RepeatMode::None => AdvanceOutcome::Exhausted,
        }
    }

    /// Move to the previous track, or signal a restart when the current
    /// track has played past [`RESTART_THRESHOLD_SECS`].
    pub fn retreat(&mut self, elapsed_secs: f64) -> RetreatOutcome {
        if elapsed_secs > RESTART_THRESHOLD_SECS {
            return RetreatOutcome::Restart;
        }
        let Some(position) = self.position else {
            return RetreatOutcome::Restart;
        };
        self.position = Some(if position > 0 {
            position - 1
        } else {
            self.order.len() - 1
        });
        RetreatOutcome::Moved
    }

    /// Toggle shuffle. Turning it on snapshots the order, pins the current
    /// track at slot 0 and permutes the rest; turning it off restores the
    /// snapshot and re-locates the current track by id.
    pub fn toggle_shuffle(&mut self) {
        if !self.shuffled {
            self.base_order = self.order.clone();
            if let Some(position) = self.position {
                self.order.swap(0, position);
                self.position = Some(0);
            }
            // Fisher-Yates over slots 1..end, keeping the current track put.
            for i in (2..self.order.len()).rev() {
                let j = self.rng.gen_range(1..=i);
                self.order.swap(i, j);
            }
            self.shuffled = true;
        } else {
            let current_id = self.current_id().map(str::to_owned);
            self.order = self.base_order.clone();
            self.position = if self.order.is_empty() {
                None
            } else {
                let found = current_id
                    .and_then(|id| self.order.iter().position(|t| t.id == id));
                Some(found.unwrap_or(0))
            };
            self.shuffled = false;
        }
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.repeat
    }

    /// Re-apply persisted policy flags at startup. The queue itself is
    /// ephemeral, so the shuffle flag only takes effect once a queue is set.
    pub fn restore_policy(&mut self, shuffled: bool, repeat: RepeatMode) {
        self.shuffled = shuffled;
        self.repeat = repeat;
    }
}

impl Default for PlayQueue {
    fn default() -> Self {
        Self::new()
    }
}
