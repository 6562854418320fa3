//! Debounced catalog search

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::error::PlayerError;

use super::PlayerController;

/// Window gating how quickly repeated keystrokes trigger network work.
/// A timing contract, not a correctness one.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

impl PlayerController {
    /// Keystroke path: schedule a search after the debounce window. A newer
    /// call supersedes any still-pending one.
    pub fn search_input_changed(&self, query: String) {
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SEARCH_DEBOUNCE).await;
            if controller.search_seq.load(Ordering::SeqCst) != seq {
                tracing::trace!(query = %query, "debounced search superseded");
                return;
            }
            controller.run_search(&query).await;
        });
    }

    /// Run a search now, recording it into search history.
    pub async fn run_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.model.set_search_results(Vec::new()).await;
            return;
        }

        self.model.record_search(query).await;
        match self.catalog.search_tracks(query).await {
            Ok(tracks) => {
                tracing::debug!(query, count = tracks.len(), "search complete");
                self.model.set_search_results(tracks).await;
            }
            Err(e) => {
                self.model
                    .set_error(PlayerError::Catalog {
                        detail: e.to_string(),
                    })
                    .await;
            }
        }
    }
}
