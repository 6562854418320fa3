//! Stream URL resolution: quality-tier selection with graceful degradation
//!
//! A track carries stream candidates ordered by ascending quality. The
//! resolver picks the requested tier, degrades to the best tier at or below
//! it, then to any candidate at all. If the best it can find is a catalog
//! web page rather than a direct stream, it is allowed one details lookup
//! against the catalog to refresh the candidates before giving up.

use crate::error::PlayerError;
use crate::model::{Catalog, Quality, Track};

/// Default page-vs-stream heuristic: a URL with a media-file extension is a
/// stream; otherwise the catalog's `/song/` page shape marks it as a page.
/// The heuristic is deliberately replaceable, not load-bearing.
pub fn looks_like_page_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    const MEDIA_EXTENSIONS: [&str; 7] =
        [".mp3", ".mp4", ".m4a", ".aac", ".ogg", ".flac", ".wav"];
    if MEDIA_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }
    path.contains("/song/")
}

pub struct StreamResolver {
    quality: Quality,
    page_url_matcher: fn(&str) -> bool,
}

impl StreamResolver {
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            page_url_matcher: looks_like_page_url,
        }
    }

    /// Swap the page-URL heuristic.
    pub fn with_page_url_matcher(mut self, matcher: fn(&str) -> bool) -> Self {
        self.page_url_matcher = matcher;
        self
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Pure candidate selection. Returns `None` only when the track has no
    /// candidate at all; callers must treat that as unplayable.
    pub fn pick<'a>(&self, track: &'a Track) -> Option<&'a str> {
        let at = |i: usize| track.streams.get(i).and_then(|c| c.as_deref());
        let requested = self.quality.index();

        if let Some(url) = at(requested) {
            return Some(url);
        }
        // Best tier at or below the requested one.
        for i in (0..requested.min(track.streams.len())).rev() {
            if let Some(url) = at(i) {
                return Some(url);
            }
        }
        // Anything, best first.
        for i in (0..track.streams.len()).rev() {
            if let Some(url) = at(i) {
                return Some(url);
            }
        }
        None
    }

    /// Resolve a directly streamable URL, spending at most one catalog
    /// details lookup when the only candidate is a catalog page.
    pub async fn resolve_playable(
        &self,
        track: &Track,
        catalog: &dyn Catalog,
    ) -> Result<String, PlayerError> {
        let unplayable = || PlayerError::ResolutionFailure {
            track_id: track.id.clone(),
        };

        let Some(candidate) = self.pick(track) else {
            return Err(unplayable());
        };
        if !(self.page_url_matcher)(candidate) {
            return Ok(candidate.to_string());
        }

        tracing::debug!(
            track_id = %track.id,
            candidate,
            "best candidate is a catalog page, refreshing via details lookup"
        );
        match catalog.track_details(&track.id).await {
            Ok(fresh) => {
                if let Some(url) = self.pick(&fresh) {
                    if !(self.page_url_matcher)(url) {
                        return Ok(url.to_string());
                    }
                }
            }
            Err(e) => {
                tracing::warn!(track_id = %track.id, error = %e, "details lookup failed");
            }
        }
        Err(unplayable())
    }
}

impl Default for StreamResolver {
    fn default() -> Self {
        Self::new(Quality::default())
    }
}
