//! Catalog service client
//!
//! The remote catalog resolves free-text searches and track ids into
//! [`Track`] records. The engine consumes the minimum surface via the
//! [`Catalog`] trait; [`CatalogClient`] is the HTTP implementation against
//! the JioSaavn-style REST API the player was built for.
//!
//! Catalog responses are loosely shaped: artists, artwork and stream
//! candidates each appear in several historical formats, so normalization
//! here is deliberately tolerant.

use anyhow::{Result, bail};
use futures::future::BoxFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::Track;

/// Known-good public endpoint. Deployments can point [`CatalogClient`] at a
/// mirror when this one degrades.
pub const DEFAULT_BASE_URL: &str = "https://saavn.dev";

const SEARCH_PAGE_SIZE: u32 = 20;

/// Minimum catalog surface the engine consumes.
pub trait Catalog: Send + Sync {
    /// First page of track results for a free-text query.
    fn search_tracks<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Track>>>;

    /// Full record for one track, used by the resolver's secondary lookup.
    fn track_details<'a>(&'a self, track_id: &'a str) -> BoxFuture<'a, Result<Track>>;
}

/// HTTP catalog client.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "catalog request");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("catalog returned HTTP {status}");
        }
        Ok(response.json::<T>().await?)
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for CatalogClient {
    fn search_tracks<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Track>>> {
        Box::pin(async move {
            let path = format!(
                "/api/search/songs?query={}&page=1&limit={SEARCH_PAGE_SIZE}",
                urlencoding::encode(query)
            );
            let envelope: Envelope<SearchPage> = self.get_json(&path).await?;
            let tracks: Vec<Track> = envelope
                .data
                .results
                .into_iter()
                .map(ApiSong::into_track)
                .collect();
            tracing::debug!(query, count = tracks.len(), "search results");
            Ok(tracks)
        })
    }

    fn track_details<'a>(&'a self, track_id: &'a str) -> BoxFuture<'a, Result<Track>> {
        Box::pin(async move {
            let path = format!("/api/songs/{track_id}");
            let envelope: Envelope<Vec<ApiSong>> = self.get_json(&path).await?;
            let song = envelope
                .data
                .into_iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("track {track_id} missing from catalog response"))?;
            Ok(song.into_track())
        })
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<ApiSong>,
}

#[derive(Deserialize)]
struct ApiSong {
    id: String,
    name: String,
    #[serde(default)]
    duration: Option<Value>,
    #[serde(default)]
    album: Option<ApiAlbum>,
    #[serde(default, rename = "primaryArtists")]
    primary_artists: Option<String>,
    #[serde(default)]
    artists: Option<ApiArtists>,
    #[serde(default)]
    image: Option<Value>,
    #[serde(default, rename = "downloadUrl")]
    download_url: Option<Value>,
    /// Catalog page link; only a last-resort stream candidate.
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct ApiAlbum {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct ApiArtists {
    #[serde(default)]
    primary: Vec<ApiArtistRef>,
}

#[derive(Deserialize)]
struct ApiArtistRef {
    name: String,
}

impl ApiSong {
    fn into_track(self) -> Track {
        let artists = self
            .primary_artists
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.artists.and_then(|a| {
                    let joined = a
                        .primary
                        .iter()
                        .map(|r| r.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    (!joined.is_empty()).then_some(joined)
                })
            })
            .unwrap_or_else(|| "Unknown Artist".to_string());

        let mut streams = candidate_list(self.download_url);
        if streams.iter().all(Option::is_none) {
            if let Some(page) = self.url {
                streams = vec![Some(page)];
            }
        }

        Track {
            id: self.id,
            title: self.name,
            artists,
            album: self.album.and_then(|a| a.name),
            duration_secs: self.duration.as_ref().and_then(parse_duration),
            images: candidate_list(self.image),
            streams,
        }
    }
}

/// Seconds come back as a number or a numeric string depending on endpoint.
fn parse_duration(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A candidate field may be a bare URL string, one link object, or an
/// ordered array of link objects (ascending quality). Slot order is
/// preserved; unusable slots stay empty.
fn candidate_list(value: Option<Value>) -> Vec<Option<String>> {
    match value {
        None => Vec::new(),
        Some(Value::String(s)) if !s.is_empty() => vec![Some(s)],
        Some(Value::Array(items)) => items.into_iter().map(extract_url).collect(),
        Some(other) => vec![extract_url(other)],
    }
}

fn extract_url(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Object(map) => ["url", "link", "src"].iter().find_map(|key| {
            map.get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }),
        _ => None,
    }
}
