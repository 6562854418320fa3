//! Raaga - playback queue and transport engine
//!
//! The core of a streaming music player: it owns what is playing, what is
//! next, and how the playback position is tracked, and it keeps that
//! logical state consistent with an external audio rendering resource that
//! can fail, stall, or finish asynchronously at any time.
//!
//! The crate is platform-agnostic. The three collaborators plug in via
//! traits:
//!
//! - [`model::Catalog`]: the remote catalog ([`model::CatalogClient`] is
//!   the bundled HTTP implementation)
//! - [`audio::AudioBackend`]: the audio rendering resource, reporting
//!   back over an [`audio::event_channel`]
//! - [`storage::Storage`]: durable persistence for the library and user
//!   settings ([`storage::JsonStorage`] is the bundled file
//!   implementation)
//!
//! A shell wires them together roughly like this:
//!
//! ```no_run
//! use std::sync::Arc;
//! use raaga::audio::{AudioBackend, event_channel};
//! use raaga::controller::PlayerController;
//! use raaga::model::{CatalogClient, PlayerModel, Quality};
//! use raaga::resolver::StreamResolver;
//! use raaga::storage::JsonStorage;
//!
//! # struct MySink;
//! # impl AudioBackend for MySink {
//! #     fn bind(&self, _url: &str, _token: u64) {}
//! #     fn play(&self) {}
//! #     fn pause(&self) {}
//! #     fn seek(&self, _position_secs: f64) {}
//! #     fn set_volume(&self, _volume: f64) {}
//! # }
//! # async fn wire() {
//! let storage = Arc::new(JsonStorage::new("state.json"));
//! let model = Arc::new(PlayerModel::new(storage));
//! model.restore().await;
//!
//! let (events_tx, events_rx) = event_channel();
//! # let _ = events_tx;
//! let backend = Arc::new(MySink);
//! let catalog = Arc::new(CatalogClient::new());
//! let controller = PlayerController::new(
//!     model,
//!     backend,
//!     catalog,
//!     StreamResolver::new(Quality::High),
//! );
//! controller.start_audio_event_listener(events_rx);
//! # }
//! ```

pub mod audio;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod resolver;
pub mod storage;

pub use audio::{AudioBackend, AudioEvent, AudioEventKind};
pub use controller::PlayerController;
pub use error::PlayerError;
pub use model::{PlayerModel, Quality, RepeatMode, Track};
pub use resolver::StreamResolver;
