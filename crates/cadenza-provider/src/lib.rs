//! Metadata provider access for cadenza.
//!
//! Defines the [`MetadataProvider`] interface and its Spotify Web API
//! implementation, extracts audio-feature vectors for tracks, and wires
//! song lookup, candidate pool extraction and similarity ranking into a
//! single [`Recommender`].

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod memory;
pub mod provider;
pub mod recommend;
pub mod resilience;
pub mod spotify;

pub use config::Config;
pub use error::{ProviderError, ProviderResult};
pub use extract::FeatureExtractor;
pub use memory::InMemoryProvider;
pub use provider::MetadataProvider;
pub use recommend::{RecommendSettings, Recommendation, Recommender};
pub use spotify::SpotifyClient;
