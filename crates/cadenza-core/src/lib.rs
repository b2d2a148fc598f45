//! Core domain model for cadenza.
//!
//! This crate defines the track and audio-feature model shared by the
//! provider and CLI crates, and the similarity ranker that orders a
//! candidate pool by cosine similarity to a query track.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod rank;

pub use error::{Error, Result};
pub use model::{
    AlbumId, AlbumRef, ArtistId, ArtistRef, CandidatePool, FeatureVector, Track, TrackId,
};
pub use rank::{rank, RankedResult};
