use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::{AlbumId, ArtistId, TrackId};

/// A track as listed by the metadata provider.
///
/// Audio features are fetched separately and on demand; a `Track` never
/// carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,

    /// Credited artist names, in provider order.
    #[serde(default)]
    pub artists: Vec<String>,
}

impl Track {
    #[must_use]
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artists.push(artist.into());
        self
    }

    /// Whether the track name contains `query`, ignoring case.
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artists.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - {}", self.name, self.artists.join(", "))
        }
    }
}

/// Artist descriptor returned by a provider search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
}

impl ArtistRef {
    #[must_use]
    pub fn new(id: impl Into<ArtistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Album descriptor returned when listing an artist's releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: AlbumId,
    pub name: String,
}

impl AlbumRef {
    #[must_use]
    pub fn new(id: impl Into<AlbumId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
