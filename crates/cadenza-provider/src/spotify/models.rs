//! Spotify Web API response types.
//!
//! Only the fields cadenza reads are declared; serde ignores the rest.

use serde::Deserialize;

use cadenza_core::{AlbumRef, ArtistRef, FeatureVector, Track};

/// Type tag Spotify puts on every audio-features object.
const AUDIO_FEATURES_TYPE: &str = "audio_features";

#[derive(Debug, Deserialize)]
pub(crate) struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub artists: Paging<ArtistObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistObject {
    pub id: String,
    pub name: String,
}

impl From<ArtistObject> for ArtistRef {
    fn from(artist: ArtistObject) -> Self {
        ArtistRef::new(artist.id, artist.name)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SimpleArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumObject {
    pub id: String,
    pub name: String,
}

impl From<AlbumObject> for AlbumRef {
    fn from(album: AlbumObject) -> Self {
        AlbumRef::new(album.id, album.name)
    }
}

/// Track (or playlist episode) object.
///
/// Local files in playlists have a null `id`.
#[derive(Debug, Deserialize)]
pub(crate) struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

impl TrackObject {
    pub fn into_track(self) -> Option<Track> {
        let id = self.id?;
        Some(Track {
            id: id.into(),
            name: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeaturesObject>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AudioFeaturesObject {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub loudness: Option<f64>,
    pub speechiness: Option<f64>,
    pub valence: Option<f64>,
}

impl AudioFeaturesObject {
    /// The feature vector, if this is an audio-features record with all
    /// six dimensions present.
    pub fn into_vector(self) -> Option<FeatureVector> {
        if self.kind != AUDIO_FEATURES_TYPE {
            return None;
        }
        Some(FeatureVector {
            danceability: self.danceability?,
            energy: self.energy?,
            instrumentalness: self.instrumentalness?,
            loudness: self.loudness?,
            speechiness: self.speechiness?,
            valence: self.valence?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}
