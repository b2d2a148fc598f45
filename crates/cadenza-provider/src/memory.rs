//! In-memory metadata provider.
//!
//! Serves a fixed catalog with no network access. Used by tests and for
//! exercising the recommendation flow offline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use cadenza_core::{AlbumId, AlbumRef, ArtistId, ArtistRef, FeatureVector, Track, TrackId};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::MetadataProvider;

const PROVIDER_NAME: &str = "in-memory";

/// A provider backed by in-memory maps.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    artists: Vec<ArtistRef>,
    albums: HashMap<ArtistId, Vec<AlbumRef>>,
    album_tracks: HashMap<AlbumId, Vec<Track>>,
    features: HashMap<TrackId, FeatureVector>,
    playlists: HashMap<String, Vec<Track>>,
    unavailable: AtomicBool,
    feature_requests: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artist with its albums and their tracks.
    #[must_use]
    pub fn with_artist(mut self, artist: ArtistRef, albums: Vec<(AlbumRef, Vec<Track>)>) -> Self {
        let refs = albums
            .into_iter()
            .map(|(album, tracks)| {
                self.album_tracks.insert(album.id.clone(), tracks);
                album
            })
            .collect();
        self.albums.insert(artist.id.clone(), refs);
        self.artists.push(artist);
        self
    }

    /// Register audio features for a track.
    #[must_use]
    pub fn with_features(mut self, track_id: impl Into<TrackId>, features: FeatureVector) -> Self {
        self.features.insert(track_id.into(), features);
        self
    }

    /// Register a playlist.
    #[must_use]
    pub fn with_playlist(mut self, playlist_id: impl Into<String>, tracks: Vec<Track>) -> Self {
        self.playlists.insert(playlist_id.into(), tracks);
        self
    }

    /// Make every subsequent call fail as if the provider were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `audio_features` calls served so far.
    pub fn feature_requests(&self) -> usize {
        self.feature_requests.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> ProviderResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProviderError::Http {
                provider: PROVIDER_NAME.to_string(),
                message: "503 Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search_artist(&self, name: &str) -> ProviderResult<ArtistRef> {
        self.check_available()?;
        let needle = name.to_lowercase();
        self.artists
            .iter()
            .find(|a| a.name.to_lowercase().contains(&needle))
            .cloned()
            .ok_or_else(|| ProviderError::not_found("artist", name))
    }

    async fn list_albums(&self, artist_id: &ArtistId, limit: u32) -> ProviderResult<Vec<AlbumRef>> {
        self.check_available()?;
        let albums = self
            .albums
            .get(artist_id)
            .ok_or_else(|| ProviderError::not_found("artist", artist_id.as_str()))?;
        Ok(albums.iter().take(limit as usize).cloned().collect())
    }

    async fn list_tracks(&self, album_id: &AlbumId) -> ProviderResult<Vec<Track>> {
        self.check_available()?;
        self.album_tracks
            .get(album_id)
            .cloned()
            .ok_or_else(|| ProviderError::not_found("album", album_id.as_str()))
    }

    async fn audio_features(
        &self,
        track_ids: &[TrackId],
    ) -> ProviderResult<Vec<Option<FeatureVector>>> {
        self.check_available()?;
        self.feature_requests.fetch_add(1, Ordering::SeqCst);
        Ok(track_ids
            .iter()
            .map(|id| self.features.get(id).copied())
            .collect())
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        _market: &str,
    ) -> ProviderResult<Vec<Track>> {
        self.check_available()?;
        let tracks = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| ProviderError::not_found("playlist", playlist_id))?;
        Ok(tracks.iter().take(limit as usize).cloned().collect())
    }
}
