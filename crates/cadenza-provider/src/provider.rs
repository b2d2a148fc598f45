//! The metadata provider interface.

use async_trait::async_trait;

use cadenza_core::{AlbumId, AlbumRef, ArtistId, ArtistRef, FeatureVector, Track, TrackId};

use crate::error::ProviderResult;

/// A remote music-metadata service.
///
/// Every call may fail with a transient network error or a not-found
/// error. Implementations perform no retries; failures go straight back
/// to the caller.
#[async_trait]
pub trait MetadataProvider: Send + Sync + std::fmt::Debug {
    /// Human-readable provider name used in logs and errors.
    fn name(&self) -> &str;

    /// First artist matching `name`.
    async fn search_artist(&self, name: &str) -> ProviderResult<ArtistRef>;

    /// Up to `limit` albums of an artist, in provider order.
    async fn list_albums(&self, artist_id: &ArtistId, limit: u32) -> ProviderResult<Vec<AlbumRef>>;

    /// Tracks of an album, in album order.
    async fn list_tracks(&self, album_id: &AlbumId) -> ProviderResult<Vec<Track>>;

    /// Audio features aligned to `track_ids`; `None` where the provider
    /// has no data for an id.
    async fn audio_features(&self, track_ids: &[TrackId])
        -> ProviderResult<Vec<Option<FeatureVector>>>;

    /// Up to `limit` tracks of a playlist as available in `market`.
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        market: &str,
    ) -> ProviderResult<Vec<Track>>;
}
