//! Spotify Web API client.
//!
//! Implements [`MetadataProvider`] on top of the public Web API using the
//! client-credentials flow. Requests are rate limited client-side and
//! bounded by a request-level timeout; nothing is retried.

mod auth;
mod models;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use cadenza_core::{AlbumId, AlbumRef, ArtistId, ArtistRef, FeatureVector, Track, TrackId};

use crate::config::Config;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::MetadataProvider;
use crate::resilience::RateLimiter;

pub use auth::Credentials;
use auth::TokenCache;
use models::{
    AlbumObject, AudioFeaturesObject, AudioFeaturesResponse, Paging, PlaylistItem,
    SearchResponse, TrackObject,
};

pub(crate) const PROVIDER_NAME: &str = "Spotify";

const API_BASE: &str = "https://api.spotify.com/v1";

/// Largest page the playlist-items endpoint serves.
pub const MAX_PLAYLIST_PAGE: u32 = 100;

/// Largest page the artist-albums and album-tracks endpoints serve.
pub const MAX_ALBUM_PAGE: u32 = 50;

/// Tracks requested per album; Spotify's default page is only 20.
const ALBUM_TRACKS_PAGE: u32 = MAX_ALBUM_PAGE;

/// Spotify Web API client.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    tokens: Arc<TokenCache>,
    rate_limiter: RateLimiter,
    language: Option<String>,
    market: Option<String>,
}

impl SpotifyClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        credentials: Credentials,
        timeout: Duration,
        requests_per_second: u32,
    ) -> ProviderResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("cadenza/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            tokens: Arc::new(TokenCache::new(credentials)),
            rate_limiter: RateLimiter::new(requests_per_second),
            language: None,
            market: None,
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    /// Returns [`ProviderError::MissingCredentials`] when the client id or
    /// secret is not configured.
    pub fn from_config(config: &Config) -> ProviderResult<Self> {
        let (Some(id), Some(secret)) = (&config.spotify_client_id, &config.spotify_client_secret)
        else {
            return Err(ProviderError::MissingCredentials {
                provider: PROVIDER_NAME.to_string(),
            });
        };

        let client = Self::new(
            Credentials::new(id.as_str(), secret.as_str()),
            Duration::from_secs(config.request_timeout_secs),
            config.requests_per_second,
        )?;
        Ok(client
            .with_language(config.language.clone())
            .with_market(Some(config.market.clone())))
    }

    /// Ask for localised names (sent as `Accept-Language`).
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Restrict artist search to a market (ISO 3166-1 alpha-2).
    #[must_use]
    pub fn with_market(mut self, market: Option<String>) -> Self {
        self.market = market;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ProviderResult<T> {
        self.rate_limiter.acquire().await;
        let token = self.tokens.bearer(&self.http).await?;

        let mut request = self
            .http
            .get(format!("{API_BASE}{path}"))
            .bearer_auth(token)
            .query(query);
        if let Some(language) = &self.language {
            request = request.header(reqwest::header::ACCEPT_LANGUAGE, language.as_str());
        }

        log::debug!("GET {} {:?}", path, query);
        let response = request.send().await.map_err(transport_error)?;

        if let Some(err) = classify_status(response.status(), path) {
            if matches!(err, ProviderError::Auth { .. }) {
                self.tokens.invalidate().await;
            }
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| ProviderError::Parse {
            provider: PROVIDER_NAME.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MetadataProvider for SpotifyClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search_artist(&self, name: &str) -> ProviderResult<ArtistRef> {
        let mut query = vec![("q", name), ("type", "artist"), ("limit", "1")];
        if let Some(market) = &self.market {
            query.push(("market", market.as_str()));
        }
        let result: SearchResponse = self.get_json("/search", &query).await?;

        result
            .artists
            .items
            .into_iter()
            .next()
            .map(ArtistRef::from)
            .ok_or_else(|| ProviderError::not_found("artist", name))
    }

    async fn list_albums(&self, artist_id: &ArtistId, limit: u32) -> ProviderResult<Vec<AlbumRef>> {
        let limit = page_limit(limit, MAX_ALBUM_PAGE);
        let result: Paging<AlbumObject> = self
            .get_json(
                &format!("/artists/{artist_id}/albums"),
                &[("limit", limit.as_str())],
            )
            .await?;

        Ok(result.items.into_iter().map(AlbumRef::from).collect())
    }

    async fn list_tracks(&self, album_id: &AlbumId) -> ProviderResult<Vec<Track>> {
        let limit = page_limit(ALBUM_TRACKS_PAGE, MAX_ALBUM_PAGE);
        let result: Paging<TrackObject> = self
            .get_json(
                &format!("/albums/{album_id}/tracks"),
                &[("limit", limit.as_str())],
            )
            .await?;

        Ok(result
            .items
            .into_iter()
            .filter_map(TrackObject::into_track)
            .collect())
    }

    async fn audio_features(
        &self,
        track_ids: &[TrackId],
    ) -> ProviderResult<Vec<Option<FeatureVector>>> {
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = track_ids
            .iter()
            .map(TrackId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let result: AudioFeaturesResponse =
            self.get_json("/audio-features", &[("ids", ids.as_str())]).await?;

        Ok(result
            .audio_features
            .into_iter()
            .map(|f| f.and_then(AudioFeaturesObject::into_vector))
            .collect())
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        market: &str,
    ) -> ProviderResult<Vec<Track>> {
        let limit = page_limit(limit, MAX_PLAYLIST_PAGE);
        let result: Paging<PlaylistItem> = self
            .get_json(
                &format!("/playlists/{playlist_id}/tracks"),
                &[("limit", limit.as_str()), ("market", market)],
            )
            .await?;

        Ok(result
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(TrackObject::into_track))
            .collect())
    }
}

/// Map a failed send to a provider error, singling out timeouts.
pub(crate) fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider: PROVIDER_NAME.to_string(),
        }
    } else {
        ProviderError::Request(err)
    }
}

/// `limit` as a query value, kept within 1..=`max`.
fn page_limit(limit: u32, max: u32) -> String {
    limit.clamp(1, max).to_string()
}

/// The error for a non-success status, or `None` on success.
fn classify_status(status: StatusCode, resource: &str) -> Option<ProviderError> {
    if status.is_success() {
        return None;
    }

    let provider = PROVIDER_NAME.to_string();
    Some(match status {
        StatusCode::NOT_FOUND => ProviderError::not_found("resource", resource),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited { provider },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Auth {
            provider,
            message: status.to_string(),
        },
        _ => ProviderError::Http {
            provider,
            message: status.to_string(),
        },
    })
}
