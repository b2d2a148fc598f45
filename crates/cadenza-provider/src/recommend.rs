//! Similar-track recommendation.
//!
//! Resolves a song, fetches its audio features, builds the candidate pool
//! from the top tracks playlist and ranks it. Every step hits the
//! provider afresh; nothing is cached between calls.

use std::sync::Arc;

use serde::Serialize;

use cadenza_core::{rank, CandidatePool, FeatureVector, RankedResult, Track};

use crate::config::Config;
use crate::error::ProviderResult;
use crate::extract::FeatureExtractor;
use crate::lookup::find_song;
use crate::provider::MetadataProvider;
use crate::spotify::{MAX_ALBUM_PAGE, MAX_PLAYLIST_PAGE};

/// Where the candidate pool comes from and how far song lookup searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendSettings {
    pub playlist_id: String,
    pub market: String,
    pub top_tracks_limit: u32,
    pub album_limit: u32,
}

impl From<&Config> for RecommendSettings {
    /// Limits outside what the provider pages support are clamped.
    fn from(config: &Config) -> Self {
        Self {
            playlist_id: config.top_tracks_playlist_id.clone(),
            market: config.market.clone(),
            top_tracks_limit: clamp_limit(
                "top_tracks_limit",
                config.top_tracks_limit,
                MAX_PLAYLIST_PAGE,
            ),
            album_limit: clamp_limit("album_limit", config.album_limit, MAX_ALBUM_PAGE),
        }
    }
}

fn clamp_limit(key: &str, value: u32, max: u32) -> u32 {
    let clamped = value.clamp(1, max);
    if clamped != value {
        log::warn!("{} = {} is out of range 1..={}, using {}", key, value, max, clamped);
    }
    clamped
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// A resolved song and the tracks most similar to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub song: Track,
    pub features: FeatureVector,
    pub similar: Vec<RankedResult>,
}

/// Runs lookups, extraction and ranking against one provider.
#[derive(Debug, Clone)]
pub struct Recommender {
    provider: Arc<dyn MetadataProvider>,
    extractor: FeatureExtractor,
    settings: RecommendSettings,
}

impl Recommender {
    pub fn new(provider: Arc<dyn MetadataProvider>, settings: RecommendSettings) -> Self {
        Self {
            extractor: FeatureExtractor::new(Arc::clone(&provider)),
            provider,
            settings,
        }
    }

    pub fn settings(&self) -> &RecommendSettings {
        &self.settings
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Tracks of the configured top tracks playlist.
    pub async fn top_tracks(&self) -> ProviderResult<Vec<Track>> {
        let tracks = self
            .provider
            .playlist_tracks(
                &self.settings.playlist_id,
                self.settings.top_tracks_limit,
                &self.settings.market,
            )
            .await?;
        log::debug!(
            "Fetched {} tracks from playlist {}",
            tracks.len(),
            self.settings.playlist_id
        );
        Ok(tracks)
    }

    /// Resolve a song by artist and title fragment.
    pub async fn find_song(&self, artist: &str, song: &str) -> ProviderResult<Track> {
        find_song(
            self.provider.as_ref(),
            artist,
            song,
            self.settings.album_limit,
        )
        .await
    }

    /// Top tracks that carry audio features.
    pub async fn candidate_pool(&self) -> ProviderResult<CandidatePool> {
        let tracks = self.top_tracks().await?;
        self.extractor.candidate_pool(tracks).await
    }

    /// The `k` top tracks most similar to `song` by `artist`.
    ///
    /// # Errors
    /// Not-found errors when the song or its features cannot be found;
    /// provider failures are passed through unchanged.
    pub async fn recommend(
        &self,
        artist: &str,
        song: &str,
        k: usize,
    ) -> ProviderResult<Recommendation> {
        let song = self.find_song(artist, song).await?;
        let features = self.extractor.features_for(&song.id).await?;
        let pool = self.candidate_pool().await?;

        let similar = rank(&features, pool.as_slice(), k);
        log::info!(
            "Ranked {} candidates for '{}', returning {}",
            pool.len(),
            song.name,
            similar.len()
        );

        Ok(Recommendation {
            song,
            features,
            similar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryProvider;
    use cadenza_core::{AlbumRef, ArtistRef};

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            market: "US".to_string(),
            album_limit: 3,
            ..Config::default()
        };
        let settings = RecommendSettings::from(&config);
        assert_eq!(settings.market, "US");
        assert_eq!(settings.album_limit, 3);
        assert_eq!(settings.top_tracks_limit, 50);
    }

    #[test]
    fn test_settings_clamp_limits() {
        let too_big = Config {
            top_tracks_limit: 500,
            album_limit: 200,
            ..Config::default()
        };
        let settings = RecommendSettings::from(&too_big);
        assert_eq!(settings.top_tracks_limit, 100);
        assert_eq!(settings.album_limit, 50);

        let zero = Config {
            top_tracks_limit: 0,
            album_limit: 0,
            ..Config::default()
        };
        let settings = RecommendSettings::from(&zero);
        assert_eq!(settings.top_tracks_limit, 1);
        assert_eq!(settings.album_limit, 1);
    }

    #[tokio::test]
    async fn test_recommend_ranks_playlist() {
        let provider = InMemoryProvider::new()
            .with_artist(
                ArtistRef::new("ar1", "Artist"),
                vec![(AlbumRef::new("al1", "Album"), vec![Track::new("q", "Query Song")])],
            )
            .with_features("q", FeatureVector::from_array([0.8, 0.7, 0.0, -5.0, 0.05, 0.6]))
            .with_features("a", FeatureVector::from_array([0.8, 0.7, 0.0, -5.0, 0.05, 0.6]))
            .with_features("b", FeatureVector::from_array([0.1, 0.9, 0.5, -20.0, 0.3, 0.1]))
            .with_features("c", FeatureVector::from_array([0.79, 0.71, 0.01, -5.1, 0.06, 0.59]))
            .with_playlist(
                "top",
                vec![Track::new("a", "A"), Track::new("b", "B"), Track::new("c", "C")],
            );
        let settings = RecommendSettings {
            playlist_id: "top".to_string(),
            ..RecommendSettings::default()
        };
        let recommender = Recommender::new(Arc::new(provider), settings);

        let rec = recommender.recommend("artist", "query", 2).await.unwrap();
        assert_eq!(rec.song.id.as_str(), "q");

        let ids: Vec<&str> = rec.similar.iter().map(|r| r.track.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
