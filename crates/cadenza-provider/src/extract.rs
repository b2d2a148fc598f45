//! Feature vector extraction.
//!
//! Maps track identifiers to audio-feature vectors through a
//! [`MetadataProvider`] and builds ranked-ready candidate pools. One
//! provider call is made per batch of up to [`MAX_FEATURE_BATCH`] ids,
//! issued sequentially.

use std::sync::Arc;

use cadenza_core::{CandidatePool, FeatureVector, Track, TrackId};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::MetadataProvider;

/// Most ids the audio-features endpoint accepts per request.
pub const MAX_FEATURE_BATCH: usize = 100;

/// Fetches audio-feature vectors for tracks.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    provider: Arc<dyn MetadataProvider>,
}

impl FeatureExtractor {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Audio features of a single track.
    ///
    /// # Errors
    /// [`ProviderError::NotFound`] when the provider has no feature data
    /// for `track_id`; any provider failure otherwise.
    pub async fn features_for(&self, track_id: &TrackId) -> ProviderResult<FeatureVector> {
        let features = self
            .provider
            .audio_features(std::slice::from_ref(track_id))
            .await?;

        features
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ProviderError::not_found("audio features", track_id.as_str()))
    }

    /// Audio features for many tracks, in input order.
    ///
    /// Entries the provider has no data for are `None`.
    pub async fn features_for_many(
        &self,
        track_ids: &[TrackId],
    ) -> ProviderResult<Vec<(TrackId, Option<FeatureVector>)>> {
        let mut results = Vec::with_capacity(track_ids.len());

        for chunk in track_ids.chunks(MAX_FEATURE_BATCH) {
            let features = self.provider.audio_features(chunk).await?;
            if features.len() != chunk.len() {
                return Err(ProviderError::Parse {
                    provider: self.provider.name().to_string(),
                    message: format!(
                        "audio features misaligned: asked for {}, got {}",
                        chunk.len(),
                        features.len()
                    ),
                });
            }
            results.extend(chunk.iter().cloned().zip(features));
        }

        Ok(results)
    }

    /// Pair `tracks` with their features, keeping only tracks that have
    /// them.
    pub async fn candidate_pool(&self, tracks: Vec<Track>) -> ProviderResult<CandidatePool> {
        let ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
        let features = self.features_for_many(&ids).await?;

        let total = tracks.len();
        let pool = CandidatePool::from_optional(
            tracks
                .into_iter()
                .zip(features)
                .map(|(track, (_, features))| (track, features)),
        );

        if pool.len() < total {
            log::info!(
                "{} of {} candidate tracks have no audio features and were skipped",
                total - pool.len(),
                total
            );
        }

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryProvider;

    fn vector(x: f64) -> FeatureVector {
        FeatureVector::from_array([x, x, x, -10.0 * x, x, x])
    }

    #[tokio::test]
    async fn test_features_for_found() {
        let provider = InMemoryProvider::new().with_features("t1", vector(0.5));
        let extractor = FeatureExtractor::new(Arc::new(provider));

        let features = extractor.features_for(&TrackId::new("t1")).await.unwrap();
        assert_eq!(features, vector(0.5));
    }

    #[tokio::test]
    async fn test_features_for_missing_is_not_found() {
        let extractor = FeatureExtractor::new(Arc::new(InMemoryProvider::new()));

        let err = extractor.features_for(&TrackId::new("nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_features_for_many_preserves_order() {
        let provider = InMemoryProvider::new()
            .with_features("a", vector(0.1))
            .with_features("c", vector(0.3));
        let extractor = FeatureExtractor::new(Arc::new(provider));

        let ids = vec![TrackId::new("c"), TrackId::new("b"), TrackId::new("a")];
        let results = extractor.features_for_many(&ids).await.unwrap();

        let got: Vec<(&str, bool)> = results
            .iter()
            .map(|(id, f)| (id.as_str(), f.is_some()))
            .collect();
        assert_eq!(got, vec![("c", true), ("b", false), ("a", true)]);
    }

    #[tokio::test]
    async fn test_features_for_many_batches_requests() {
        let ids: Vec<TrackId> = (0..250).map(|i| TrackId::new(format!("t{i}"))).collect();
        let provider = Arc::new(InMemoryProvider::new());
        let extractor = FeatureExtractor::new(provider.clone());

        let results = extractor.features_for_many(&ids).await.unwrap();
        assert_eq!(results.len(), 250);
        assert_eq!(provider.feature_requests(), 3);
        assert_eq!(results[249].0.as_str(), "t249");
    }

    #[tokio::test]
    async fn test_features_for_many_empty() {
        let provider = Arc::new(InMemoryProvider::new());
        let extractor = FeatureExtractor::new(provider.clone());

        assert!(extractor.features_for_many(&[]).await.unwrap().is_empty());
        assert_eq!(provider.feature_requests(), 0);
    }

    #[tokio::test]
    async fn test_candidate_pool_drops_featureless_tracks() {
        let mut provider = InMemoryProvider::new();
        let mut tracks = Vec::new();
        for i in 0..30 {
            let id = format!("t{i}");
            tracks.push(Track::new(id.as_str(), format!("Track {i}")));
            if i % 10 != 3 {
                provider = provider.with_features(id, vector(f64::from(i) / 30.0));
            }
        }
        let extractor = FeatureExtractor::new(Arc::new(provider));

        let pool = extractor.candidate_pool(tracks).await.unwrap();
        assert_eq!(pool.len(), 27);

        let ids: Vec<&str> = pool.iter().map(|(t, _)| t.id.as_str()).collect();
        assert!(!ids.contains(&"t3"));
        assert!(!ids.contains(&"t13"));
        assert!(!ids.contains(&"t23"));
        assert_eq!(ids[0], "t0");
        assert_eq!(ids[3], "t4");
        assert_eq!(ids[26], "t29");
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = Arc::new(InMemoryProvider::new().with_features("t1", vector(0.5)));
        provider.set_unavailable(true);
        let extractor = FeatureExtractor::new(provider);

        let err = extractor.features_for(&TrackId::new("t1")).await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
