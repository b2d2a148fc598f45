//! End-to-end tests for the recommendation flow.
//!
//! These run against the in-memory provider, so no Spotify credentials or
//! network access are needed.

use std::sync::Arc;

use cadenza_core::{AlbumRef, ArtistRef, FeatureVector, Track};
use cadenza_provider::{InMemoryProvider, RecommendSettings, Recommender};

const PLAYLIST: &str = "top50";

fn settings() -> RecommendSettings {
    RecommendSettings {
        playlist_id: PLAYLIST.to_string(),
        market: "JP".to_string(),
        top_tracks_limit: 50,
        album_limit: 15,
    }
}

/// A 30-track playlist where tracks 5, 17 and 28 have no audio features.
fn catalog() -> InMemoryProvider {
    let mut provider = InMemoryProvider::new().with_artist(
        ArtistRef::new("ar-yorushika", "Yorushika"),
        vec![
            (
                AlbumRef::new("al-1", "Dakara Boku wa Ongaku wo Yameta"),
                vec![Track::new("s-1", "Hitchcock"), Track::new("s-2", "Just a Sunny Day for You")],
            ),
            (
                AlbumRef::new("al-2", "Elma"),
                vec![Track::new("s-3", "Say It")],
            ),
        ],
    )
    .with_features("s-2", FeatureVector::from_array([0.55, 0.8, 0.0, -4.0, 0.04, 0.7]))
    .with_features("s-3", FeatureVector::from_array([0.6, 0.6, 0.0, -6.0, 0.03, 0.5]));

    let mut playlist = Vec::new();
    for i in 0..30 {
        let id = format!("p-{i}");
        playlist.push(Track::new(id.as_str(), format!("Chart Track {i}")).with_artist("Various"));
        if ![5, 17, 28].contains(&i) {
            let x = f64::from(i) / 30.0;
            provider = provider.with_features(
                id,
                FeatureVector::from_array([x, 1.0 - x, 0.1, -3.0 - 10.0 * x, 0.05, x]),
            );
        }
    }
    // An exact twin of the query song in the middle of the chart.
    playlist.insert(12, Track::new("twin", "Twin").with_artist("Mirror"));
    provider
        .with_features("twin", FeatureVector::from_array([0.55, 0.8, 0.0, -4.0, 0.04, 0.7]))
        .with_playlist(PLAYLIST, playlist)
}

#[tokio::test]
async fn test_recommend_end_to_end() {
    let recommender = Recommender::new(Arc::new(catalog()), settings());

    let rec = recommender
        .recommend("yorushika", "sunny day", 5)
        .await
        .expect("recommendation should succeed");

    assert_eq!(rec.song.id.as_str(), "s-2");
    assert_eq!(rec.similar.len(), 5);
    assert_eq!(rec.similar[0].track.id.as_str(), "twin");
    assert!((rec.similar[0].score - 1.0).abs() < 1e-12);
    assert!(rec.similar.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_candidate_pool_filters_featureless_tracks() {
    let recommender = Recommender::new(Arc::new(catalog()), settings());

    let top = recommender.top_tracks().await.unwrap();
    assert_eq!(top.len(), 31);

    let pool = recommender.candidate_pool().await.unwrap();
    assert_eq!(pool.len(), 28);

    let ids: Vec<&str> = pool.iter().map(|(t, _)| t.id.as_str()).collect();
    for missing in ["p-5", "p-17", "p-28"] {
        assert!(!ids.contains(&missing));
    }
    let expected: Vec<&str> = top
        .iter()
        .map(|t| t.id.as_str())
        .filter(|id| !["p-5", "p-17", "p-28"].contains(id))
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_k_larger_than_pool() {
    let recommender = Recommender::new(Arc::new(catalog()), settings());

    let rec = recommender.recommend("yorushika", "say it", 100).await.unwrap();
    assert_eq!(rec.similar.len(), 28);
}

#[tokio::test]
async fn test_unknown_song_is_not_found() {
    let recommender = Recommender::new(Arc::new(catalog()), settings());

    let err = recommender
        .recommend("yorushika", "does not exist", 5)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_song_without_features_is_not_found() {
    let recommender = Recommender::new(Arc::new(catalog()), settings());

    let err = recommender.recommend("yorushika", "hitchcock", 5).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_provider_outage_surfaces() {
    let provider = Arc::new(catalog());
    provider.set_unavailable(true);
    let recommender = Recommender::new(provider, settings());

    let err = recommender.recommend("yorushika", "say it", 5).await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let recommender = Recommender::new(Arc::new(catalog()), settings());

    let first = recommender.recommend("yorushika", "say it", 5).await.unwrap();
    let second = recommender.recommend("yorushika", "say it", 5).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_playlist_gives_empty_result() {
    let provider = InMemoryProvider::new()
        .with_artist(
            ArtistRef::new("ar", "Solo"),
            vec![(AlbumRef::new("al", "Only"), vec![Track::new("s", "Single")])],
        )
        .with_features("s", FeatureVector::from_array([0.5, 0.5, 0.0, -5.0, 0.1, 0.5]))
        .with_playlist(PLAYLIST, Vec::new());
    let recommender = Recommender::new(Arc::new(provider), settings());

    let rec = recommender.recommend("solo", "single", 5).await.unwrap();
    assert!(rec.similar.is_empty());
}
