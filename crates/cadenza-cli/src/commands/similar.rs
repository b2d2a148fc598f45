use anyhow::{Context, Result};
use std::fmt;
use cadenza_core::FeatureVector;
use cadenza_provider::{Recommendation, Recommender};

use crate::commands::top_tracks::run_top_tracks;

/// Rank the top tracks against a song.
///
/// A song that cannot be found falls back to the top tracks listing.
/// Provider failures are returned as errors.
pub async fn run_similar(
    recommender: &Recommender,
    artist: &str,
    song: Option<&str>,
    k: usize,
    json: bool,
) -> Result<()> {
    log::info!("Searching for '{}' by '{}'", song.unwrap_or(""), artist);

    match recommender.recommend(artist, song.unwrap_or(""), k).await {
        Ok(recommendation) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                print!("{}", RecommendationReport(&recommendation));
            }
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            log::warn!("No recommendation for '{}': {}", artist, e);
            eprintln!("Could not find that song ({}); showing top tracks instead.", e);
            run_top_tracks(recommender, json).await
        }
        Err(e) => Err(e).context("Failed to find similar tracks"),
    }
}

pub(crate) fn format_features(features: &FeatureVector) -> String {
    FeatureVector::NAMES
        .iter()
        .zip(features.as_array())
        .map(|(name, value)| format!("{name}={value:.3}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The song, its features and the ranked similar tracks.
struct RecommendationReport<'a>(&'a Recommendation);

impl fmt::Display for RecommendationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recommendation = self.0;
        writeln!(f, "\n{}", recommendation.song)?;
        writeln!(f, "  {}\n", format_features(&recommendation.features))?;

        if recommendation.similar.is_empty() {
            return writeln!(f, "No candidate tracks with audio features.");
        }

        writeln!(f, "Similar tracks:")?;
        for (i, result) in recommendation.similar.iter().enumerate() {
            writeln!(f, "  {}. [{:.4}] {}", i + 1, result.score, result.track)?;
        }
        Ok(())
    }
}
