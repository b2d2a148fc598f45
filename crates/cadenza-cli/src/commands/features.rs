use anyhow::{Context, Result};
use cadenza_core::TrackId;
use cadenza_provider::Recommender;
use serde_json::json;

use crate::commands::similar::format_features;

/// Print feature vectors for `track_ids`, in the order given.
pub async fn run_features(
    recommender: &Recommender,
    track_ids: &[String],
    json: bool,
) -> Result<()> {
    let ids: Vec<TrackId> = track_ids.iter().map(|id| TrackId::new(id.as_str())).collect();

    let results = recommender
        .extractor()
        .features_for_many(&ids)
        .await
        .context("Failed to fetch audio features")?;

    if json {
        let entries: Vec<_> = results
            .iter()
            .map(|(id, features)| json!({ "id": id, "features": features }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (id, features) in &results {
        match features {
            Some(features) => println!("{}  {}", id, format_features(features)),
            None => println!("{}  -", id),
        }
    }

    Ok(())
}
