use anyhow::{Context, Result};
use cadenza_core::Track;
use std::fmt;
use cadenza_provider::Recommender;

pub async fn run_top_tracks(recommender: &Recommender, json: bool) -> Result<()> {
    log::info!(
        "Fetching top tracks from playlist {}",
        recommender.settings().playlist_id
    );

    let tracks = recommender
        .top_tracks()
        .await
        .context("Failed to fetch top tracks")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
    } else {
        let listing = TopTracksListing {
            tracks: &tracks,
            market: &recommender.settings().market,
        };
        print!("{}", listing);
    }

    Ok(())
}

/// Numbered chart listing.
struct TopTracksListing<'a> {
    tracks: &'a [Track],
    market: &'a str,
}

impl fmt::Display for TopTracksListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nTop Tracks ({})\n", self.market)?;
        if self.tracks.is_empty() {
            return writeln!(f, "  (playlist is empty)");
        }

        let width = self.tracks.len().to_string().len();
        for (i, track) in self.tracks.iter().enumerate() {
            writeln!(f, "  {:>width$}. {}", i + 1, track, width = width)?;
        }
        Ok(())
    }
}
