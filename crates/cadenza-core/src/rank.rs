//! Similarity ranking.
//!
//! Scores every candidate against a query vector with cosine similarity
//! and keeps the top `k`. Ranking is a pure function of its inputs.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{FeatureVector, Track};

/// A candidate track paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub track: Track,
    pub score: f64,
}

/// Rank `pool` by cosine similarity to `query`, highest first.
///
/// Returns at most `k` results. Candidates with equal scores keep their
/// relative pool order. A zero-magnitude candidate scores 0.0 and is
/// still ranked.
pub fn rank(query: &FeatureVector, pool: &[(Track, FeatureVector)], k: usize) -> Vec<RankedResult> {
    let mut scored: Vec<RankedResult> = pool
        .iter()
        .map(|(track, features)| RankedResult {
            track: track.clone(),
            score: query.cosine_similarity(features),
        })
        .collect();

    // `sort_by` is stable, which gives the pool-order tie-break.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
