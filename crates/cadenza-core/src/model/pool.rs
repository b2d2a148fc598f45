use crate::model::features::FeatureVector;
use crate::model::track::Track;

/// Ordered tracks that all carry a feature vector, ready for ranking.
///
/// Built fresh for every request; nothing here is cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    entries: Vec<(Track, FeatureVector)>,
}

impl CandidatePool {
    /// Pair tracks with optional features, dropping tracks without any.
    ///
    /// Relative order of the kept tracks is preserved.
    pub fn from_optional<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Track, Option<FeatureVector>)>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(track, features)| {
                if features.is_none() {
                    log::debug!("Dropping {} from pool: no audio features", track.id);
                }
                features.map(|f| (track, f))
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Track, FeatureVector)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(Track, FeatureVector)] {
        &self.entries
    }
}
