use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Audio descriptors for a single track, in a fixed dimension order.
///
/// `loudness` is in decibels (typically -60.0 to 0.0); the other five
/// fields are normalised to 0.0--1.0 by the provider. No further scaling
/// is applied before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub valence: f64,
}

impl FeatureVector {
    /// Number of dimensions compared.
    pub const DIMENSIONS: usize = 6;

    /// Dimension names, in the order used by [`Self::as_array`].
    pub const NAMES: [&'static str; Self::DIMENSIONS] = [
        "danceability",
        "energy",
        "instrumentalness",
        "loudness",
        "speechiness",
        "valence",
    ];

    #[must_use]
    pub const fn from_array(values: [f64; Self::DIMENSIONS]) -> Self {
        let [danceability, energy, instrumentalness, loudness, speechiness, valence] = values;
        Self {
            danceability,
            energy,
            instrumentalness,
            loudness,
            speechiness,
            valence,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> [f64; Self::DIMENSIONS] {
        [
            self.danceability,
            self.energy,
            self.instrumentalness,
            self.loudness,
            self.speechiness,
            self.valence,
        ]
    }

    /// Euclidean dot product over all six dimensions.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cosine of the angle between `self` and `other`.
    ///
    /// Returns 0.0 when either vector has zero magnitude or the result is
    /// not finite. The result is clamped to -1.0..=1.0.
    #[must_use]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 || !denominator.is_finite() {
            return 0.0;
        }

        let similarity = self.dot(other) / denominator;
        if similarity.is_finite() {
            similarity.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

impl From<[f64; FeatureVector::DIMENSIONS]> for FeatureVector {
    fn from(values: [f64; FeatureVector::DIMENSIONS]) -> Self {
        Self::from_array(values)
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        let array: [f64; Self::DIMENSIONS] = values.try_into().map_err(|_| {
            Error::InvalidData(format!(
                "feature vector needs {} values, got {}",
                Self::DIMENSIONS,
                values.len()
            ))
        })?;
        Ok(Self::from_array(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_array_order_matches_names() {
        let v = FeatureVector::from_array([0.1, 0.2, 0.3, -4.0, 0.5, 0.6]);
        assert_eq!(v.danceability, 0.1);
        assert_eq!(v.energy, 0.2);
        assert_eq!(v.instrumentalness, 0.3);
        assert_eq!(v.loudness, -4.0);
        assert_eq!(v.speechiness, 0.5);
        assert_eq!(v.valence, 0.6);
        assert_eq!(v.as_array(), [0.1, 0.2, 0.3, -4.0, 0.5, 0.6]);
        assert_eq!(FeatureVector::NAMES[3], "loudness");
    }

    #[test]
    fn test_try_from_slice() {
        let values = vec![0.8, 0.7, 0.0, -5.0, 0.05, 0.6];
        let v = FeatureVector::try_from(values.as_slice()).unwrap();
        assert_eq!(v.loudness, -5.0);
    }

    #[test]
    fn test_try_from_wrong_length() {
        let values = [0.8, 0.7, 0.0];
        let err = FeatureVector::try_from(&values[..]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_dot_and_norm() {
        let v = FeatureVector::from_array([3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((v.norm() - 5.0).abs() < EPSILON);
        assert!((v.dot(&v) - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = FeatureVector::from_array([0.8, 0.7, 0.0, -5.0, 0.05, 0.6]);
        assert!((v.cosine_similarity(&v) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_orthogonal_similarity_is_zero() {
        let a = FeatureVector::from_array([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let b = FeatureVector::from_array([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(a.cosine_similarity(&b).abs() < EPSILON);
    }

    #[test]
    fn test_opposite_similarity_is_minus_one() {
        let a = FeatureVector::from_array([0.0, 0.0, 0.0, -10.0, 0.0, 0.0]);
        let b = FeatureVector::from_array([0.0, 0.0, 0.0, 10.0, 0.0, 0.0]);
        assert!((a.cosine_similarity(&b) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = FeatureVector::default();
        let v = FeatureVector::from_array([0.5, 0.5, 0.5, -3.0, 0.5, 0.5]);
        assert_eq!(v.cosine_similarity(&zero), 0.0);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(zero.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn test_nan_scores_zero() {
        let nan = FeatureVector::from_array([f64::NAN, 0.1, 0.1, -1.0, 0.1, 0.1]);
        let v = FeatureVector::from_array([0.5, 0.5, 0.5, -3.0, 0.5, 0.5]);
        assert_eq!(v.cosine_similarity(&nan), 0.0);
    }
}
