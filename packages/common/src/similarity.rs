//! Audio-feature similarity between two songs.
//!
//! A song is described by its global tempo (BPM) and a vector of numeric audio features
//! (acousticness, danceability, energy, ...). The score blends the cosine similarity of the
//! feature vectors with a tempo-distance term, weighting the features 20:1.

use serde::{Deserialize, Serialize};

const FEATURE_WEIGHT: f64 = 20.0;
const TEMPO_WEIGHT: f64 = 1.0;

/// Analysed audio features of a single song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongFeatures {
    pub tempo: f64,
    pub vector: Vec<f64>,
}

impl SongFeatures {
    pub fn new(tempo: f64, vector: Vec<f64>) -> Self {
        Self { tempo, vector }
    }
}

/// Cosine similarity of two equally sized, non-zero vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 || !dot.is_finite() {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

/// Similarity score in `(-20/21, 1]`; `1.0` for identical songs.
///
/// Returns `None` when the feature vectors cannot be compared.
pub fn similarity_score(a: &SongFeatures, b: &SongFeatures) -> Option<f64> {
    let cosine = cosine_similarity(&a.vector, &b.vector)?;
    let tempo_term = 1.0 / (1.0 + (a.tempo - b.tempo).abs());
    Some((FEATURE_WEIGHT * cosine + TEMPO_WEIGHT * tempo_term) / (FEATURE_WEIGHT + TEMPO_WEIGHT))
}
