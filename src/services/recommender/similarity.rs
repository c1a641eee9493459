//! Cosine similarity of candidate vectors against the favorite and
//! disliked sets.

use std::cmp::Ordering;

/// How many of the closest favorites feed a candidate's semantic score
const TOP_MATCHES: usize = 3;

/// Cosine of the angle between two vectors.
///
/// A zero vector (or a length mismatch) compares as 0 rather than erroring.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Per-candidate mean similarity against the closest favorites.
///
/// With at least three favorites only the top three matches count, so a
/// single outlier favorite cannot dominate the score; with fewer, all
/// available favorites are averaged.
pub fn semantic_scores(candidates: &[Vec<f32>], favorites: &[Vec<f32>]) -> Vec<f64> {
    candidates
        .iter()
        .map(|candidate| {
            let mut sims: Vec<f64> = favorites
                .iter()
                .map(|favorite| cosine_similarity(candidate, favorite))
                .collect();
            if sims.is_empty() {
                return 0.0;
            }
            sims.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
            let take = sims.len().min(TOP_MATCHES);
            sims[..take].iter().sum::<f64>() / take as f64
        })
        .collect()
}

/// Per-candidate maximum similarity against any disliked vector.
///
/// All zeros when nothing is disliked.
pub fn penalty_scores(candidates: &[Vec<f32>], disliked: &[Vec<f32>]) -> Vec<f64> {
    candidates
        .iter()
        .map(|candidate| {
            disliked
                .iter()
                .map(|d| cosine_similarity(candidate, d))
                .fold(0.0f64, f64::max)
        })
        .collect()
}
