//! Content-based recommendation engine.
//!
//! Turns a snapshot of the user's rated library plus a pool of candidate
//! books into a ranked list of recommendations. Each run is a stateless,
//! one-shot computation: the TF-IDF space is rebuilt fresh on every call and
//! nothing is learned or persisted between invocations.

pub mod preferences;
pub mod similarity;
pub mod text;
pub mod tfidf;

pub use preferences::{favorite_authors, favorite_categories};

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{Book, LibraryEntry, Recommendation};

use similarity::{penalty_scores, semantic_scores};
use text::normalize_documents;
use tfidf::{TfidfVectorizer, VectorizeError};

/// Default number of recommendations returned
pub const DEFAULT_LIMIT: usize = 12;

/// Weight of semantic similarity to favorite books
const SEMANTIC_WEIGHT: f64 = 0.45;
/// Weight subtracted for similarity to disliked books
const PENALTY_WEIGHT: f64 = 0.25;
/// Similarity to a disliked book must exceed this before it penalizes
const PENALTY_THRESHOLD: f64 = 0.4;
/// Flat bonus for sharing any category with the favorites
const CATEGORY_BONUS: f64 = 0.30;
/// Flat bonus for sharing any author with the favorites
const AUTHOR_BONUS: f64 = 0.15;
/// Bonus for an external rating of at least 4.5
const ACCLAIM_BONUS: f64 = 0.10;
/// Bonus for an external rating in [4.0, 4.5)
const WELL_RATED_BONUS: f64 = 0.05;
/// Minimum score a candidate must exceed to be recommended
const SCORE_FLOOR: f64 = 0.25;
/// At most this many reasons are surfaced per recommendation
const MAX_REASONS: usize = 2;

/// Ranks candidate books against the user's library.
///
/// Returns at most `limit` recommendations sorted by descending score. A
/// library with no favorites, or an empty candidate pool, yields an empty
/// list. When the vector space cannot be fitted, ranking degrades to the
/// category, author and rating signals; no error ever reaches the caller.
pub fn rank(library: &[LibraryEntry], candidates: &[Book], limit: usize) -> Vec<Recommendation> {
    let favorites: Vec<&LibraryEntry> = library.iter().filter(|e| e.is_favorite()).collect();
    let disliked: Vec<&LibraryEntry> = library.iter().filter(|e| e.is_disliked()).collect();

    if favorites.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let favorite_docs =
        normalize_documents(&favorites.iter().map(|e| e.text()).collect::<Vec<_>>());
    let disliked_docs =
        normalize_documents(&disliked.iter().map(|e| e.text()).collect::<Vec<_>>());
    let candidate_docs =
        normalize_documents(&candidates.iter().map(|b| b.text()).collect::<Vec<_>>());

    let (semantic, penalty) = match vectorize(&favorite_docs, &disliked_docs, &candidate_docs) {
        Ok(scores) => scores,
        Err(error) => {
            tracing::warn!(
                error = %error,
                candidates = candidates.len(),
                "Vector space fit failed, ranking without semantic scores"
            );
            (vec![0.0; candidates.len()], vec![0.0; candidates.len()])
        }
    };

    let favorite_cats: BTreeSet<String> = favorites
        .iter()
        .flat_map(|e| e.categories())
        .map(|c| c.to_lowercase())
        .collect();
    let favorite_auths: BTreeSet<String> = favorites
        .iter()
        .flat_map(|e| e.authors())
        .map(|a| a.to_lowercase())
        .collect();

    let mut recommendations: Vec<Recommendation> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, book)| {
            score_candidate(book, semantic[i], penalty[i], &favorite_cats, &favorite_auths)
        })
        .collect();

    recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    recommendations.truncate(limit);
    recommendations
}

/// Builds the shared vector space and reduces it to per-candidate semantic
/// and penalty scores.
///
/// The space is fitted on the union of all three document groups so the
/// vectors are comparable in one coordinate system.
fn vectorize(
    favorite_docs: &[String],
    disliked_docs: &[String],
    candidate_docs: &[String],
) -> Result<(Vec<f64>, Vec<f64>), VectorizeError> {
    let mut corpus =
        Vec::with_capacity(favorite_docs.len() + disliked_docs.len() + candidate_docs.len());
    corpus.extend_from_slice(favorite_docs);
    corpus.extend_from_slice(disliked_docs);
    corpus.extend_from_slice(candidate_docs);

    let vectorizer = TfidfVectorizer::fit(&corpus)?;
    let candidate_vectors = vectorizer.transform_all(candidate_docs);
    let favorite_vectors = vectorizer.transform_all(favorite_docs);

    let semantic = semantic_scores(&candidate_vectors, &favorite_vectors);
    let penalty = if disliked_docs.is_empty() {
        vec![0.0; candidate_docs.len()]
    } else {
        let disliked_vectors = vectorizer.transform_all(disliked_docs);
        penalty_scores(&candidate_vectors, &disliked_vectors)
    };

    Ok((semantic, penalty))
}

/// Scores one candidate; `None` when it does not clear the floor.
fn score_candidate(
    book: &Book,
    semantic: f64,
    penalty: f64,
    favorite_cats: &BTreeSet<String>,
    favorite_auths: &BTreeSet<String>,
) -> Option<Recommendation> {
    let mut score = semantic * SEMANTIC_WEIGHT;
    let mut reasons: Vec<String> = Vec::new();

    // Near-matches of disliked books lower the score without surfacing a
    // reason to the user.
    if penalty > PENALTY_THRESHOLD {
        score -= penalty * PENALTY_WEIGHT;
    }

    let book_cats: BTreeSet<String> = book
        .categories
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();
    // BTreeSet intersections iterate in ascending order, so the first shared
    // entry is the lexicographically smallest.
    if let Some(shared) = book_cats.intersection(favorite_cats).next() {
        score += CATEGORY_BONUS;
        reasons.push(format!("Genre: {}", title_case(shared)));
    }

    let book_auths: BTreeSet<String> = book
        .authors
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();
    if let Some(shared) = book_auths.intersection(favorite_auths).next() {
        score += AUTHOR_BONUS;
        reasons.push(format!("Author: {}", title_case(shared)));
    }

    let rating = f64::from(book.rating);
    if rating >= 4.5 {
        score += ACCLAIM_BONUS;
        reasons.push("Critically acclaimed".to_string());
    } else if rating >= 4.0 {
        score += WELL_RATED_BONUS;
    }

    if score <= SCORE_FLOOR {
        return None;
    }

    reasons.truncate(MAX_REASONS);
    let reason = if reasons.is_empty() {
        "Based on your profile".to_string()
    } else {
        reasons.join(" • ")
    };

    Some(Recommendation {
        book: book.clone(),
        score: (score * 1000.0).round() / 1000.0,
        reason,
    })
}

/// Uppercases the first letter of each word, lowercasing the rest
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
