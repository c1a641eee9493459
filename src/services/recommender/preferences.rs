//! Weighted favorite-category and favorite-author extraction.
//!
//! These rankings seed the candidate-pool queries, so their weighting must
//! stay consistent with the scoring rules in the ranking engine.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{LibraryEntry, ReadingStatus};

/// Maximum number of favorite categories returned
const MAX_CATEGORIES: usize = 6;
/// Maximum number of favorite authors returned
const MAX_AUTHORS: usize = 4;

/// Ranked favorite categories, weighted by how strongly each book landed.
///
/// A five-star book counts three times as much as a three-star one, a book
/// finished without a rating still counts, and poorly rated books actively
/// suppress their categories. Categories whose accumulated weight drops to
/// zero or below are discarded.
pub fn favorite_categories(library: &[LibraryEntry]) -> Vec<String> {
    let mut scores: HashMap<String, f64> = HashMap::new();

    for entry in library {
        let categories = entry.categories();
        if categories.is_empty() {
            continue;
        }

        let weight = match entry.rating {
            Some(5) => 3.0,
            Some(4) => 2.0,
            Some(rating) if rating <= 2 => -1.0,
            Some(_) => 1.0,
            None if entry.status == ReadingStatus::Finished => 1.5,
            None => 1.0,
        };

        for category in categories {
            *scores.entry(category).or_insert(0.0) += weight;
        }
    }

    let positive: Vec<(String, f64)> = scores
        .into_iter()
        .filter(|(_, weight)| *weight > 0.0)
        .collect();

    ranked_names(positive, MAX_CATEGORIES)
}

/// Ranked favorite authors.
///
/// Highly rated books dominate and poorly rated ones contribute nothing;
/// there is no negative suppression for authors.
pub fn favorite_authors(library: &[LibraryEntry]) -> Vec<String> {
    let mut scores: HashMap<String, f64> = HashMap::new();

    for entry in library {
        let authors = entry.authors();
        if authors.is_empty() {
            continue;
        }

        let weight = match entry.rating {
            Some(rating) if rating >= 4 => 3.0,
            Some(rating) if rating <= 2 => 0.0,
            _ => 1.0,
        };

        for author in authors {
            *scores.entry(author).or_insert(0.0) += weight;
        }
    }

    ranked_names(scores.into_iter().collect(), MAX_AUTHORS)
}

/// Sorts by weight descending, ties by name, and keeps the top names.
///
/// The name tie-break makes the ranking a pure function of the library
/// contents rather than of map iteration order.
fn ranked_names(mut scores: Vec<(String, f64)>, limit: usize) -> Vec<String> {
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scores.into_iter().take(limit).map(|(name, _)| name).collect()
}
