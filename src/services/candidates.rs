//! Candidate pool assembly for a recommendation run.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Book, LibraryEntry};
use crate::services::catalog_search::search_catalogs;
use crate::services::providers::CatalogProvider;
use crate::services::recommender::{favorite_authors, favorite_categories};

/// How many favorite categories seed candidate queries
const CATEGORY_QUERIES: usize = 3;
/// How many favorite authors seed candidate queries
const AUTHOR_QUERIES: usize = 2;
/// Results requested per source for each category query
const CATEGORY_LIMIT: usize = 8;
/// Results requested per source for each author query
const AUTHOR_LIMIT: usize = 5;

/// Assembles the candidate pool for a recommendation run.
///
/// Queries the catalogs for the user's strongest categories and authors,
/// drops books already in the library and de-duplicates the pool by id.
/// Failed queries are absorbed by the search layer, so the pool is simply
/// smaller when a catalog is down.
pub async fn assemble_candidates(
    providers: &[Arc<dyn CatalogProvider>],
    library: &[LibraryEntry],
) -> Vec<Book> {
    let owned_ids: HashSet<&str> = library.iter().map(|entry| entry.book_id.as_str()).collect();
    let mut pool: Vec<Book> = Vec::new();

    for category in favorite_categories(library).iter().take(CATEGORY_QUERIES) {
        let query = format!("subject:{}", category);
        let found = search_catalogs(providers, &query, CATEGORY_LIMIT).await;
        pool.extend(
            found
                .into_iter()
                .filter(|book| !owned_ids.contains(book.id.as_str())),
        );
    }

    for author in favorite_authors(library).iter().take(AUTHOR_QUERIES) {
        let query = format!("author:{}", author);
        let found = search_catalogs(providers, &query, AUTHOR_LIMIT).await;
        pool.extend(
            found
                .into_iter()
                .filter(|book| !owned_ids.contains(book.id.as_str())),
        );
    }

    let pool = dedup_by_id(pool);
    tracing::info!(candidates = pool.len(), "Candidate pool assembled");
    pool
}

/// Keeps the first occurrence of each book id
fn dedup_by_id(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(book.id.clone()))
        .collect()
}
