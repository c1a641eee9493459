/// Book catalog provider abstraction
///
/// This module provides a pluggable architecture for the external book
/// catalogs (Google Books, Open Library). Each provider implements keyword
/// search and maps its own wire format into the shared `Book` model.
use crate::{error::AppResult, models::Book};

pub mod google_books;
pub mod open_library;

pub use google_books::GoogleBooksProvider;
pub use open_library::OpenLibraryProvider;

/// Trait for book catalog providers
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog by free-text query
    ///
    /// Query prefixes such as `subject:` and `author:` pass through to the
    /// upstream API where it understands them. Returns at most `limit`
    /// books.
    async fn search_books(&self, query: &str, limit: usize) -> AppResult<Vec<Book>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
