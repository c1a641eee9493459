//! Unified search across every configured catalog.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::Book;
use crate::services::providers::CatalogProvider;

/// Searches every catalog concurrently and merges the results.
///
/// A failing source is logged and skipped so one catalog outage never takes
/// down search; an empty result is the worst outcome. Merged results are
/// de-duplicated by normalized title, keeping the first occurrence.
pub async fn search_catalogs(
    providers: &[Arc<dyn CatalogProvider>],
    query: &str,
    limit_per_source: usize,
) -> Vec<Book> {
    let mut tasks = Vec::with_capacity(providers.len());
    for provider in providers {
        let provider = Arc::clone(provider);
        let query = query.to_string();
        tasks.push(tokio::spawn(async move {
            let name = provider.name();
            (name, provider.search_books(&query, limit_per_source).await)
        }));
    }

    let mut books = Vec::new();
    for joined in futures::future::join_all(tasks).await {
        match joined {
            Ok((_, Ok(found))) => books.extend(found),
            Ok((name, Err(error))) => {
                tracing::warn!(provider = name, error = %error, "Catalog source failed");
            }
            Err(error) => {
                tracing::error!(error = %error, "Catalog search task join error");
            }
        }
    }

    dedup_by_title(books)
}

/// Drops later results whose lowercased trimmed title was already seen
fn dedup_by_title(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(book.title.trim().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use crate::models::CatalogSource;

    mockall::mock! {
        pub Catalog {}

        #[async_trait::async_trait]
        impl CatalogProvider for Catalog {
            async fn search_books(&self, query: &str, limit: usize) -> AppResult<Vec<Book>>;
            fn name(&self) -> &'static str;
        }
    }

    fn book(id: &str, title: &str, source: CatalogSource) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec![],
            description: None,
            categories: vec![],
            rating: 0.0,
            thumbnail: None,
            source,
        }
    }

    #[test]
    fn test_dedup_by_title_is_case_insensitive() {
        let books = vec![
            book("gb_1", "Dune", CatalogSource::Google),
            book("ol_1", "  DUNE ", CatalogSource::OpenLibrary),
            book("ol_2", "Hyperion", CatalogSource::OpenLibrary),
        ];

        let deduped = dedup_by_title(books);
        assert_eq!(deduped.len(), 2);
        // First occurrence wins
        assert_eq!(deduped[0].id, "gb_1");
        assert_eq!(deduped[1].id, "ol_2");
    }

    #[tokio::test]
    async fn test_merges_results_from_all_sources() {
        let mut google = MockCatalog::new();
        google
            .expect_search_books()
            .returning(|_, _| Ok(vec![book("gb_1", "Dune", CatalogSource::Google)]));
        google.expect_name().return_const("google_books");

        let mut open_library = MockCatalog::new();
        open_library
            .expect_search_books()
            .returning(|_, _| Ok(vec![book("ol_2", "Hyperion", CatalogSource::OpenLibrary)]));
        open_library.expect_name().return_const("open_library");

        let providers: Vec<Arc<dyn CatalogProvider>> =
            vec![Arc::new(google), Arc::new(open_library)];

        let found = search_catalogs(&providers, "science fiction", 10).await;
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_source_is_skipped() {
        let mut healthy = MockCatalog::new();
        healthy
            .expect_search_books()
            .returning(|_, _| Ok(vec![book("gb_1", "Dune", CatalogSource::Google)]));
        healthy.expect_name().return_const("google_books");

        let mut broken = MockCatalog::new();
        broken
            .expect_search_books()
            .returning(|_, _| Err(AppError::ExternalApi("boom".to_string())));
        broken.expect_name().return_const("open_library");

        let providers: Vec<Arc<dyn CatalogProvider>> = vec![Arc::new(healthy), Arc::new(broken)];

        let found = search_catalogs(&providers, "science fiction", 10).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "gb_1");
    }

    #[tokio::test]
    async fn test_no_providers_yields_empty() {
        let providers: Vec<Arc<dyn CatalogProvider>> = vec![];
        assert!(search_catalogs(&providers, "anything", 10).await.is_empty());
    }
}
