/// Open Library API provider
///
/// Searches the public search endpoint with a field projection so responses
/// stay small. Search results carry no description, so `Book` conversion
/// synthesizes one from the publication year and subjects.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Book, OpenLibraryDoc},
    services::providers::CatalogProvider,
};

/// Fields requested from the search endpoint
const SEARCH_FIELDS: &str =
    "key,title,author_name,first_publish_year,isbn,subject,ratings_average,cover_i";

#[derive(Clone)]
pub struct OpenLibraryProvider {
    http_client: HttpClient,
    api_url: String,
}

impl OpenLibraryProvider {
    /// Creates a new Open Library provider
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for OpenLibraryProvider {
    async fn search_books(&self, query: &str, limit: usize) -> AppResult<Vec<Book>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search.json", self.api_url);
        let limit_param = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("q", query),
                ("limit", limit_param.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Open Library API returned status {}: {}",
                status, body
            )));
        }

        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            docs: Vec<serde_json::Value>,
        }

        let results: SearchResponse = response.json().await?;

        // Malformed docs are skipped rather than failing the whole search.
        let books: Vec<Book> = results
            .docs
            .iter()
            .filter_map(|doc| {
                serde_json::from_value::<OpenLibraryDoc>(doc.clone())
                    .map(Book::from)
                    .ok()
            })
            .collect();

        tracing::info!(
            query = %query,
            results = books.len(),
            provider = "open_library",
            "Catalog search completed"
        );

        Ok(books)
    }

    fn name(&self) -> &'static str {
        "open_library"
    }
}
