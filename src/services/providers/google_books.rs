/// Google Books API provider
///
/// Searches the public volumes endpoint. An API key is optional; when
/// configured it is attached to every request.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Book, GoogleVolume},
    services::providers::CatalogProvider,
};

#[derive(Clone)]
pub struct GoogleBooksProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl GoogleBooksProvider {
    /// Creates a new Google Books provider
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for GoogleBooksProvider {
    async fn search_books(&self, query: &str, limit: usize) -> AppResult<Vec<Book>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/volumes", self.api_url);
        let max_results = limit.to_string();

        let mut request = self.http_client.get(&url).query(&[
            ("q", query),
            ("maxResults", max_results.as_str()),
            ("printType", "books"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Google Books API returned status {}: {}",
                status, body
            )));
        }

        #[derive(Deserialize)]
        struct VolumesResponse {
            #[serde(default)]
            items: Vec<serde_json::Value>,
        }

        let volumes: VolumesResponse = response.json().await?;

        // Malformed items are skipped rather than failing the whole search.
        let books: Vec<Book> = volumes
            .items
            .iter()
            .filter_map(|item| {
                serde_json::from_value::<GoogleVolume>(item.clone())
                    .map(Book::from)
                    .ok()
            })
            .collect();

        tracing::info!(
            query = %query,
            results = books.len(),
            provider = "google_books",
            "Catalog search completed"
        );

        Ok(books)
    }

    fn name(&self) -> &'static str {
        "google_books"
    }
}
