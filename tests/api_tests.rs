use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use shelfwise_api::error::AppResult;
use shelfwise_api::models::{Book, CatalogSource};
use shelfwise_api::routes::{create_router, AppState};
use shelfwise_api::services::providers::CatalogProvider;

/// In-memory catalog standing in for the real providers
struct StubCatalog {
    books: Vec<Book>,
}

#[async_trait::async_trait]
impl CatalogProvider for StubCatalog {
    async fn search_books(&self, _query: &str, limit: usize) -> AppResult<Vec<Book>> {
        Ok(self.books.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn create_test_server(books: Vec<Book>) -> TestServer {
    let providers: Vec<Arc<dyn CatalogProvider>> = vec![Arc::new(StubCatalog { books })];
    let app = create_router(AppState::new(providers));
    TestServer::new(app).unwrap()
}

fn hyperion() -> Book {
    Book {
        id: "gb_hyperion".to_string(),
        title: "Hyperion".to_string(),
        authors: vec!["Dan Simmons".to_string()],
        description: Some("space opera epic".to_string()),
        categories: vec!["Science Fiction".to_string()],
        rating: 4.6,
        thumbnail: None,
        source: CatalogSource::Google,
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_search_returns_catalog_books() {
    let server = create_test_server(vec![hyperion()]);

    let response = server.get("/api/v1/books/search").add_query_param("q", "hyperion").await;
    response.assert_status_ok();

    let books: Vec<serde_json::Value> = response.json();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Hyperion");
    assert_eq!(books[0]["source"], "google");
}

#[tokio::test]
async fn test_search_rejects_empty_query() {
    let server = create_test_server(vec![]);

    let response = server.get("/api/v1/books/search").add_query_param("q", "  ").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_require_minimum_library() {
    let server = create_test_server(vec![hyperion()]);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "library": [
                { "book_id": "gb_dune", "title": "Dune", "rating": 5, "status": "finished" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn test_recommendations_end_to_end() {
    let server = create_test_server(vec![hyperion()]);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "library": [
                {
                    "book_id": "gb_dune",
                    "title": "Dune",
                    "categories": "Science Fiction",
                    "rating": 5,
                    "status": "finished"
                },
                {
                    "book_id": "gb_foundation",
                    "title": "Foundation",
                    "categories": "Science Fiction",
                    "rating": 4,
                    "status": "finished"
                }
            ]
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 1);

    let top = &recommendations[0];
    assert_eq!(top["book"]["title"], "Hyperion");
    assert!(top["score"].as_f64().unwrap() > 0.25);
    assert!(top["reason"]
        .as_str()
        .unwrap()
        .contains("Genre: Science Fiction"));
}

#[tokio::test]
async fn test_recommendations_exclude_library_books() {
    // The only catalog result is a book the user already owns
    let mut owned = hyperion();
    owned.id = "gb_owned".to_string();
    let server = create_test_server(vec![owned]);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "library": [
                {
                    "book_id": "gb_owned",
                    "title": "Hyperion",
                    "categories": "Science Fiction",
                    "rating": 5,
                    "status": "finished"
                },
                {
                    "book_id": "gb_foundation",
                    "title": "Foundation",
                    "categories": "Science Fiction",
                    "rating": 4,
                    "status": "finished"
                }
            ]
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn test_recommendations_respect_limit() {
    let mut books = Vec::new();
    for i in 0..5 {
        let mut book = hyperion();
        book.id = format!("gb_{}", i);
        book.title = format!("Sci-Fi Book {}", i);
        books.push(book);
    }
    let server = create_test_server(books);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "library": [
                {
                    "book_id": "gb_dune",
                    "title": "Dune",
                    "categories": "Science Fiction",
                    "rating": 5,
                    "status": "finished"
                },
                {
                    "book_id": "gb_foundation",
                    "title": "Foundation",
                    "categories": "Science Fiction",
                    "rating": 4,
                    "status": "finished"
                }
            ],
            "limit": 2
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 2);
}
