use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    services::catalog_search,
};

use super::AppState;

/// Results requested from each catalog source
const LIMIT_PER_SOURCE: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Handler for the book search endpoint
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let books =
        catalog_search::search_catalogs(&state.providers, &params.q, LIMIT_PER_SOURCE).await;
    Ok(Json(books))
}
