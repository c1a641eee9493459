use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{LibraryEntry, Recommendation},
    services::{candidates, recommender},
};

use super::AppState;

/// A library must have at least this many entries before recommendations run
const MIN_LIBRARY_SIZE: usize = 2;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub library: Vec<LibraryEntry>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Handler for the recommendations endpoint
///
/// Assembles a candidate pool from the catalogs, then ranks it against the
/// submitted library snapshot. Too small a library yields an empty list
/// rather than an error.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    if request.library.len() < MIN_LIBRARY_SIZE {
        tracing::debug!(
            entries = request.library.len(),
            "Library too small for recommendations"
        );
        return Ok(Json(Vec::new()));
    }

    let pool = candidates::assemble_candidates(&state.providers, &request.library).await;
    let limit = request.limit.unwrap_or(recommender::DEFAULT_LIMIT);
    let ranked = recommender::rank(&request.library, &pool, limit);

    Ok(Json(ranked))
}
