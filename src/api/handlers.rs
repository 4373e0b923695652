use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Recommendation, TitleDetails, TitleSummary},
    services::catalog_stats::{self, CatalogStats},
};

use super::AppState;

const DEFAULT_STATS_TOP: usize = 15;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub k: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub k: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub top: Option<usize>,
}

/// Converts a caller-supplied count, rejecting zero and negatives
fn resolve_k(k: Option<i64>, default: usize) -> AppResult<usize> {
    match k {
        None => Ok(default),
        Some(k) if k >= 1 => usize::try_from(k)
            .map_err(|_| AppError::InvalidInput(format!("k is too large: {}", k))),
        Some(k) => Err(AppError::InvalidInput(format!(
            "k must be at least 1, got {}",
            k
        ))),
    }
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List recommendable titles
pub async fn get_titles(State(state): State<AppState>) -> Json<Vec<TitleSummary>> {
    Json(state.recommender.titles())
}

/// Get one normalized title with its credits
pub async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TitleDetails>> {
    Ok(Json(state.recommender.details(&id)?))
}

/// Recommend titles similar to the one named in the query
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let k = resolve_k(query.k, state.default_recommendations)?;

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        k,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&query.title, k)?;
    Ok(Json(recommendations))
}

/// Recommend titles similar to the one with the given id
pub async fn recommend_by_id(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    Query(query): Query<CountQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let k = resolve_k(query.k, state.default_recommendations)?;

    tracing::info!(
        request_id = %request_id,
        title_id = %id,
        k,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend_by_id(&id, k)?;
    Ok(Json(recommendations))
}

/// Frequency statistics over the catalog
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<CatalogStats> {
    let top = query.top.unwrap_or(DEFAULT_STATS_TOP);
    Json(catalog_stats::compute(state.recommender.catalog(), top))
}
