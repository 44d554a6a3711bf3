use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    blank_as_none, clamp_limit, saturating_limit, BulkRecommendationRequest,
    BulkRecommendationResponse, Occasion, Preferences, PriceRange, RecommendationEnvelope, Season,
};

use super::AppState;

/// Query string of the single-product endpoint
///
/// Blank values count as absent; an oversized limit is clamped, not rejected.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub occasion: Option<Occasion>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub season: Option<Season>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub budget: Option<PriceRange>,
    #[serde(default, deserialize_with = "saturating_limit")]
    pub limit: Option<i64>,
}

impl RecommendationQuery {
    fn preferences(&self) -> Preferences {
        Preferences {
            occasion: self.occasion,
            season: self.season,
            budget: self.budget,
        }
    }
}

/// GET /api/v1/recommendations/:product_id
pub async fn recommend(
    State(state): State<AppState>,
    product_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationEnvelope>> {
    let Path(product_id) = product_id.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let response = state
        .recommendations
        .recommend(product_id, query.preferences(), clamp_limit(query.limit))
        .await?;

    Ok(Json(response.into()))
}

/// POST /api/v1/recommendations/bulk
pub async fn recommend_bulk(
    State(state): State<AppState>,
    request: Result<Json<BulkRecommendationRequest>, JsonRejection>,
) -> AppResult<Json<BulkRecommendationResponse>> {
    let Json(request) = request.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let results = state
        .recommendations
        .recommend_bulk(&request.product_ids, request.preferences, request.limit)
        .await?;

    Ok(Json(BulkRecommendationResponse {
        success: true,
        results,
    }))
}
