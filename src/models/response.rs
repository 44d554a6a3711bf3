use serde::{Deserialize, Serialize};

use super::{saturating_limit, Garment, Preferences, ScoredOutfit};

/// Full result of one recommendation request; this is what gets cached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub base_product: Garment,
    pub recommendations: Vec<ScoredOutfit>,
    pub metadata: RecommendationMetadata,
    pub cached: bool,
    pub response_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    /// Outfits generated before ranking and deduplication
    pub total_generated: usize,
    pub returned: usize,
    pub processing_time_ms: f64,
    pub preferences: Preferences,
}

/// Wire envelope for the single-product endpoint
#[derive(Debug, Serialize)]
pub struct RecommendationEnvelope {
    pub success: bool,
    #[serde(flatten)]
    pub response: RecommendationResponse,
}

impl From<RecommendationResponse> for RecommendationEnvelope {
    fn from(response: RecommendationResponse) -> Self {
        Self {
            success: true,
            response,
        }
    }
}

/// Request body for bulk recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRecommendationRequest {
    #[serde(default)]
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default, deserialize_with = "saturating_limit")]
    pub limit: Option<i64>,
}

/// Outcome for one product of a bulk request
#[derive(Debug, Serialize)]
pub struct BulkResult {
    pub product_id: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub response: Option<RecommendationResponse>,
}

impl BulkResult {
    pub fn succeeded(product_id: i64, response: RecommendationResponse) -> Self {
        Self {
            product_id,
            success: true,
            error: None,
            response: Some(response),
        }
    }

    pub fn failed(product_id: i64, error: String) -> Self {
        Self {
            product_id,
            success: false,
            error: Some(error),
            response: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkRecommendationResponse {
    pub success: bool,
    pub results: Vec<BulkResult>,
}
