mod garment;
mod outfit;
mod preferences;
mod response;

pub use garment::{Category, Garment, Gender, Occasion, PriceRange, Season, Style};
pub use outfit::{round2, Explanation, Outfit, ScoreBreakdown, ScoredOutfit};
pub use preferences::{
    blank_as_none, clamp_limit, saturating_limit, Preferences, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT,
};
pub use response::{
    BulkRecommendationRequest, BulkRecommendationResponse, BulkResult, RecommendationEnvelope,
    RecommendationMetadata, RecommendationResponse,
};
