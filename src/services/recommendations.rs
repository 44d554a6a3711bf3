use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        clamp_limit, round2, BulkResult, Category, Garment, Preferences, RecommendationMetadata,
        RecommendationResponse, ScoredOutfit,
    },
    services::{
        cache::{fingerprint, RecommendationCache},
        catalog::Catalog,
        color::ColorHarmony,
        combinations::{OutfitCombinations, SlotCandidates},
        compatibility::CompatibilityFilter,
        scoring::ScoringEngine,
    },
};

/// Most product ids accepted by one bulk request
pub const MAX_BULK_PRODUCTS: usize = 10;

/// Milliseconds since `started`, rounded to two decimals
fn elapsed_ms(started: Instant) -> f64 {
    round2(started.elapsed().as_secs_f64() * 1000.0)
}

/// Builds complete outfits around a catalog product
///
/// Holds the catalog, the cache, and the color tables; clones share all three.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<dyn Catalog>,
    cache: RecommendationCache,
    colors: Arc<ColorHarmony>,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn Catalog>, cache: RecommendationCache) -> Self {
        Self {
            catalog,
            cache,
            colors: Arc::new(ColorHarmony::new()),
        }
    }

    /// Returns up to `limit` ranked outfits containing `product_id`
    ///
    /// A cached response for the same request is returned as-is, marked
    /// `cached` and with a fresh `response_time_ms`.
    pub async fn recommend(
        &self,
        product_id: i64,
        preferences: Preferences,
        limit: usize,
    ) -> AppResult<RecommendationResponse> {
        let started = Instant::now();
        let key = fingerprint(product_id, &preferences, limit);

        if let Some(mut response) = self.cache.get::<RecommendationResponse>(&key).await {
            response.cached = true;
            response.response_time_ms = elapsed_ms(started);
            tracing::debug!(product_id, "Recommendation cache hit");
            return Ok(response);
        }

        let result = self.generate(product_id, &preferences, limit, started).await;
        let response = match result {
            Ok(response) => response,
            Err(AppError::NotFound(id)) => return Err(AppError::NotFound(id)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    product_id,
                    preferences = ?preferences,
                    "Failed to generate recommendations"
                );
                return Err(e);
            }
        };

        self.cache.set(&key, &response).await;

        tracing::info!(
            product_id,
            total_generated = response.metadata.total_generated,
            returned = response.metadata.returned,
            processing_time_ms = response.metadata.processing_time_ms,
            "Generated recommendations"
        );

        Ok(response)
    }

    async fn generate(
        &self,
        product_id: i64,
        preferences: &Preferences,
        limit: usize,
        started: Instant,
    ) -> AppResult<RecommendationResponse> {
        let base = self
            .catalog
            .get_active_by_id(product_id)
            .await?
            .ok_or(AppError::NotFound(product_id))?;

        let slots = self.candidates(&base, preferences).await?;

        let id_prefix = format!("outfit_{}", Utc::now().timestamp_millis());
        let engine = ScoringEngine::new(&self.colors);
        let mut scored: Vec<ScoredOutfit> = OutfitCombinations::new(&slots, id_prefix)
            .map(|outfit| engine.score_outfit(outfit, preferences))
            .collect();
        let total_generated = scored.len();

        // sort_by is stable: equal scores keep generation order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        let recommendations = dedupe(scored, limit);

        let processing_time_ms = elapsed_ms(started);
        Ok(RecommendationResponse {
            base_product: base,
            metadata: RecommendationMetadata {
                total_generated,
                returned: recommendations.len(),
                processing_time_ms,
                preferences: *preferences,
            },
            recommendations,
            cached: false,
            response_time_ms: processing_time_ms,
        })
    }

    /// Fills every slot other than the base's from the catalog
    async fn candidates(
        &self,
        base: &Garment,
        preferences: &Preferences,
    ) -> AppResult<SlotCandidates> {
        let filter = CompatibilityFilter::new(&self.colors);
        let mut slots = SlotCandidates::around(base);

        for category in Category::ALL {
            if category == base.category {
                continue;
            }
            let query = CompatibilityFilter::query(base, category, preferences);
            let matches = self.catalog.query_active(&query).await?;
            let selected = filter.select(base, &query, matches);
            tracing::debug!(%category, candidates = selected.len(), "Selected slot candidates");
            *slots.slot_mut(category) = selected;
        }

        Ok(slots)
    }

    /// Recommends for each product in order, isolating per-product failures
    pub async fn recommend_bulk(
        &self,
        product_ids: &[i64],
        preferences: Preferences,
        limit: Option<i64>,
    ) -> AppResult<Vec<BulkResult>> {
        if product_ids.is_empty() {
            return Err(AppError::InvalidInput("product_ids is required".to_string()));
        }
        if product_ids.len() > MAX_BULK_PRODUCTS {
            return Err(AppError::InvalidInput(format!(
                "Maximum {} products allowed per request",
                MAX_BULK_PRODUCTS
            )));
        }

        let limit = clamp_limit(limit);
        let mut results = Vec::with_capacity(product_ids.len());
        for &product_id in product_ids {
            let result = match self.recommend(product_id, preferences, limit).await {
                Ok(response) => BulkResult::succeeded(product_id, response),
                Err(e) => BulkResult::failed(product_id, e.public_message()),
            };
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.success).count();
        tracing::info!(requested = product_ids.len(), failed, "Processed bulk recommendations");

        Ok(results)
    }
}

/// Keeps the first outfit of each item set, up to `limit`
fn dedupe(ranked: Vec<ScoredOutfit>, limit: usize) -> Vec<ScoredOutfit> {
    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|scored| seen.insert(scored.outfit.signature()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::GENERIC_FAILURE;
    use crate::models::{Gender, Occasion, PriceRange, Style};
    use crate::services::catalog::{InMemoryCatalog, MockCatalog};
    use crate::services::test_support::*;

    fn wardrobe() -> Vec<Garment> {
        vec![
            with_gender(styled(garment(1, Category::Top, "navy"), Style::Formal), Gender::Male),
            styled(garment(2, Category::Bottom, "khaki"), Style::Formal),
            styled(garment(3, Category::Bottom, "gray"), Style::SmartCasual),
            styled(garment(4, Category::Bottom, "black"), Style::Casual),
            with_gender(
                styled(garment(5, Category::Bottom, "white"), Style::Formal),
                Gender::Female,
            ),
            styled(garment(6, Category::Footwear, "brown"), Style::Formal),
            styled(garment(7, Category::Footwear, "black"), Style::SmartCasual),
            with_sub_category(
                styled(garment(8, Category::Accessory, "brown"), Style::Formal),
                "belt",
            ),
            with_sub_category(
                styled(garment(9, Category::Accessory, "silver"), Style::SmartCasual),
                "watch",
            ),
            inactive(styled(garment(10, Category::Top, "white"), Style::Formal)),
        ]
    }

    fn service_with(catalog: Arc<dyn Catalog>) -> RecommendationService {
        let cache = RecommendationCache::new(Arc::new(MemoryStore::new()), 300);
        RecommendationService::new(catalog, cache)
    }

    fn service() -> RecommendationService {
        service_with(Arc::new(InMemoryCatalog::new(wardrobe())))
    }

    #[tokio::test]
    async fn test_navy_formal_top_outfits() {
        let response = service()
            .recommend(1, Preferences::default(), 3)
            .await
            .unwrap();

        assert_eq!(response.base_product.id, 1);
        assert!(!response.cached);
        assert_eq!(response.recommendations.len(), 3);
        assert_eq!(response.metadata.returned, 3);
        // 2 bottoms x 2 shoes x 3 accessory sets
        assert_eq!(response.metadata.total_generated, 12);

        for scored in &response.recommendations {
            assert_eq!(scored.outfit.top.id, 1);
            // casual and female bottoms never qualify
            assert!([2, 3].contains(&scored.outfit.bottom.id));
            assert!((0.0..=1.0).contains(&scored.score));
        }

        let scores: Vec<f64> = response.recommendations.iter().map(|s| s.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_timings_are_rounded_to_two_decimals() {
        let service = service();

        for _ in 0..2 {
            let response = service
                .recommend(1, Preferences::default(), 3)
                .await
                .unwrap();
            assert_eq!(response.response_time_ms, round2(response.response_time_ms));
            assert_eq!(
                response.metadata.processing_time_ms,
                round2(response.metadata.processing_time_ms)
            );
        }
    }

    #[tokio::test]
    async fn test_results_respect_limit_with_unique_signatures() {
        let service = service();

        for limit in [1, 5, 20] {
            let response = service
                .recommend(1, Preferences::default(), limit)
                .await
                .unwrap();
            assert!(response.recommendations.len() <= limit);

            let signatures: HashSet<Vec<i64>> = response
                .recommendations
                .iter()
                .map(|s| s.outfit.signature())
                .collect();
            assert_eq!(signatures.len(), response.recommendations.len());
        }
    }

    #[tokio::test]
    async fn test_repeat_request_is_served_from_cache() {
        let service = service();
        let prefs = Preferences {
            occasion: Some(Occasion::Casual),
            season: None,
            budget: Some(PriceRange::Mid),
        };

        let first = service.recommend(1, prefs, 3).await.unwrap();
        let second = service.recommend(1, prefs, 3).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.base_product, second.base_product);
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(first.metadata, second.metadata);
    }

    #[tokio::test]
    async fn test_missing_and_inactive_products_are_not_found() {
        let service = service();

        let missing = service.recommend(999, Preferences::default(), 3).await;
        assert!(matches!(missing, Err(AppError::NotFound(999))));

        let inactive = service.recommend(10, Preferences::default(), 3).await;
        assert!(matches!(inactive, Err(AppError::NotFound(10))));
    }

    #[tokio::test]
    async fn test_unfillable_slot_yields_empty_recommendations() {
        let catalog = InMemoryCatalog::new(vec![
            garment(1, Category::Top, "navy"),
            garment(2, Category::Bottom, "khaki"),
        ]);
        let response = service_with(Arc::new(catalog))
            .recommend(1, Preferences::default(), 3)
            .await
            .unwrap();

        assert!(response.recommendations.is_empty());
        assert_eq!(response.metadata.total_generated, 0);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_catalog() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_get_active_by_id()
            .times(1)
            .returning(|id| {
                Ok(Some(garment(id, Category::Top, "navy")))
            });
        catalog.expect_query_active().returning(|_| Ok(Vec::new()));

        let service = service_with(Arc::new(catalog));
        service.recommend(1, Preferences::default(), 3).await.unwrap();
        let second = service.recommend(1, Preferences::default(), 3).await.unwrap();

        assert!(second.cached);
    }

    #[tokio::test]
    async fn test_catalog_failure_is_internal() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_get_active_by_id()
            .returning(|_| Err(AppError::Internal("catalog unavailable".to_string())));

        let result = service_with(Arc::new(catalog))
            .recommend(1, Preferences::default(), 3)
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_bulk_isolates_failures() {
        let results = service()
            .recommend_bulk(&[1, 999, 6], Preferences::default(), None)
            .await
            .unwrap();

        let ids: Vec<i64> = results.iter().map(|r| r.product_id).collect();
        assert_eq!(ids, vec![1, 999, 6]);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].error.as_deref(), Some("Product not found: 999"));
        assert!(results[2].success);
    }

    #[tokio::test]
    async fn test_bulk_hides_internal_errors() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_get_active_by_id()
            .returning(|_| Err(AppError::Internal("connection reset".to_string())));

        let results = service_with(Arc::new(catalog))
            .recommend_bulk(&[1], Preferences::default(), Some(3))
            .await
            .unwrap();
        assert_eq!(results[0].error.as_deref(), Some(GENERIC_FAILURE));
    }

    #[tokio::test]
    async fn test_bulk_validates_product_ids() {
        let service = service();

        let empty = service.recommend_bulk(&[], Preferences::default(), None).await;
        assert!(matches!(empty, Err(AppError::InvalidInput(ref m)) if m == "product_ids is required"));

        let ids: Vec<i64> = (1..=11).collect();
        let too_many = service.recommend_bulk(&ids, Preferences::default(), None).await;
        assert!(matches!(
            too_many,
            Err(AppError::InvalidInput(ref m)) if m == "Maximum 10 products allowed per request"
        ));
    }

    #[test]
    fn test_dedupe_keeps_first_of_each_item_set() {
        let colors = ColorHarmony::new();
        let engine = ScoringEngine::new(&colors);
        let mut slots = SlotCandidates::around(&garment(1, Category::Top, "navy"));
        slots.bottoms = vec![garment(2, Category::Bottom, "khaki")];
        slots.footwear = vec![garment(3, Category::Footwear, "brown")];

        let outfit = OutfitCombinations::new(&slots, "o").next().unwrap();
        let mut twin = outfit.clone();
        twin.id = "o_twin".to_string();

        let ranked = vec![
            engine.score_outfit(outfit, &Preferences::default()),
            engine.score_outfit(twin, &Preferences::default()),
        ];
        let kept = dedupe(ranked, 5);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].outfit.id, "o_0");
    }
}
