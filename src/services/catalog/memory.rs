use crate::{
    error::AppResult,
    models::Garment,
    services::{catalog::Catalog, compatibility::CatalogQuery},
};

/// Catalog held in memory, in insertion order
///
/// Used by tests and by callers that load a catalog snapshot up front.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    garments: Vec<Garment>,
}

impl InMemoryCatalog {
    pub fn new(garments: Vec<Garment>) -> Self {
        Self { garments }
    }

    pub fn len(&self) -> usize {
        self.garments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.garments.is_empty()
    }
}

#[async_trait::async_trait]
impl Catalog for InMemoryCatalog {
    async fn get_active_by_id(&self, id: i64) -> AppResult<Option<Garment>> {
        Ok(self
            .garments
            .iter()
            .find(|g| g.id == id && g.active)
            .cloned())
    }

    async fn query_active(&self, query: &CatalogQuery) -> AppResult<Vec<Garment>> {
        Ok(self
            .garments
            .iter()
            .filter(|g| query.matches(g))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Gender, Style};
    use crate::services::test_support::*;

    #[tokio::test]
    async fn test_inactive_garments_are_not_found() {
        let catalog = InMemoryCatalog::new(vec![
            garment(1, Category::Top, "navy"),
            inactive(garment(2, Category::Top, "navy")),
        ]);

        assert!(catalog.get_active_by_id(1).await.unwrap().is_some());
        assert!(catalog.get_active_by_id(2).await.unwrap().is_none());
        assert!(catalog.get_active_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_preserves_catalog_order() {
        let catalog = InMemoryCatalog::new(vec![
            garment(5, Category::Bottom, "khaki"),
            garment(2, Category::Bottom, "black"),
            garment(9, Category::Top, "white"),
            styled(garment(7, Category::Bottom, "tan"), Style::Formal),
        ]);
        let query = CatalogQuery {
            category: Category::Bottom,
            styles: vec![Style::Casual],
            genders: vec![Gender::Unisex],
            occasion: None,
            season: None,
        };

        let ids: Vec<i64> = catalog
            .query_active(&query)
            .await
            .unwrap()
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![5, 2]);
    }
}
