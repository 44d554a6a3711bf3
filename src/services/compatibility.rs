use crate::models::{Category, Garment, Gender, Occasion, Preferences, Season, Style};

use super::color::ColorHarmony;

/// Candidates kept per slot after filtering
pub const MAX_PER_CATEGORY: usize = 4;

/// Attribute predicate pushed down to the catalog
///
/// Covers every filter rule except color, which needs the harmony tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: Category,
    pub styles: Vec<Style>,
    pub genders: Vec<Gender>,
    pub occasion: Option<Occasion>,
    pub season: Option<Season>,
}

impl CatalogQuery {
    /// Whether a garment satisfies the query
    pub fn matches(&self, garment: &Garment) -> bool {
        garment.active
            && garment.category == self.category
            && self.styles.contains(&garment.style)
            && self.genders.contains(&garment.gender)
            && self.occasion.map_or(true, |o| garment.has_occasion(o))
            && self
                .season
                .map_or(true, |s| garment.seasons.iter().any(|gs| *gs == s || *gs == Season::All))
    }
}

/// Narrows catalog garments to the best candidates for one outfit slot
pub struct CompatibilityFilter<'a> {
    colors: &'a ColorHarmony,
}

impl<'a> CompatibilityFilter<'a> {
    pub fn new(colors: &'a ColorHarmony) -> Self {
        Self { colors }
    }

    /// Builds the catalog query for `category` around `base`
    ///
    /// Style compatibility is looked up by the base garment's style.
    pub fn query(base: &Garment, category: Category, preferences: &Preferences) -> CatalogQuery {
        CatalogQuery {
            category,
            styles: base.style.compatible_styles().to_vec(),
            genders: base.gender.compatible_genders(),
            occasion: preferences.occasion,
            season: preferences.season,
        }
    }

    /// Keeps color-compatible matches, best harmony first, at most `MAX_PER_CATEGORY`
    ///
    /// Ties keep catalog order.
    pub fn select(
        &self,
        base: &Garment,
        query: &CatalogQuery,
        candidates: Vec<Garment>,
    ) -> Vec<Garment> {
        let mut ranked: Vec<(f64, Garment)> = candidates
            .into_iter()
            .filter(|g| query.matches(g))
            .filter(|g| self.colors.are_compatible(&base.color, &g.color))
            .map(|g| (self.colors.harmony_score(&base.color, &g.color), g))
            .collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(MAX_PER_CATEGORY);
        ranked.into_iter().map(|(_, g)| g).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::*;

    fn navy_formal_top() -> Garment {
        with_gender(
            styled(garment(1, Category::Top, "navy"), Style::Formal),
            Gender::Male,
        )
    }

    #[test]
    fn test_query_uses_base_style_and_gender() {
        let base = navy_formal_top();
        let query = CompatibilityFilter::query(&base, Category::Bottom, &Preferences::default());

        assert_eq!(query.category, Category::Bottom);
        assert_eq!(query.styles, vec![Style::Formal, Style::SmartCasual]);
        assert_eq!(query.genders, vec![Gender::Male, Gender::Unisex]);
        assert_eq!(query.occasion, None);
    }

    #[test]
    fn test_select_drops_incompatible_styles_and_genders() {
        let colors = ColorHarmony::new();
        let filter = CompatibilityFilter::new(&colors);
        let base = navy_formal_top();
        let query = CompatibilityFilter::query(&base, Category::Bottom, &Preferences::default());

        let candidates = vec![
            styled(garment(10, Category::Bottom, "khaki"), Style::Formal),
            styled(garment(11, Category::Bottom, "khaki"), Style::Casual),
            with_gender(
                styled(garment(12, Category::Bottom, "khaki"), Style::SmartCasual),
                Gender::Female,
            ),
            styled(garment(13, Category::Bottom, "gray"), Style::SmartCasual),
            inactive(styled(garment(14, Category::Bottom, "khaki"), Style::Formal)),
            styled(garment(15, Category::Top, "khaki"), Style::Formal),
        ];

        let ids: Vec<i64> = filter
            .select(&base, &query, candidates)
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![10, 13]);
    }

    #[test]
    fn test_select_applies_occasion_and_season_preferences() {
        let colors = ColorHarmony::new();
        let filter = CompatibilityFilter::new(&colors);
        let base = navy_formal_top();
        let prefs = Preferences {
            occasion: Some(Occasion::Office),
            season: Some(Season::Winter),
            budget: None,
        };
        let query = CompatibilityFilter::query(&base, Category::Footwear, &prefs);

        let shoe = |id| styled(garment(id, Category::Footwear, "brown"), Style::Formal);
        let candidates = vec![
            with_seasons(with_occasions(shoe(20), &[Occasion::Office]), &[Season::Winter]),
            with_seasons(with_occasions(shoe(21), &[Occasion::Office]), &[Season::All]),
            with_seasons(with_occasions(shoe(22), &[Occasion::Office]), &[Season::Summer]),
            with_seasons(with_occasions(shoe(23), &[Occasion::Party]), &[Season::All]),
        ];

        let ids: Vec<i64> = filter
            .select(&base, &query, candidates)
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![20, 21]);
    }

    #[test]
    fn test_select_ranks_by_harmony_and_keeps_catalog_order_on_ties() {
        let colors = ColorHarmony::new();
        let filter = CompatibilityFilter::new(&colors);
        let base = navy_formal_top();
        let query = CompatibilityFilter::query(&base, Category::Bottom, &Preferences::default());

        let bottom = |id, color| styled(garment(id, Category::Bottom, color), Style::Formal);
        let candidates = vec![
            bottom(30, "white"),  // 0.9
            bottom(31, "navy"),   // 0.7
            bottom(32, "khaki"),  // 1.0
            bottom(33, "red"),    // 1.0 (red lists navy)
            bottom(34, "purple"), // incompatible
            bottom(35, "gray"),   // 0.9
            bottom(36, "tan"),    // 1.0
        ];

        let ids: Vec<i64> = filter
            .select(&base, &query, candidates)
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![32, 33, 36, 30]);
    }

    #[test]
    fn test_unisex_base_accepts_every_gender() {
        let colors = ColorHarmony::new();
        let filter = CompatibilityFilter::new(&colors);
        let base = garment(1, Category::Top, "white");
        let query = CompatibilityFilter::query(&base, Category::Bottom, &Preferences::default());

        let candidates = vec![
            with_gender(garment(2, Category::Bottom, "black"), Gender::Male),
            with_gender(garment(3, Category::Bottom, "black"), Gender::Female),
        ];
        assert_eq!(filter.select(&base, &query, candidates).len(), 2);
    }
}
