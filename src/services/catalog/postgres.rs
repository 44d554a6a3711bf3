use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Category, Garment, Gender, Occasion, PriceRange, Season, Style},
    services::{catalog::Catalog, compatibility::CatalogQuery},
};

const GARMENT_COLUMNS: &str = r#"
    p.id,
    p.name,
    p.category,
    p.sub_category,
    LOWER(p.color) AS color,
    p.style,
    p.gender,
    p.price::float8 AS price,
    p.price_range,
    p.image_url,
    p.tags,
    p.is_active,
    ARRAY(SELECT o.occasion FROM product_occasions o WHERE o.product_id = p.id ORDER BY o.id) AS occasions,
    ARRAY(SELECT s.season FROM product_seasons s WHERE s.product_id = p.id ORDER BY s.id) AS seasons
"#;

/// Raw product row as stored in Postgres
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    sub_category: String,
    color: String,
    style: String,
    gender: String,
    price: f64,
    price_range: String,
    image_url: Option<String>,
    tags: Vec<String>,
    is_active: bool,
    occasions: Vec<String>,
    seasons: Vec<String>,
}

impl ProductRow {
    /// Converts the row, or `None` if a classification column holds an unknown value
    fn into_garment(self) -> Option<Garment> {
        let garment = Garment {
            id: self.id,
            name: self.name,
            category: Category::parse(&self.category)?,
            sub_category: self.sub_category,
            color: self.color,
            style: Style::parse(&self.style)?,
            gender: Gender::parse(&self.gender)?,
            price: self.price,
            price_range: PriceRange::parse(&self.price_range)?,
            image_url: self.image_url,
            occasions: self.occasions.iter().filter_map(|o| Occasion::parse(o)).collect(),
            seasons: self.seasons.iter().filter_map(|s| Season::parse(s)).collect(),
            tags: self.tags,
            active: self.is_active,
        };
        Some(garment)
    }
}

fn convert_rows(rows: Vec<ProductRow>) -> Vec<Garment> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            let garment = row.into_garment();
            if garment.is_none() {
                tracing::warn!(product_id = id, "Product has unknown classification, skipping");
            }
            garment
        })
        .collect()
}

/// Catalog backed by the `products` tables in Postgres
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Catalog for PgCatalog {
    async fn get_active_by_id(&self, id: i64) -> AppResult<Option<Garment>> {
        let sql = format!(
            "SELECT {GARMENT_COLUMNS} FROM products p WHERE p.id = $1 AND p.is_active = true"
        );

        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| convert_rows(vec![r])).and_then(|mut g| g.pop()))
    }

    async fn query_active(&self, query: &CatalogQuery) -> AppResult<Vec<Garment>> {
        let sql = format!(
            r#"
            SELECT {GARMENT_COLUMNS}
            FROM products p
            WHERE p.category = $1
              AND p.is_active = true
              AND p.style = ANY($2)
              AND p.gender = ANY($3)
              AND ($4::text IS NULL OR EXISTS (
                    SELECT 1 FROM product_occasions o
                    WHERE o.product_id = p.id AND o.occasion = $4))
              AND ($5::text IS NULL OR EXISTS (
                    SELECT 1 FROM product_seasons s
                    WHERE s.product_id = p.id AND s.season IN ($5, 'all')))
            ORDER BY p.name, p.id
            "#
        );

        let styles: Vec<String> = query.styles.iter().map(|s| s.as_str().to_string()).collect();
        let genders: Vec<String> = query.genders.iter().map(|g| g.as_str().to_string()).collect();

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(query.category.as_str())
            .bind(&styles)
            .bind(&genders)
            .bind(query.occasion.map(|o| o.as_str()))
            .bind(query.season.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        let garments = convert_rows(rows);
        tracing::debug!(
            category = %query.category,
            matched = garments.len(),
            "Catalog query completed"
        );

        Ok(garments)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
