//! Product catalog abstraction
//!
//! The recommendation engine never writes to the catalog; it reads immutable
//! garment snapshots through this trait. Backends push the attribute filters
//! of a [`CatalogQuery`] down as far as they can and return matches in
//! catalog order.

use crate::{error::AppResult, models::Garment, services::compatibility::CatalogQuery};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalog;
pub use postgres::PgCatalog;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch an active garment by id; `None` if missing or inactive
    async fn get_active_by_id(&self, id: i64) -> AppResult<Option<Garment>>;

    /// Fetch active garments matching the query, in catalog order
    async fn query_active(&self, query: &CatalogQuery) -> AppResult<Vec<Garment>>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
