pub mod cache;
pub mod catalog;
pub mod color;
pub mod combinations;
pub mod compatibility;
pub mod recommendations;
pub mod scoring;

#[cfg(test)]
mod test_support;

pub use cache::RecommendationCache;
pub use catalog::{Catalog, InMemoryCatalog, PgCatalog};
pub use recommendations::RecommendationService;
