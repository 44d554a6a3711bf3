use crate::error::AppResult;

/// Key/value store behind the recommendation cache
///
/// Implementations synchronize internally and may be shared by any number of
/// concurrent requests. Writes are last-write-wins; no per-key exclusion is
/// provided.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the live value for `key`, if any
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key` for `ttl_secs` seconds
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> AppResult<()>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
