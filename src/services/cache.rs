use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

use crate::{db::CacheStore, models::Preferences};

/// Prefix for every recommendation cache key
pub const KEY_PREFIX: &str = "outfit_rec";

/// Builds the cache key for a recommendation request
///
/// The request is rendered as JSON with sorted keys and hashed, so equal
/// requests always produce the same key.
pub fn fingerprint(product_id: i64, preferences: &Preferences, limit: usize) -> String {
    // json! objects are BTreeMap-backed, which keeps keys sorted
    let canonical = serde_json::json!({
        "limit": limit,
        "preferences": preferences,
        "product_id": product_id,
    });

    let digest = Sha256::digest(canonical.to_string().as_bytes());
    format!("{}:{}", KEY_PREFIX, hex::encode(digest))
}

/// Typed wrapper over a [`CacheStore`] that never fails a request
///
/// Backend and (de)serialization errors are logged and treated as a miss or a
/// dropped write.
#[derive(Clone)]
pub struct RecommendationCache {
    store: Arc<dyn CacheStore>,
    ttl_secs: u64,
}

impl RecommendationCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl_secs: u64) -> Self {
        Self { store, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, store = self.store.name(), "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Discarding unreadable cache entry");
                None
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.store.set(key, payload, self.ttl_secs).await {
            tracing::warn!(error = %e, store = self.store.name(), "Cache write failed");
        }
    }
}
