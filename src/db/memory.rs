use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::db::cache::CacheStore;
use crate::error::{AppError, AppResult};

/// Entries at which a write also sweeps expired keys
const SWEEP_THRESHOLD: usize = 1024;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local TTL cache
///
/// The lock is never held across an await point.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("Memory cache lock poisoned".to_string())
}

#[async_trait::async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> AppResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().map_err(poisoned)?;

        if entries.len() >= SWEEP_THRESHOLD {
            entries.retain(|_, entry| now < entry.expires_at);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + Duration::from_secs(ttl_secs),
            },
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
