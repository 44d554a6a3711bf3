pub mod cache;
pub mod memory;
pub mod postgres;
pub mod redis;

pub use cache::CacheStore;
pub use memory::MemoryStore;
pub use postgres::create_pool;
pub use redis::{create_redis_client, CacheWriterHandle, RedisStore};
