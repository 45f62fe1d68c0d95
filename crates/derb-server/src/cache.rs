/// Redis caching layer for the Derb server.
///
/// All operations return `Option<T>` for graceful degradation.
///
/// Key schema (namespace `derb:v1:`):
/// - `derb:v1:search:{sha256(len:query len:category len:tag)}`: JSON Vec<String> of matching slugs (TTL 3600s)
/// - `derb:v1:links:sites`: JSON Vec<ContentSite> (TTL 3600s)
use derb_common::links::ContentSite;
use derb_common::redis::RedisCache;
use derb_content::SearchFilter;
use sha2::{Digest, Sha256};

pub const NAMESPACE: &str = "derb:v1:";
const SEARCH_TTL_SECS: u64 = 3600;
const LINKS_TTL_SECS: u64 = 3600;
const SITES_KEY: &str = "links:sites";

pub struct ResponseCache {
    redis: RedisCache,
}

impl ResponseCache {
    pub fn new(redis: RedisCache) -> Self {
        Self { redis }
    }

    pub fn disabled() -> Self {
        Self::new(RedisCache::disabled(NAMESPACE))
    }

    pub async fn is_available(&self) -> bool {
        self.redis.is_available().await
    }

    pub async fn get_search_keys(&self, filter: &SearchFilter) -> Option<Vec<String>> {
        self.redis.get_json(&search_key(filter)).await
    }

    pub async fn set_search_keys(&self, filter: &SearchFilter, keys: &[String]) {
        self.redis
            .set_json(&search_key(filter), keys, SEARCH_TTL_SECS)
            .await;
    }

    pub async fn get_content_sites(&self) -> Option<Vec<ContentSite>> {
        self.redis.get_json(SITES_KEY).await
    }

    pub async fn set_content_sites(&self, sites: &[ContentSite]) {
        self.redis.set_json(SITES_KEY, sites, LINKS_TTL_SECS).await;
    }

    /// Drops every cached entry, e.g. after deploying a new dataset.
    pub async fn invalidate_all(&self) {
        self.redis.clear().await;
    }
}

/// Each field is length-prefixed so free text in one field can never spill
/// into the next.
fn search_key(filter: &SearchFilter) -> String {
    let fields = [
        filter.query().unwrap_or_default(),
        filter.category().map(|c| c.slug()).unwrap_or_default(),
        filter.tag().unwrap_or_default(),
    ];
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    let hash = hasher.finalize();
    format!("search:{:x}", hash)
}
