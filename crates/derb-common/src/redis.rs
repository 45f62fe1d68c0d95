/// Namespaced Redis cache with graceful degradation.
///
/// Every key is prefixed with the namespace given at construction (e.g.
/// `derb:v1:`). On any Redis error the operation logs a warning and behaves
/// like a miss, so callers always fall back to computing from the in-memory
/// catalog. The server is fully functional without Redis.
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub struct RedisCache {
    client: Option<redis::Client>,
    namespace: String,
}

impl RedisCache {
    /// A `None` URL or an unparseable one yields a cache that never hits.
    pub fn new(url: Option<&str>, namespace: &str) -> Self {
        let client = url.and_then(|u| {
            redis::Client::open(u)
                .inspect_err(|e| warn!(error = %e, url = u, "failed to create redis client, cache disabled"))
                .ok()
        });
        Self {
            client,
            namespace: namespace.to_string(),
        }
    }

    pub fn disabled(namespace: &str) -> Self {
        Self::new(None, namespace)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn key(&self, key: &str) -> String {
        format!("{}{key}", self.namespace)
    }

    async fn connection(&self) -> Option<redis::aio::MultiplexedConnection> {
        let client = self.client.as_ref()?;
        client
            .get_multiplexed_async_connection()
            .await
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
            .ok()
    }

    /// Sends a PING. `false` when disabled or unreachable.
    pub async fn is_available(&self) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };
        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        pong.is_ok()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.connection().await?;
        let key = self.key(key);
        conn.get::<_, Option<String>>(&key)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis GET failed"))
            .ok()
            .flatten()
    }

    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };
        let key = self.key(key);
        conn.set_ex::<_, _, ()>(&key, value, ttl_secs)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis SETEX failed"))
            .is_ok()
    }

    /// Reads and decodes a JSON value; undecodable entries count as misses.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.get(key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl_secs: u64) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.set_with_ttl(key, &json, ttl_secs).await,
            Err(e) => {
                warn!(error = %e, key, "cache serialization failed");
                false
            }
        }
    }

    /// Deletes every key in this namespace using SCAN (not KEYS, which
    /// blocks).
    pub async fn clear(&self) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };

        let pattern = format!("{}*", self.namespace);
        let mut cursor: u64 = 0;
        let mut removed = 0usize;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = match redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, pattern, "redis SCAN failed");
                    return false;
                }
            };

            if !keys.is_empty() {
                if let Err(e) = conn.del::<_, ()>(&keys).await {
                    warn!(error = %e, "redis batch DEL failed during namespace clear");
                    return false;
                }
                removed += keys.len();
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }
        debug!(namespace = %self.namespace, removed, "cache namespace cleared");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_cache_always_misses() {
        let cache = RedisCache::disabled("derb:test:");
        assert!(!cache.is_available().await);
        assert!(!cache.set_with_ttl("k", "v", 10).await);
        assert!(cache.get("k").await.is_none());
        assert!(cache.get_json::<Vec<String>>("k").await.is_none());
        assert!(!cache.clear().await);
    }

    #[test]
    fn keys_are_namespaced() {
        let cache = RedisCache::disabled("derb:v1:");
        assert_eq!(cache.key("search:abc"), "derb:v1:search:abc");
    }
}
