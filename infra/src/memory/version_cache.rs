//! In-memory token version cache with expiry

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use ext_core::errors::DomainResult;
use ext_core::services::TokenVersionCache;

/// Entries expire after `ttl`; a `None` version is an invalidation tombstone
pub struct InMemoryVersionCache {
    entries: Mutex<HashMap<String, (Option<i64>, Instant)>>,
    ttl: Duration,
}

impl InMemoryVersionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl TokenVersionCache for InMemoryVersionCache {
    async fn get(&self, user_id: &str) -> DomainResult<Option<i64>> {
        let mut entries = self.entries.lock().await;
        match entries.get(user_id) {
            Some((version, expires)) if *expires > Instant::now() => Ok(*version),
            Some(_) => {
                entries.remove(user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn store_if_newer(&self, user_id: &str, version: i64) -> DomainResult<()> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let expires = now + self.ttl;
        match entries.get_mut(user_id) {
            Some((None, live_until)) if *live_until > now => {}
            Some((Some(current), live_until)) if *live_until > now && *current >= version => {}
            Some(entry) => *entry = (Some(version), expires),
            None => {
                entries.insert(user_id.to_string(), (Some(version), expires));
            }
        }
        Ok(())
    }

    async fn invalidate(&self, user_id: &str) -> DomainResult<()> {
        let expires = Instant::now() + self.ttl;
        self.entries
            .lock()
            .await
            .insert(user_id.to_string(), (None, expires));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_lowers_a_live_entry() {
        let cache = InMemoryVersionCache::new(Duration::from_secs(60));
        cache.store_if_newer("u1", 3).await.unwrap();
        cache.store_if_newer("u1", 2).await.unwrap();
        assert_eq!(cache.get("u1").await.unwrap(), Some(3));

        cache.store_if_newer("u1", 4).await.unwrap();
        assert_eq!(cache.get("u1").await.unwrap(), Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = InMemoryVersionCache::new(Duration::from_secs(60));
        cache.store_if_newer("u1", 1).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(cache.get("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = InMemoryVersionCache::new(Duration::from_secs(60));
        cache.store_if_newer("u1", 1).await.unwrap();
        cache.invalidate("u1").await.unwrap();
        assert_eq!(cache.get("u1").await.unwrap(), None);

        // Late writers cannot repopulate an invalidated entry
        cache.store_if_newer("u1", 1).await.unwrap();
        cache.store_if_newer("u1", 2).await.unwrap();
        assert_eq!(cache.get("u1").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tombstone_expires() {
        let cache = InMemoryVersionCache::new(Duration::from_secs(60));
        cache.invalidate("u1").await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        cache.store_if_newer("u1", 3).await.unwrap();
        assert_eq!(cache.get("u1").await.unwrap(), Some(3));
    }
}
