use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use nanolink_core::{
    ReadRepository, Repository, ShortCode, StorageError, StorageResult, UrlMapping,
};
use tracing::trace;

/// In-memory implementation of the repository traits using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API so the
/// check-and-insert is atomic per code: under a race for the same code,
/// exactly one caller succeeds.
///
/// Expired mappings are evicted lazily when a read or insert touches them.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlMapping>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> StorageResult<Option<UrlMapping>> {
        let key = code.as_str();

        let Some(mapping) = self.storage.get(key) else {
            return Ok(None);
        };

        if !mapping.is_live() {
            drop(mapping);
            self.storage.remove(key);
            return Ok(None);
        }

        Ok(Some(mapping.clone()))
    }

    async fn exists(&self, code: &ShortCode) -> StorageResult<bool> {
        Ok(self.get(code).await?.is_some())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, mapping: UrlMapping) -> StorageResult<()> {
        // The entry guard holds the shard lock, making check-and-insert
        // atomic with respect to concurrent inserts of the same code.
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live() {
                    return Err(StorageError::Conflict(code.to_string()));
                }
                // The previous mapping expired; the code may be reused.
                occupied.insert(mapping);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(mapping);
            }
        }

        trace!(code = %code, "inserted mapping");
        Ok(())
    }

    async fn resolve(&self, code: &ShortCode) -> StorageResult<Option<UrlMapping>> {
        let key = code.as_str();

        let Some(mut mapping) = self.storage.get_mut(key) else {
            return Ok(None);
        };

        if !mapping.is_live() {
            drop(mapping);
            self.storage.remove(key);
            return Ok(None);
        }

        mapping.hit_count += 1;
        Ok(Some(mapping.clone()))
    }

    async fn delete(&self, code: &ShortCode) -> StorageResult<bool> {
        Ok(self.storage.remove(code.as_str()).is_some())
    }

    async fn find_by_target(&self, target_url: &str) -> StorageResult<Option<ShortCode>> {
        // Linear scan. A persistent backend would use an index on the
        // target column instead.
        let found = self
            .storage
            .iter()
            .find(|entry| entry.value().is_live() && entry.value().target_url == target_url)
            .map(|entry| ShortCode::new_unchecked(entry.key().clone()));

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn mapping(url: &str, expire_at: Option<Timestamp>) -> UrlMapping {
        UrlMapping::new(url, expire_at)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), mapping("https://example.com", None))
            .await
            .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.target_url, "https://example.com");
        assert_eq!(result.expire_at, None);
        assert_eq!(result.hit_count, 0);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_conflict() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), mapping("https://example.com", None))
            .await
            .unwrap();

        let err = repo
            .insert(&code("abc123"), mapping("https://other.com", None))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn insert_over_expired_entry() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);

        repo.insert(&code("abc123"), mapping("https://old.com", Some(expired)))
            .await
            .unwrap();

        // Should succeed because the existing entry is expired.
        repo.insert(&code("abc123"), mapping("https://new.com", None))
            .await
            .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.target_url, "https://new.com");
    }

    #[tokio::test]
    async fn expired_entry_returns_none() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);

        repo.insert(
            &code("abc123"),
            mapping("https://example.com", Some(expired)),
        )
        .await
        .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn not_yet_expired_entry() {
        let repo = InMemoryRepository::new();
        let future = Timestamp::now() + SignedDuration::from_hours(1);

        repo.insert(
            &code("abc123"),
            mapping("https://example.com", Some(future)),
        )
        .await
        .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.target_url, "https://example.com");
    }

    #[tokio::test]
    async fn resolve_counts_hits() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), mapping("https://example.com", None))
            .await
            .unwrap();

        let first = repo.resolve(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(first.hit_count, 1);

        let second = repo.resolve(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(second.hit_count, 2);

        // Plain reads don't touch the counter.
        let read = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(read.hit_count, 2);
    }

    #[tokio::test]
    async fn resolve_expired_returns_none() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);

        repo.insert(
            &code("abc123"),
            mapping("https://example.com", Some(expired)),
        )
        .await
        .unwrap();

        assert!(repo.resolve(&code("abc123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), mapping("https://example.com", None))
            .await
            .unwrap();

        assert!(repo.delete(&code("abc123")).await.unwrap());
        assert!(repo.get(&code("abc123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(!repo.delete(&code("nope")).await.unwrap());
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(&code("abc123")).await.unwrap());

        repo.insert(&code("abc123"), mapping("https://example.com", None))
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn exists_returns_false_for_expired() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);

        repo.insert(
            &code("abc123"),
            mapping("https://example.com", Some(expired)),
        )
        .await
        .unwrap();

        assert!(!repo.exists(&code("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn find_by_target_returns_live_code() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), mapping("https://example.com", None))
            .await
            .unwrap();

        let found = repo.find_by_target("https://example.com").await.unwrap();
        assert_eq!(found.unwrap().as_str(), "abc123");

        let missing = repo.find_by_target("https://other.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn find_by_target_skips_expired() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);

        repo.insert(
            &code("abc123"),
            mapping("https://example.com", Some(expired)),
        )
        .await
        .unwrap();

        let found = repo.find_by_target("https://example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn concurrent_insert_same_code_single_winner() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(
                    &code("contested"),
                    mapping(&format!("https://example{}.com", i), None),
                )
                .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(StorageError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test]
    async fn concurrent_access_distinct_codes() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = ShortCode::new_unchecked(format!("code{:03}", i));
                repo.insert(&c, UrlMapping::new(format!("https://example{}.com", i), None))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let c = ShortCode::new_unchecked(format!("code{:03}", i));
            let result = repo.get(&c).await.unwrap().unwrap();
            assert_eq!(result.target_url, format!("https://example{}.com", i));
        }
    }
}
