use crate::error::StorageResult;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL mapping in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlMapping {
    /// The original URL that was shortened. Never mutated after creation.
    pub target_url: String,
    /// When the mapping was created.
    pub created_at: Timestamp,
    /// When the mapping expires, if ever.
    pub expire_at: Option<Timestamp>,
    /// Number of successful resolutions. Incremented only by the resolve path.
    pub hit_count: u64,
}

impl UrlMapping {
    /// Creates a fresh mapping stamped with the current time.
    pub fn new(target_url: impl Into<String>, expire_at: Option<Timestamp>) -> Self {
        Self {
            target_url: target_url.into(),
            created_at: Timestamp::now(),
            expire_at,
            hit_count: 0,
        }
    }

    /// A mapping is live iff it has no expiry or the expiry is in the future.
    pub fn is_live(&self) -> bool {
        self.expire_at
            .is_none_or(|expire_at| Timestamp::now() < expire_at)
    }
}

/// A read-only view of a repository.
///
/// This trait provides only the side-effect-free operations from
/// [`Repository`], for callers that must not mutate mappings.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the live mapping for a short code without touching its
    /// hit counter. Returns `None` if the code is unknown or expired.
    async fn get(&self, code: &ShortCode) -> StorageResult<Option<UrlMapping>>;

    /// Checks whether a short code is currently taken by a live mapping.
    /// Never creates partial state.
    async fn exists(&self, code: &ShortCode) -> StorageResult<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping atomically. Under concurrent attempts for the
    /// same code exactly one caller succeeds; the rest observe
    /// `Err(Conflict)`. An expired mapping may be replaced.
    async fn insert(&self, code: &ShortCode, mapping: UrlMapping) -> StorageResult<()>;

    /// Retrieves the live mapping for a short code and increments its hit
    /// counter as a side effect. Returns `None` if unknown or expired.
    async fn resolve(&self, code: &ShortCode) -> StorageResult<Option<UrlMapping>>;

    /// Deletes the mapping for a short code.
    /// Returns `true` if the mapping existed and was removed.
    async fn delete(&self, code: &ShortCode) -> StorageResult<bool>;

    /// Finds the code of a live mapping pointing at the given target URL,
    /// if any. Used to hand back an existing code when the same URL is
    /// shortened again.
    async fn find_by_target(&self, target_url: &str) -> StorageResult<Option<ShortCode>>;
}
