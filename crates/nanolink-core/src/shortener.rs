use crate::repository::UrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Expiration policy for a shortened URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExpirationPolicy {
    /// The shortened URL never expires.
    Never,
    /// The shortened URL expires after a certain duration from now.
    AfterDuration(SignedDuration),
    /// The shortened URL expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

impl ExpirationPolicy {
    /// Converts the policy into an absolute expiry, anchored at `now`.
    pub fn expire_at(&self, now: Timestamp) -> Option<Timestamp> {
        match self {
            ExpirationPolicy::Never => None,
            ExpirationPolicy::AfterDuration(duration) => Some(now + *duration),
            ExpirationPolicy::AtTimestamp(timestamp) => Some(*timestamp),
        }
    }
}

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    #[builder(setter(into))]
    pub target_url: String,
    /// The expiration policy for the shortened URL.
    #[builder(default = ExpirationPolicy::Never)]
    pub expiration: ExpirationPolicy,
    /// Optional custom alias for the shortened URL.
    #[builder(default, setter(strip_option))]
    pub custom_alias: Option<ShortCode>,
}

/// The outcome of a shorten request: the minted code and its rendered URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenedUrl {
    pub code: ShortCode,
    pub short_url: String,
}

/// A read-only snapshot of a mapping's analytics fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingStats {
    pub code: ShortCode,
    pub target_url: String,
    pub hit_count: u64,
    pub created_at: Timestamp,
    pub expire_at: Option<Timestamp>,
}

impl MappingStats {
    /// Builds a stats snapshot from a stored mapping.
    pub fn from_mapping(code: ShortCode, mapping: UrlMapping) -> Self {
        Self {
            code,
            target_url: mapping.target_url,
            hit_count: mapping.hit_count,
            created_at: mapping.created_at,
            expire_at: mapping.expire_at,
        }
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the minted code with its
    /// rendered short URL.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenedUrl>;

    /// Resolves a short code to its target URL, counting the hit.
    /// Fails with `NotFound` if the code is unknown or the mapping expired.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;

    /// Returns the analytics snapshot for a short code without counting
    /// a hit. Fails with `NotFound` if unknown or expired.
    async fn stats(&self, code: &ShortCode) -> Result<MappingStats>;

    /// Deletes a shortened URL by its short code.
    /// Fails with `NotFound` if the code is unknown.
    async fn delete(&self, code: &ShortCode) -> Result<()>;
}
