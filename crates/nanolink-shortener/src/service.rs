use crate::config::ShortenerConfig;
use async_trait::async_trait;
use jiff::Timestamp;
use nanolink_core::{
    MappingStats, Repository, ShortCode, ShortenParams, ShortenedUrl, Shortener, ShortenerError,
    StorageError, UrlMapping,
};
use nanolink_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Upper bound on insert attempts for generated codes.
///
/// Each attempt draws a fresh candidate, so with a 62^7 code space the
/// chance of five consecutive collisions is negligible unless the store
/// is nearly full.
pub const MAX_GENERATE_ATTEMPTS: u32 = 5;

/// A concrete implementation of the `Shortener` trait.
///
/// Wraps a `Repository` and a `Generator` to handle:
/// - URL validation
/// - Short code minting (generated or custom alias)
/// - Collision retry for generated codes
/// - Expiration policy conversion
/// - Short URL rendering against the configured base URL
///
/// Custom alias conflicts are not retried; the caller picked the code
/// and must pick another. Generated-code conflicts are absorbed by a
/// bounded retry loop.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    config: ShortenerConfig,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService`.
    pub fn new(repository: R, generator: G, config: ShortenerConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            config,
        }
    }

    /// Validates that the URL parses as an absolute http(s) URL with a host.
    fn validate_url(url: &str) -> Result<()> {
        let parsed =
            Url::parse(url).map_err(|e| ShortenerError::InvalidUrl(format!("{url}: {e}")))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ShortenerError::InvalidUrl(format!(
                    "URL scheme must be http or https, got '{other}'"
                )));
            }
        }

        if !parsed.has_host() {
            return Err(ShortenerError::InvalidUrl(format!("URL has no host: {url}")));
        }

        Ok(())
    }

    fn rendered(&self, code: ShortCode) -> ShortenedUrl {
        let short_url = code.to_url(&self.config.base_url);
        ShortenedUrl { code, short_url }
    }

    /// Inserts under generated codes, treating a conflict as a retryable
    /// collision up to [`MAX_GENERATE_ATTEMPTS`].
    async fn insert_generated(
        &self,
        target_url: &str,
        expire_at: Option<Timestamp>,
    ) -> Result<ShortCode> {
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code: ShortCode = self.generator.generate().into();

            match self
                .repository
                .insert(&code, UrlMapping::new(target_url, expire_at))
                .await
            {
                Ok(()) => {
                    debug!(code = %code, attempt, "minted generated short code");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, attempt, "generated code collided, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ShortenerError::GenerationExhausted {
            attempts: MAX_GENERATE_ATTEMPTS,
        })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenedUrl> {
        Self::validate_url(&params.target_url)?;

        let expire_at = params.expiration.expire_at(Timestamp::now());

        // Custom alias path: a single attempt; a conflict belongs to the
        // caller, not the retry loop.
        if let Some(alias) = params.custom_alias {
            self.repository
                .insert(&alias, UrlMapping::new(&params.target_url, expire_at))
                .await?;
            debug!(code = %alias, "stored mapping under custom alias");
            return Ok(self.rendered(alias));
        }

        // Shortening the same URL again hands back the existing code,
        // but only for non-expiring requests where the two mappings are
        // truly interchangeable.
        if expire_at.is_none() {
            if let Some(existing) = self.repository.find_by_target(&params.target_url).await? {
                trace!(code = %existing, "reusing existing mapping for target");
                return Ok(self.rendered(existing));
            }
        }

        let code = self.insert_generated(&params.target_url, expire_at).await?;
        Ok(self.rendered(code))
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String> {
        trace!(code = %code, "resolving short code");

        match self.repository.resolve(code).await? {
            Some(mapping) => {
                debug!(code = %code, url = %mapping.target_url, "resolved short code");
                Ok(mapping.target_url)
            }
            None => {
                trace!(code = %code, "short code not found or expired");
                Err(ShortenerError::NotFound(code.to_string()))
            }
        }
    }

    async fn stats(&self, code: &ShortCode) -> Result<MappingStats> {
        match self.repository.get(code).await? {
            Some(mapping) => Ok(MappingStats::from_mapping(code.clone(), mapping)),
            None => Err(ShortenerError::NotFound(code.to_string())),
        }
    }

    async fn delete(&self, code: &ShortCode) -> Result<()> {
        if self.repository.delete(code).await? {
            debug!(code = %code, "deleted mapping");
            Ok(())
        } else {
            Err(ShortenerError::NotFound(code.to_string()))
        }
    }
}
