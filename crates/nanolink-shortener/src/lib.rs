//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], the orchestration layer
//! that ties a repository and a code generator together: it validates
//! target URLs, mints codes (absorbing generated-code collisions with a
//! bounded retry loop), converts expiration policies, and renders full
//! short URLs against the configured base URL. Core types are
//! re-exported from `nanolink_core`.

pub mod config;
pub mod service;

pub use config::ShortenerConfig;
pub use nanolink_core::{
    MappingStats, ShortCode, ShortenParams, ShortenedUrl, Shortener, ShortenerError,
};
pub use service::{ShortenerService, MAX_GENERATE_ATTEMPTS};
