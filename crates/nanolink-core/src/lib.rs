//! Core types and traits for the nanolink URL shortener.
//!
//! This crate provides the shared vocabulary used by the generator,
//! storage, and shortener service crates: the validated [`ShortCode`],
//! the persisted [`UrlMapping`], the repository contracts, and the
//! error taxonomy.

pub mod base62;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError, StorageResult};
pub use repository::{ReadRepository, Repository, UrlMapping};
pub use shortcode::ShortCode;
pub use shortener::{ExpirationPolicy, MappingStats, ShortenParams, ShortenedUrl, Shortener};
