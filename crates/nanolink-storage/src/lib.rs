//! Repository implementations for the nanolink URL shortener.
//!
//! The backing technology is deliberately kept behind the repository
//! traits from `nanolink_core`; this crate ships the in-memory reference
//! implementation used by the service and its tests.

pub mod memory;

pub use memory::InMemoryRepository;
