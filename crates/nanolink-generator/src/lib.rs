//! Short code generation strategies for the nanolink URL shortener.
//!
//! Generators are pure candidate proposers: they never read or mutate
//! storage. Whether a candidate is actually unique is decided by the
//! store's atomic insert; the shortener service absorbs collisions with
//! a bounded retry loop.

pub mod random;
pub mod seq;

use nanolink_core::ShortCode;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Trait for generating short code candidates.
///
/// Implementations are pure generators that don't interact with storage.
/// A [`random::RandomGenerator`] may propose a colliding candidate (the
/// caller retries); a [`seq::SeqGenerator`] never repeats a candidate
/// within a process.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates the next short code candidate.
    fn generate(&self) -> Self::Output;
}
