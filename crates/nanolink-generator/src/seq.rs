use crate::Generator;
use nanolink_core::shortcode::MIN_LENGTH;
use nanolink_core::{base62, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};

/// A short code generator backed by a process-wide monotonic counter.
///
/// Each counter value is base62-encoded and left-padded with `'0'` (the
/// base62 zero digit) up to the minimum code length, so early counter
/// values still mint codes that pass [`ShortCode::new`] validation.
/// Codes never repeat within a process and no collision check against
/// the store is needed. A value consumed by a failed insert is simply
/// burned; the counter never moves backward, so codes cannot be reused
/// after a partial failure.
///
/// For multi-node deployments, give each node a disjoint counter range
/// via [`SeqGenerator::with_offset`] (e.g. node 1 starts at 0, node 2 at
/// 1_000_000_000).
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequence generator starting at zero.
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a sequence generator starting from a specific counter value.
    ///
    /// Useful for resuming from a persisted counter or for partitioning
    /// counter ranges across nodes.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let code = format!("{:0>width$}", base62::encode(count), width = MIN_LENGTH);
        ShortCode::new_unchecked(code)
    }
}
