use crate::Generator;
use nanolink_core::{base62, ShortCode};
use rand::Rng;
use typed_builder::TypedBuilder;

/// Default length of a randomly drawn short code.
///
/// Seven base62 characters give 62^7 (about 3.5e12) possible codes, which
/// keeps the collision probability negligible until the store holds
/// millions of mappings.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// A short code generator drawing fixed-length codes uniformly from the
/// base62 alphabet.
///
/// Candidates are not guaranteed unique; the caller must treat an insert
/// conflict as a retryable collision.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_CODE_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of the default length.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns the configured code length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..base62::ALPHABET.len());
                base62::ALPHABET[idx] as char
            })
            .collect();
        ShortCode::new_unchecked(code)
    }
}
