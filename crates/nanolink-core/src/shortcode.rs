use crate::base62;
use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated short code identifier for a shortened URL.
///
/// Custom aliases must be 4-16 characters drawn from the base62
/// alphabet `[0-9A-Za-z]`. Generator-produced codes bypass validation
/// via [`ShortCode::new_unchecked`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortCode(String);

/// Minimum length of a valid short code.
///
/// Generators must respect this too: every minted code has to survive a
/// round trip through [`ShortCode::new`] when it comes back from a caller.
pub const MIN_LENGTH: usize = 4;
/// Maximum length of a valid short code.
pub const MAX_LENGTH: usize = 16;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are 4-16 characters and contain only `[0-9A-Za-z]`.
    pub fn new(code: impl Into<String>) -> Result<Self, ShortenerError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (generators that are guaranteed to emit base62 output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the full shortened URL under the given base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(code: &str) -> Result<(), ShortenerError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(ShortenerError::InvalidAlias(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !base62::is_base62(code) {
            return Err(ShortenerError::InvalidAlias(format!(
                "must contain only characters from [0-9A-Za-z]: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
