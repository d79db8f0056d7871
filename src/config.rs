//! Chunking configuration.
//!
//! Two independent thresholds govern a document:
//!
//! - `max_words`: the rewrite budget. Chunk indices handed to callers are
//!   only valid against this budget, so every component that resolves an
//!   index must share one config.
//! - The display thresholds: a coarser "this document is big" signal used
//!   to choose a rendering strategy. They never affect chunk boundaries.
//!
//! ```text
//! words:  0 ........ 1000 ............ 2000 ..........
//!                     |                  |
//!              rewrite chunking    display virtualization
//!                 starts here         starts here (or > 50 KB)
//! ```

use tracing::warn;

use crate::{Error, Result, DEFAULT_MAX_WORDS};

/// Environment variable overriding [`ChunkingConfig::max_words`].
pub const ENV_MAX_WORDS: &str = "QUIRE_MAX_WORDS";
/// Environment variable overriding [`ChunkingConfig::display_word_threshold`].
pub const ENV_DISPLAY_WORDS: &str = "QUIRE_DISPLAY_WORD_THRESHOLD";
/// Environment variable overriding [`ChunkingConfig::display_byte_threshold`].
pub const ENV_DISPLAY_BYTES: &str = "QUIRE_DISPLAY_BYTE_THRESHOLD";

/// Word budget and display thresholds.
///
/// # Examples
///
/// ```rust
/// use quire::ChunkingConfig;
///
/// let config = ChunkingConfig::default();
/// assert_eq!(config.max_words, 1000);
/// assert_eq!(config.display_word_threshold, 2000);
/// assert_eq!(config.display_byte_threshold, 50 * 1024);
///
/// let small = ChunkingConfig::from(250);
/// assert_eq!(small.max_words, 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ChunkingConfig {
    /// Maximum words per chunk.
    pub max_words: usize,
    /// Documents with more words than this render virtualized.
    pub display_word_threshold: usize,
    /// Documents larger than this many bytes render virtualized.
    pub display_byte_threshold: usize,
}

impl ChunkingConfig {
    /// Default display thresholds with a custom word budget.
    #[must_use]
    pub const fn new(max_words: usize) -> Self {
        Self {
            max_words,
            display_word_threshold: 2000,
            display_byte_threshold: 50 * 1024,
        }
    }

    /// Replace the display thresholds.
    #[must_use]
    pub const fn with_display_thresholds(self, words: usize, bytes: usize) -> Self {
        Self {
            display_word_threshold: words,
            display_byte_threshold: bytes,
            ..self
        }
    }

    /// Check the config before use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordBudget`] if `max_words == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(Error::InvalidWordBudget(self.max_words));
        }
        Ok(())
    }

    /// Read overrides from the process environment.
    ///
    /// Unset variables keep their default. Values that do not parse as a
    /// positive integer are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: usize| match lookup(key) {
            None => fallback,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    warn!(key, value = %raw, fallback, "ignoring invalid config value");
                    fallback
                }
            },
        };

        Self {
            max_words: read(ENV_MAX_WORDS, defaults.max_words),
            display_word_threshold: read(ENV_DISPLAY_WORDS, defaults.display_word_threshold),
            display_byte_threshold: read(ENV_DISPLAY_BYTES, defaults.display_byte_threshold),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS)
    }
}

impl From<usize> for ChunkingConfig {
    fn from(max_words: usize) -> Self {
        Self::new(max_words)
    }
}
