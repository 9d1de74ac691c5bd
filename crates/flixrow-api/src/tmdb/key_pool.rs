//! Round-robin API key pool.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, ensure};

/// Ordered set of TMDB API keys with a shared cursor.
///
/// Every request issued by the owning client reads the key under the
/// cursor. Rotation advances the cursor for all later requests, not only
/// the one that hit the rate limit. Concurrent requests throttled on the
/// same key advance it once between them.
#[allow(clippy::module_name_repetitions)]
pub struct AccessKeyPool {
    /// API keys in rotation order. Never empty.
    keys: Vec<String>,
    /// Index of the active key.
    cursor: AtomicUsize,
}

impl AccessKeyPool {
    /// Creates a pool starting at the first key. Blank keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if no non-blank key is given.
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.trim().is_empty())
            .collect();
        ensure!(!keys.is_empty(), "at least one API key is required");

        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the active key.
    #[must_use]
    pub fn current(&self) -> &str {
        self.active().1
    }

    /// Returns the index of the active key.
    #[must_use]
    pub fn index(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Returns the active index together with its key, read once.
    #[must_use]
    pub fn active(&self) -> (usize, &str) {
        let index = self.index();
        (index, self.keys.get(index).map_or("", String::as_str))
    }

    /// Moves past the key at `used` after it was rate limited, and returns
    /// the index to retry with.
    ///
    /// The cursor only advances if it still points at `used`. When another
    /// request has already rotated away from that key, the cursor is left
    /// alone and its current index is returned.
    pub fn rotate_from(&self, used: usize) -> usize {
        let next = used
            .saturating_add(1)
            .checked_rem(self.keys.len())
            .unwrap_or(0);
        match self
            .cursor
            .compare_exchange(used, next, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => next,
            Err(moved) => moved,
        }
    }

    /// Number of keys in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; a pool cannot be built without keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for AccessKeyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKeyPool")
            .field("keys", &format_args!("<{} redacted>", self.keys.len()))
            .field("cursor", &self.index())
            .finish()
    }
}
