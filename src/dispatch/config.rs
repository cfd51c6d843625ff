//! Cache configuration.
//!
//! [`CacheConfig`] collects the few knobs a [`DispatchCache`] exposes. All
//! fields have defaults from [`types`](crate::dispatch::types), so most
//! callers only use `CacheConfig::default()`.
//!
//! [`DispatchCache`]: crate::dispatch::cache::DispatchCache

use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::types::{DEFAULT_INITIAL_CAPACITY, DEFAULT_PAR_CHUNK};

/// Construction-time settings for a dispatch cache.
///
/// ## Fields
/// - `initial_capacity`: slots reserved up front in the entry map.
/// - `par_chunk_size`: components per rayon task in `par_add_all`; must be non-zero.
/// - `start_frozen`: create the cache already frozen. Only useful together with
///   entries registered through `register` before the first dispatch, since
///   a frozen cache rejects every unseen pair.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Slots reserved in the entry map at construction.
    pub initial_capacity: usize,

    /// Components dispatched per parallel task.
    pub par_chunk_size: usize,

    /// Whether the cache starts out frozen.
    pub start_frozen: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            par_chunk_size: DEFAULT_PAR_CHUNK,
            start_frozen: false,
        }
    }
}

impl CacheConfig {
    /// Sets the number of slots reserved at construction.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the parallel chunk size.
    pub fn with_par_chunk_size(mut self, par_chunk_size: usize) -> Self {
        self.par_chunk_size = par_chunk_size;
        self
    }

    /// Sets whether the cache starts frozen.
    pub fn with_start_frozen(mut self, start_frozen: bool) -> Self {
        self.start_frozen = start_frozen;
        self
    }

    /// Checks the configuration for values the cache cannot work with.
    ///
    /// ## Errors
    /// `DispatchError::InvalidConfig("par_chunk_size")` if the chunk size is zero.

    pub fn validate(&self) -> DispatchResult<()> {
        if self.par_chunk_size == 0 {
            return Err(DispatchError::InvalidConfig("par_chunk_size"));
        }
        Ok(())
    }
}
