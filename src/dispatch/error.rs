//! Error types for dispatch entry resolution and cache configuration.
//!
//! The dispatch path itself has no recoverable errors: once an entry exists,
//! invoking it can only fail with the owner's own error type, which is
//! returned to the caller untouched. The types here cover the remaining
//! failure modes, all of which are configuration defects:
//!
//! * a frozen cache was asked for a pair it never registered,
//! * a cache slot held an entry of the wrong type (internal invariant),
//! * a [`CacheConfig`](crate::dispatch::config::CacheConfig) was invalid.
//!
//! ## Fatal vs. fallible
//! `try_*` and `register` APIs return [`DispatchResult`]. The hot entry points
//! (`add`, `get_or_create`) treat these errors as fatal and panic with the
//! `Display` text, so a misconfigured setup fails on first use instead of
//! silently skipping a routine.
//!
//! ## Example
//! ```ignore
//! match cache.try_get_or_create::<Renderer, Sprite>() {
//!     Ok(entry) => entry.invoke(&mut renderer, &sprite)?,
//!     Err(DispatchError::Frozen(e)) => {
//!         eprintln!("register {} before freezing", e.names.component);
//!     }
//!     Err(other) => panic!("{other}"),
//! }
//! ```

use std::any::TypeId;
use std::fmt;

use crate::dispatch::types::KeyNames;

/// Returned when a frozen cache is asked to synthesize a new entry.
///
/// Freezing declares that every `(owner, component)` pair has been
/// registered. A miss afterwards means startup registration is incomplete.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrozenCacheError {
    /// Owner and component that were not registered before the freeze.
    pub names: KeyNames,
}

impl fmt::Display for FrozenCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dispatch cache frozen; no entry registered for component {} on owner {}",
            self.names.component, self.names.owner
        )
    }
}

impl std::error::Error for FrozenCacheError {}

/// Returned when a cache slot does not hold the entry type its key implies.
///
/// Slots are keyed by the exact owner and component `TypeId`s, so this
/// can only happen through a bug in the cache itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTypeMismatchError {
    /// `TypeId` of the entry type that was requested.
    pub expected: TypeId,

    /// Owner and component of the offending slot.
    pub names: KeyNames,
}

impl fmt::Display for EntryTypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cached entry for {} does not have the expected type {:?}",
            self.names, self.expected
        )
    }
}

impl std::error::Error for EntryTypeMismatchError {}

/// Aggregate error for dispatch cache operations.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The cache is frozen and the requested pair was never registered.
    Frozen(FrozenCacheError),

    /// A slot held an entry of an unexpected type.
    EntryTypeMismatch(EntryTypeMismatchError),

    /// A configuration value was rejected.
    ///
    /// The string names the offending field.
    InvalidConfig(&'static str),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Frozen(e) => write!(f, "{e}"),
            DispatchError::EntryTypeMismatch(e) => write!(f, "{e}"),
            DispatchError::InvalidConfig(field) => write!(f, "invalid cache configuration: {}", field),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Frozen(e) => Some(e),
            DispatchError::EntryTypeMismatch(e) => Some(e),
            DispatchError::InvalidConfig(_) => None,
        }
    }
}

impl From<FrozenCacheError> for DispatchError {
    fn from(e: FrozenCacheError) -> Self { DispatchError::Frozen(e) }
}

impl From<EntryTypeMismatchError> for DispatchError {
    fn from(e: EntryTypeMismatchError) -> Self { DispatchError::EntryTypeMismatch(e) }
}

/// Result alias for fallible cache operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
