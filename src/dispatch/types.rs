//! Core Dispatch Types, Keys, and Constants
//!
//! This module defines the identifiers and compile-time defaults shared by
//! the capability predicate, entry synthesis, and the dispatch cache.
//!
//! ## Keys
//!
//! A dispatch entry is specific to one `(owner type, component type)` pair:
//! the entry is a plain function pointer whose signature names both types.
//! [`DispatchKey`] packs the two `TypeId`s into a single hashable value so
//! the cache can stay non-generic and serve every owner type at once.
//!
//! ## Defaults
//!
//! The constants below seed [`CacheConfig`](crate::dispatch::config::CacheConfig).
//! The key space is the closed set of component types known at compile time,
//! so the defaults are small.

use std::any::{type_name, TypeId};
use std::fmt;

/// Initial number of slots reserved in a new cache.
pub const DEFAULT_INITIAL_CAPACITY: usize = 32;

/// Number of components handed to one rayon task by `par_add_all`.
pub const DEFAULT_PAR_CHUNK: usize = 4096;

/// Identity of a cached dispatch entry.
///
/// ## Invariants
/// - Two keys are equal iff both the owner type and component type match.
/// - Keys are stable for the lifetime of the process.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    /// `TypeId` of the owner whose routines the entry calls.
    pub owner: TypeId,

    /// `TypeId` of the component value the entry accepts.
    pub component: TypeId,
}

impl DispatchKey {
    /// Builds the key for owner `O` and component `C`.
    #[inline]
    pub fn of<O: 'static, C: 'static>() -> Self {
        Self {
            owner: TypeId::of::<O>(),
            component: TypeId::of::<C>(),
        }
    }
}

/// Human-readable names for a [`DispatchKey`], carried for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyNames {
    /// Rust type name of the owner.
    pub owner: &'static str,

    /// Rust type name of the component.
    pub component: &'static str,
}

impl KeyNames {
    /// Names for owner `O` and component `C`.
    #[inline]
    pub fn of<O: 'static, C: 'static>() -> Self {
        Self {
            owner: type_name::<O>(),
            component: type_name::<C>(),
        }
    }
}

impl fmt::Display for KeyNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} <- {})", self.owner, self.component)
    }
}
