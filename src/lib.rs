//! # Component Dispatch
//!
//! Type-indexed capability dispatch for value-typed components.
//!
//! Components are plain value types. Some of them also implement a secondary
//! capability ([`Renderable`]). An owner supplies two routines: one for every
//! component, one for renderable components only. [`DispatchCache::add`]
//! routes each component to the right routines without boxing it, casting it,
//! or re-inspecting its type after the first call.
//!
//! ## Design Goals
//! - Decide once per type, execute many times cheaply
//! - No per-call boxing or dynamic casts
//! - Entries shared across owners and threads
//! - Configuration defects fail fast
//!
//! ## Example
//! ```
//! use component_dispatch::prelude::*;
//!
//! #[derive(Clone, Copy)]
//! struct Sprite { layer: u8 }
//! impl Renderable for Sprite {
//!     fn layer(&self) -> u8 { self.layer }
//! }
//! impl_component!(Sprite: Renderable);
//!
//! #[derive(Clone, Copy)]
//! struct LogicOnly;
//! impl_component!(LogicOnly);
//!
//! #[derive(Default)]
//! struct Stage { processed: usize, layers: Vec<u8> }
//!
//! impl ComponentOwner for Stage {
//!     type Error = std::convert::Infallible;
//!
//!     fn process_all<C: Component>(&mut self, _c: &C) -> Result<(), Self::Error> {
//!         self.processed += 1;
//!         Ok(())
//!     }
//!
//!     fn process_renderable<C: Component + Renderable>(&mut self, c: &C) -> Result<(), Self::Error> {
//!         self.layers.push(c.layer());
//!         Ok(())
//!     }
//! }
//!
//! let cache = DispatchCache::new();
//! let mut stage = Stage::default();
//! cache.add(&mut stage, &Sprite { layer: 3 }).unwrap();
//! cache.add(&mut stage, &LogicOnly).unwrap();
//!
//! assert_eq!(stage.processed, 2);
//! assert_eq!(stage.layers, vec![3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod dispatch;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use dispatch::component::{
    Component,
    Renderable,
    CapabilityProbe,
};

pub use dispatch::capability::{
    Capability,
    CapabilitySet,
    ComponentInfo,
    satisfies,
    capabilities_of,
};

pub use dispatch::owner::ComponentOwner;

pub use dispatch::entry::{
    DispatchEntry,
    DispatchFn,
};

pub use dispatch::cache::{
    DispatchCache,
    CacheStats,
    EntryInfo,
    global,
    add,
};

pub use dispatch::strategy::{
    Dispatch,
    LocalDispatchCache,
    ProbeEachCall,
};

pub use dispatch::config::CacheConfig;

pub use dispatch::error::{
    DispatchResult,
    DispatchError,
    FrozenCacheError,
    EntryTypeMismatchError,
};

pub use dispatch::types::{
    DispatchKey,
    KeyNames,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used dispatch types.
///
/// Import with:
/// ```rust
/// use component_dispatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Component,
        Renderable,
        ComponentOwner,
        DispatchCache,
        DispatchEntry,
        Capability,
        satisfies,
        impl_component,
    };
}
