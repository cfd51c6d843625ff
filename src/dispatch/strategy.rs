//! Interchangeable dispatch strategies.
//!
//! Every strategy produces the same observable behaviour as
//! [`DispatchCache::add`]; they differ only in where the capability decision
//! is made and what is shared:
//!
//! - [`DispatchCache`]: decision made once per type, shared across threads
//!   behind a `RwLock`.
//! - [`LocalDispatchCache`]: decision made once per type, single-threaded,
//!   no locking. Suited to one owner driving one thread.
//! - [`ProbeEachCall`]: no cache; the probe and synthesis run on every call.
//!   Since both are monomorphized this mostly measures what the cache lookup
//!   itself costs.
//!
//! The benchmarks in `benches/dispatch.rs` compare them.

use std::any::Any;
use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

use crate::dispatch::cache::DispatchCache;
use crate::dispatch::component::Component;
use crate::dispatch::entry::DispatchEntry;
use crate::dispatch::owner::ComponentOwner;
use crate::dispatch::types::{DispatchKey, DEFAULT_INITIAL_CAPACITY};

/// A way of routing one component to an owner's routines.
pub trait Dispatch {
    /// Short name used in benchmark ids and logs.
    fn name(&self) -> &'static str;

    /// Dispatches `component` to `owner`.
    fn dispatch<O: ComponentOwner, C: Component>(&self, owner: &mut O, component: &C) -> Result<(), O::Error>;
}

impl Dispatch for DispatchCache {
    fn name(&self) -> &'static str { "shared_cache" }

    #[inline]
    fn dispatch<O: ComponentOwner, C: Component>(&self, owner: &mut O, component: &C) -> Result<(), O::Error> {
        self.add(owner, component)
    }
}

/// Resolves the entry on every call without caching it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProbeEachCall;

impl Dispatch for ProbeEachCall {
    fn name(&self) -> &'static str { "probe_each_call" }

    #[inline]
    fn dispatch<O: ComponentOwner, C: Component>(&self, owner: &mut O, component: &C) -> Result<(), O::Error> {
        DispatchEntry::<O, C>::synthesize().invoke(owner, component)
    }
}

/// Single-threaded dispatch cache.
///
/// Same keying and once-per-type synthesis as [`DispatchCache`], with
/// `RefCell` in place of the lock. `!Sync`.

pub struct LocalDispatchCache {
    slots: RefCell<FxHashMap<DispatchKey, Box<dyn Any>>>,
    syntheses: Cell<u64>,
}

impl Default for LocalDispatchCache {
    fn default() -> Self {
        Self {
            slots: RefCell::new(FxHashMap::with_capacity_and_hasher(
                DEFAULT_INITIAL_CAPACITY,
                Default::default(),
            )),
            syntheses: Cell::new(0),
        }
    }
}

impl LocalDispatchCache {
    /// Creates an empty local cache.
    pub fn new() -> Self { Self::default() }

    /// Returns the entry for `(O, C)`, creating it on first use.
    pub fn get_or_create<O: ComponentOwner, C: Component>(&self) -> DispatchEntry<O, C> {
        let key = DispatchKey::of::<O, C>();
        if let Some(entry) = self
            .slots
            .borrow()
            .get(&key)
            .and_then(|slot| slot.downcast_ref::<DispatchEntry<O, C>>())
        {
            return *entry;
        }

        let entry = DispatchEntry::<O, C>::synthesize();
        self.syntheses.set(self.syntheses.get() + 1);
        self.slots.borrow_mut().insert(key, Box::new(entry));
        entry
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize { self.slots.borrow().len() }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Number of entries synthesized so far.
    pub fn syntheses(&self) -> u64 { self.syntheses.get() }
}

impl Dispatch for LocalDispatchCache {
    fn name(&self) -> &'static str { "local_cache" }

    #[inline]
    fn dispatch<O: ComponentOwner, C: Component>(&self, owner: &mut O, component: &C) -> Result<(), O::Error> {
        self.get_or_create::<O, C>().invoke(owner, component)
    }
}
