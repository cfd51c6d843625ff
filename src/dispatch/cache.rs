//! # Capability Dispatch Cache
//!
//! This module provides the type-indexed cache that maps each
//! `(owner type, component type)` pair to its synthesized [`DispatchEntry`].
//!
//! ## Purpose
//! Running the capability probe and picking a dispatch body is a one-time
//! decision per type. The cache makes it exactly once and hands the same
//! entry to every later caller, so the steady-state cost of
//! [`DispatchCache::add`] is one shared-lock lookup and two direct calls.
//!
//! ## Design
//! - Slots are keyed by [`DispatchKey`] and hold the typed entry behind
//!   `Box<dyn Any + Send + Sync>`, so one cache serves every owner and
//!   component type.
//! - Hot path: shared read lock, one hash lookup, one `downcast_ref`.
//! - Cold path: upgradable read lock. Only one thread can hold it, so the
//!   creator re-checks, synthesizes, upgrades, and publishes while plain
//!   readers keep running. Concurrent creators for the same key block on the
//!   upgradable lock, then find the published winner; they never synthesize.
//! - The cache can be `freeze()`d once startup registration is complete.
//!   Afterwards an unseen pair is a configuration defect.
//!
//! ## Lifecycle
//! Entries are never evicted; the key space is the closed set of component
//! types in the program. [`global`] is a lazily created process-wide cache
//! that is never torn down. Tests and embedders that need isolation build
//! their own [`DispatchCache`] and may [`reset`](DispatchCache::reset) it.
//!
//! ## Invariants
//! - At most one entry is ever published per key between resets.
//! - A slot keyed by `DispatchKey::of::<O, C>()` holds a `DispatchEntry<O, C>`.
//! - `syntheses` counts entries built, `misses` counts cold-path entries.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::OnceLock;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, info, trace, warn};

use crate::dispatch::capability::ComponentInfo;
use crate::dispatch::component::Component;
use crate::dispatch::config::CacheConfig;
use crate::dispatch::entry::DispatchEntry;
use crate::dispatch::error::{
    DispatchResult,
    EntryTypeMismatchError,
    FrozenCacheError,
};
use crate::dispatch::owner::ComponentOwner;
use crate::dispatch::types::{DispatchKey, KeyNames};


/// Describes one published cache entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryInfo {
    /// Rust type name of the owner.
    pub owner: &'static str,

    /// Descriptor of the component type, including its capability decision.
    pub component: ComponentInfo,
}

impl EntryInfo {
    fn of<O: ComponentOwner, C: Component>(entry: &DispatchEntry<O, C>) -> Self {
        Self {
            owner: type_name::<O>(),
            component: ComponentInfo::with_capabilities::<C>(entry.capabilities()),
        }
    }
}

impl fmt::Display for EntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.owner, self.component)
    }
}

/// Type-erased storage for one published entry.
struct Slot {
    entry: Box<dyn Any + Send + Sync>,
    info: EntryInfo,
}

impl Slot {
    fn typed<O: ComponentOwner, C: Component>(&self) -> DispatchResult<DispatchEntry<O, C>> {
        self.entry
            .downcast_ref::<DispatchEntry<O, C>>()
            .copied()
            .ok_or_else(|| {
                EntryTypeMismatchError {
                    expected: std::any::TypeId::of::<DispatchEntry<O, C>>(),
                    names: KeyNames::of::<O, C>(),
                }
                .into()
            })
    }
}

/// Point-in-time counters for a [`DispatchCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Published entries.
    pub entries: usize,

    /// Lookups that missed the read path and took the upgradable lock.
    pub misses: u64,

    /// Entries synthesized.
    pub syntheses: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ entries: {}, misses: {}, syntheses: {} }}",
            self.entries, self.misses, self.syntheses
        )
    }
}

/// Concurrent cache of dispatch entries keyed by owner and component type.
///
/// `DispatchCache` is `Send + Sync`; share it by reference or `Arc`.

pub struct DispatchCache {
    config: CacheConfig,
    slots: RwLock<FxHashMap<DispatchKey, Slot>>,
    frozen: AtomicBool,
    misses: AtomicU64,
    syntheses: AtomicU64,
}

impl Default for DispatchCache {
    fn default() -> Self {
        Self::from_valid_config(CacheConfig::default())
    }
}

impl fmt::Debug for DispatchCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCache")
            .field("config", &self.config)
            .field("frozen", &self.is_frozen())
            .field("stats", &self.stats())
            .finish()
    }
}

impl DispatchCache {

    /// Creates an empty cache with the default configuration.
    pub fn new() -> Self { Self::default() }

    /// Creates an empty cache with `config`.
    ///
    /// ## Errors
    /// Returns `DispatchError::InvalidConfig` if `config` fails validation.

    pub fn with_config(config: CacheConfig) -> DispatchResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CacheConfig) -> Self {
        Self {
            config,
            slots: RwLock::new(FxHashMap::with_capacity_and_hasher(
                config.initial_capacity,
                Default::default(),
            )),
            frozen: AtomicBool::new(config.start_frozen),
            misses: AtomicU64::new(0),
            syntheses: AtomicU64::new(0),
        }
    }

    /// Returns the configuration the cache was built with.
    pub fn config(&self) -> &CacheConfig { &self.config }
}

impl DispatchCache {

    /// Dispatches `component` to `owner`.
    ///
    /// ## Behavior
    /// Resolves (creating on first use) the entry for `(O, C)` and invokes it:
    /// `process_all` always, then `process_renderable` if `C` is renderable.
    ///
    /// ## Errors
    /// Returns the owner's routine error unchanged.
    ///
    /// ## Panics
    /// Panics on a configuration defect, see [`get_or_create`](Self::get_or_create).

    #[inline]
    pub fn add<O: ComponentOwner, C: Component>(&self, owner: &mut O, component: &C) -> Result<(), O::Error> {
        self.get_or_create::<O, C>().invoke(owner, component)
    }

    /// Dispatches every component in `components` to `owner`, in order.
    ///
    /// The entry is resolved once for the whole slice. Stops at the first error.

    pub fn add_all<O: ComponentOwner, C: Component>(&self, owner: &mut O, components: &[C]) -> Result<(), O::Error> {
        let entry = self.get_or_create::<O, C>();
        for component in components {
            entry.invoke(owner, component)?;
        }
        Ok(())
    }

    /// Dispatches `components` in parallel on the rayon pool.
    ///
    /// ## Behavior
    /// The slice is split into chunks of `config.par_chunk_size`. Each chunk
    /// gets a fresh owner from `init`, processes its components in order, and
    /// the owners are returned in chunk order for the caller to merge. An
    /// empty slice yields no owners.
    ///
    /// ## Errors
    /// Returns one of the routine errors if any chunk fails.
    ///
    /// ## Panics
    /// Panics on a configuration defect, see [`get_or_create`](Self::get_or_create).

    pub fn par_add_all<O, C, F>(&self, components: &[C], init: F) -> Result<Vec<O>, O::Error>
    where
        O: ComponentOwner + Send,
        O::Error: Send,
        C: Component,
        F: Fn() -> O + Sync + Send,
    {
        let entry = self.get_or_create::<O, C>();
        let _span = debug_span!(
            "par_add_all",
            component = type_name::<C>(),
            len = components.len()
        )
        .entered();

        components
            .par_chunks(self.config.par_chunk_size)
            .map(|chunk| -> Result<O, O::Error> {
                let mut owner = init();
                for component in chunk {
                    entry.invoke(&mut owner, component)?;
                }
                Ok(owner)
            })
            .collect()
    }

    /// Returns the entry for `(O, C)`, creating it on first use.
    ///
    /// ## Panics
    /// Panics if the cache is frozen and `(O, C)` was never registered, or if
    /// a slot holds an entry of the wrong type. Both are configuration defects
    /// that must surface on first use rather than skip a routine.

    pub fn get_or_create<O: ComponentOwner, C: Component>(&self) -> DispatchEntry<O, C> {
        match self.try_get_or_create::<O, C>() {
            Ok(entry) => entry,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the entry for `(O, C)`, creating it on first use.
    ///
    /// ## Errors
    /// - `DispatchError::Frozen` if the cache is frozen and the pair is unseen.
    /// - `DispatchError::EntryTypeMismatch` on a corrupted slot.

    #[inline]
    pub fn try_get_or_create<O: ComponentOwner, C: Component>(&self) -> DispatchResult<DispatchEntry<O, C>> {
        let key = DispatchKey::of::<O, C>();
        if let Some(slot) = self.slots.read().get(&key) {
            return slot.typed::<O, C>();
        }
        self.create::<O, C>(key)
    }

    /// Cold path: synthesizes and publishes the entry for `key`.
    ///
    /// Holding the upgradable lock across the re-check and the synthesis is
    /// what makes synthesis happen once per key.

    #[cold]
    fn create<O: ComponentOwner, C: Component>(&self, key: DispatchKey) -> DispatchResult<DispatchEntry<O, C>> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        let names = KeyNames::of::<O, C>();

        let slots = self.slots.upgradable_read();
        if let Some(slot) = slots.get(&key) {
            trace!(owner = names.owner, component = names.component, "adopted published dispatch entry");
            return slot.typed::<O, C>();
        }

        if self.is_frozen() {
            warn!(
                owner = names.owner,
                component = names.component,
                "frozen dispatch cache rejected unregistered component"
            );
            return Err(FrozenCacheError { names }.into());
        }

        let entry = DispatchEntry::<O, C>::synthesize();
        self.syntheses.fetch_add(1, Ordering::Relaxed);
        debug!(
            owner = names.owner,
            component = names.component,
            renderable = entry.is_renderable(),
            "synthesized dispatch entry"
        );

        let mut slots = RwLockUpgradableReadGuard::upgrade(slots);
        slots.insert(key, Slot { entry: Box::new(entry), info: EntryInfo::of(&entry) });
        Ok(entry)
    }

    /// Eagerly creates the entry for `(O, C)` and returns its descriptor.
    ///
    /// ## Purpose
    /// Lets startup code resolve every known pair before calling
    /// [`freeze`](Self::freeze), so defects surface before the first dispatch.
    ///
    /// ## Errors
    /// Same as [`try_get_or_create`](Self::try_get_or_create).

    pub fn register<O: ComponentOwner, C: Component>(&self) -> DispatchResult<EntryInfo> {
        let _span = debug_span!("register", owner = type_name::<O>(), component = type_name::<C>()).entered();
        let entry = self.try_get_or_create::<O, C>()?;
        Ok(EntryInfo::of(&entry))
    }
}

impl DispatchCache {

    /// Freezes the cache; unseen pairs are rejected from now on.
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
        info!(entries = self.len(), "dispatch cache frozen");
    }

    /// Returns `true` if the cache has been frozen.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Returns `true` if an entry for `(O, C)` has been published.
    pub fn contains<O: ComponentOwner, C: Component>(&self) -> bool {
        self.slots.read().contains_key(&DispatchKey::of::<O, C>())
    }

    /// Returns the descriptor of the `(O, C)` entry, if published.
    pub fn entry_info<O: ComponentOwner, C: Component>(&self) -> Option<EntryInfo> {
        self.slots.read().get(&DispatchKey::of::<O, C>()).map(|slot| slot.info)
    }

    /// Returns descriptors for every published entry, sorted by owner then component name.
    pub fn entries(&self) -> Vec<EntryInfo> {
        let mut entries: Vec<EntryInfo> = self.slots.read().values().map(|slot| slot.info).collect();
        entries.sort_by(|a, b| (a.owner, a.component.name).cmp(&(b.owner, b.component.name)));
        entries
    }

    /// Number of published entries.
    pub fn len(&self) -> usize { self.slots.read().len() }

    /// Returns `true` if no entry has been published.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            misses: self.misses.load(Ordering::Relaxed),
            syntheses: self.syntheses.load(Ordering::Relaxed),
        }
    }

    /// Returns the cache to its freshly constructed state.
    ///
    /// Drops every entry, zeroes the counters, and restores the configured
    /// frozen flag. Entries already handed out stay valid.

    pub fn reset(&self) {
        let mut slots = self.slots.write();
        slots.clear();
        self.misses.store(0, Ordering::Relaxed);
        self.syntheses.store(0, Ordering::Relaxed);
        self.frozen.store(self.config.start_frozen, Ordering::Release);
        info!("dispatch cache reset");
    }
}

static GLOBAL: OnceLock<DispatchCache> = OnceLock::new();

/// Returns the process-wide dispatch cache.
///
/// Created on first use with the default configuration and never torn down.
pub fn global() -> &'static DispatchCache {
    GLOBAL.get_or_init(DispatchCache::new)
}

/// Dispatches `component` to `owner` through the [`global`] cache.
///
/// ## Panics
/// Panics on a configuration defect, see [`DispatchCache::get_or_create`].
#[inline]
pub fn add<O: ComponentOwner, C: Component>(owner: &mut O, component: &C) -> Result<(), O::Error> {
    global().add(owner, component)
}
