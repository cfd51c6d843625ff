//! # Dispatch Entries
//!
//! A [`DispatchEntry`] is the cached, ready-to-call result of resolving one
//! `(owner type, component type)` pair. It wraps a plain function pointer:
//! no captured owner, no captured component, no allocation.
//!
//! ## Synthesis
//! [`DispatchEntry::synthesize`] runs the component's probe exactly once and
//! picks one of two monomorphized bodies:
//!
//! | declared capability | body                                            |
//! |---------------------|-------------------------------------------------|
//! | none                | `owner.process_all(c)`                          |
//! | `Renderable`        | `owner.process_all(c)?; owner.process_renderable(c)` |
//!
//! The renderable body is only instantiated inside
//! [`CapabilityProbe::renderable`], where `C: Renderable` holds, so the call
//! to `process_renderable` needs no runtime check or cast.

use std::fmt;
use std::marker::PhantomData;

use crate::dispatch::capability::{Capability, CapabilitySet};
use crate::dispatch::component::{CapabilityProbe, Component, Renderable};
use crate::dispatch::owner::ComponentOwner;

/// Function pointer shape shared by every entry for owner `O` and component `C`.
pub type DispatchFn<O, C> = fn(&mut O, &C) -> Result<(), <O as ComponentOwner>::Error>;

/// A resolved dispatch function bound to one component type's capability decision.
///
/// ## Invariants
/// - `call` invokes `process_renderable` iff `capabilities` contains
///   [`Capability::Renderable`].
/// - The entry never captures an owner; it is valid for every `O` instance.

pub struct DispatchEntry<O: ComponentOwner, C: Component> {
    call: DispatchFn<O, C>,
    capabilities: CapabilitySet,
}

impl<O: ComponentOwner, C: Component> Clone for DispatchEntry<O, C> {
    fn clone(&self) -> Self { *self }
}

impl<O: ComponentOwner, C: Component> Copy for DispatchEntry<O, C> {}

impl<O: ComponentOwner, C: Component> fmt::Debug for DispatchEntry<O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("owner", &std::any::type_name::<O>())
            .field("component", &std::any::type_name::<C>())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl<O: ComponentOwner, C: Component> DispatchEntry<O, C> {

    /// Resolves the entry for `C` by evaluating its capability probe.
    ///
    /// Pure; callers that want the "once per type" guarantee go through the cache.
    #[inline]
    pub fn synthesize() -> Self {
        C::probe(Synthesize::<O>(PhantomData))
    }

    /// Runs the entry against `owner` and `component`.
    ///
    /// ## Errors
    /// Returns the first error produced by the owner's routines, unchanged.
    #[inline]
    pub fn invoke(&self, owner: &mut O, component: &C) -> Result<(), O::Error> {
        (self.call)(owner, component)
    }

    /// Capabilities the entry was synthesized for.
    #[inline]
    pub fn capabilities(&self) -> CapabilitySet { self.capabilities }

    /// Returns `true` if the entry calls `process_renderable`.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        self.capabilities.contains(Capability::Renderable)
    }
}

fn process_all_only<O: ComponentOwner, C: Component>(owner: &mut O, component: &C) -> Result<(), O::Error> {
    owner.process_all(component)
}

fn process_all_then_renderable<O, C>(owner: &mut O, component: &C) -> Result<(), O::Error>
where
    O: ComponentOwner,
    C: Component + Renderable,
{
    owner.process_all(component)?;
    owner.process_renderable(component)
}

/// Probe that turns a capability declaration into a [`DispatchEntry`].
struct Synthesize<O>(PhantomData<fn() -> O>);

impl<O: ComponentOwner, C: Component> CapabilityProbe<C> for Synthesize<O> {
    type Output = DispatchEntry<O, C>;

    #[inline]
    fn plain(self) -> DispatchEntry<O, C> {
        DispatchEntry {
            call: process_all_only::<O, C>,
            capabilities: CapabilitySet::EMPTY,
        }
    }

    #[inline]
    fn renderable(self) -> DispatchEntry<O, C>
    where
        C: Renderable,
    {
        DispatchEntry {
            call: process_all_then_renderable::<O, C>,
            capabilities: CapabilitySet::EMPTY.with(Capability::Renderable),
        }
    }
}
