//! # Capability Predicate
//!
//! Answers "does component type `C` satisfy capability `X`?" from the type's
//! own [`Component::probe`] declaration.
//!
//! ## Purpose
//! The predicate is the only introspection the dispatch cache performs. It is
//! run once per type during entry synthesis; everything afterwards is a
//! lookup and direct calls.
//!
//! ## Invariants
//! - The answer depends only on `C`, never on a component value.
//! - The answer is the same for every call in the process, so memoizing it
//!   per type is sound.
//!
//! ## Representation
//! [`CapabilitySet`] is a small bitset, one bit per [`Capability`], so a
//! type's whole capability set can be stored in a descriptor and compared
//! cheaply.

use std::any::{type_name, TypeId};
use std::fmt;
use std::mem::{align_of, size_of};

use crate::dispatch::component::{CapabilityProbe, Component, Renderable};

/// A secondary capability a component type may declare.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See [`Renderable`].
    Renderable,
}

impl Capability {
    /// Every known capability, in bit order.
    pub const ALL: [Capability; 1] = [Capability::Renderable];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Capability::Renderable => 1 << 0,
        }
    }

    /// Short lowercase name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Capability::Renderable => "renderable",
        }
    }
}

/// Set of capabilities declared by one component type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// The empty set.
    pub const EMPTY: CapabilitySet = CapabilitySet(0);

    /// Adds `capability` to the set.
    #[inline]
    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    /// Returns a copy of the set with `capability` added.
    #[inline]
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Returns `true` if `capability` is in the set.
    #[inline]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Returns `true` if no capability is declared.
    #[inline]
    pub fn is_empty(&self) -> bool { self.0 == 0 }

    /// Iterates the capabilities in the set, in bit order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{")?;
        for (i, capability) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(capability.name())?;
        }
        f.write_str("}")
    }
}

/// Probe that collects a type's declaration into a [`CapabilitySet`].
struct CapabilityScan;

impl<C> CapabilityProbe<C> for CapabilityScan {
    type Output = CapabilitySet;

    #[inline]
    fn plain(self) -> CapabilitySet { CapabilitySet::EMPTY }

    #[inline]
    fn renderable(self) -> CapabilitySet
    where
        C: Renderable,
    {
        CapabilitySet::EMPTY.with(Capability::Renderable)
    }
}

/// Returns the capability set declared by component type `C`.
#[inline]
pub fn capabilities_of<C: Component>() -> CapabilitySet {
    C::probe(CapabilityScan)
}

/// Returns `true` if component type `C` satisfies `capability`.
///
/// Pure and consistent for the lifetime of the process.
#[inline]
pub fn satisfies<C: Component>(capability: Capability) -> bool {
    capabilities_of::<C>().contains(capability)
}

/// Describes a component type seen by the dispatch cache.
///
/// ## Fields
/// - `name`: the Rust type name (`type_name::<C>()`).
/// - `type_id`: the runtime `TypeId`.
/// - `size` / `align`: layout in bytes.
/// - `capabilities`: the declared capability set.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentInfo {
    /// Rust type name for diagnostics.
    pub name: &'static str,

    /// Runtime `TypeId` of the component.
    pub type_id: TypeId,

    /// Size of the component type in bytes.
    pub size: usize,

    /// Alignment of the component type in bytes.
    pub align: usize,

    /// Declared capabilities.
    pub capabilities: CapabilitySet,
}

impl ComponentInfo {
    /// Builds the descriptor for `C`, evaluating its probe.
    pub fn of<C: Component>() -> Self {
        Self::with_capabilities::<C>(capabilities_of::<C>())
    }

    /// Builds the descriptor for `C` from an already evaluated capability set.
    pub fn with_capabilities<C: 'static>(capabilities: CapabilitySet) -> Self {
        Self {
            name: type_name::<C>(),
            type_id: TypeId::of::<C>(),
            size: size_of::<C>(),
            align: align_of::<C>(),
            capabilities,
        }
    }

    /// Returns `true` if this descriptor refers to type `C`.
    #[inline]
    pub fn matches_type<C: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }
}

impl fmt::Display for ComponentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComponentInfo {{ name: {}, size: {}, align: {}, capabilities: {} }}",
            self.name, self.size, self.align, self.capabilities
        )
    }
}
