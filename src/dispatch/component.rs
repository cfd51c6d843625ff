//! # Components and Capability Declarations
//!
//! A component is a value type processed by an owner. Some component types
//! also implement a secondary capability, [`Renderable`]. The dispatch cache
//! needs to know, per type, whether that capability is present, and it needs
//! to call the owner's renderable routine with a value statically known to
//! implement it.
//!
//! ## Design
//! Stable Rust cannot ask "does `T: Renderable`?" for an arbitrary `T`, so
//! each component type answers the question itself through
//! [`Component::probe`]. The probe is a generic visitor:
//!
//! - the default body calls [`CapabilityProbe::plain`] (no capability);
//! - a renderable type overrides it to call [`CapabilityProbe::renderable`],
//!   a method only callable when `C: Renderable`.
//!
//! The visitor turns the declaration into whatever the caller needs: a
//! `bool` for the predicate, a function pointer for entry synthesis. Because
//! `renderable()` carries the `C: Renderable` bound, declaring a capability
//! a type does not implement is a compile error.
//!
//! ## Invariants
//! - `probe` must not depend on runtime state; it is evaluated once per type
//!   and memoized by the cache.
//!
//! ## Example
//! ```
//! use component_dispatch::{impl_component, Renderable};
//!
//! #[derive(Clone, Copy)]
//! struct Sprite { layer: u8 }
//!
//! impl Renderable for Sprite {
//!     fn layer(&self) -> u8 { self.layer }
//! }
//!
//! #[derive(Clone, Copy)]
//! struct LogicOnly;
//!
//! impl_component!(Sprite: Renderable);
//! impl_component!(LogicOnly);
//! ```

/// Secondary capability: the component can be drawn.
///
/// Owners receive renderable components through
/// [`ComponentOwner::process_renderable`](crate::dispatch::owner::ComponentOwner::process_renderable)
/// and may call these methods without re-checking.

pub trait Renderable {
    /// Draw layer; lower layers draw first.
    fn layer(&self) -> u8;

    /// Whether the component should be drawn at all.
    fn is_visible(&self) -> bool { true }
}

/// A value type the dispatch cache can process.
///
/// ## Purpose
/// Declares the type's capability set through [`Component::probe`]. Use
/// [`impl_component!`](crate::impl_component) rather than writing the impl
/// by hand unless the probe needs custom behaviour (tests do this to count
/// probe evaluations).

pub trait Component: Sized + Send + Sync + 'static {
    /// Reports this type's capabilities to `probe`.
    ///
    /// The default reports none.
    #[inline]
    fn probe<P: CapabilityProbe<Self>>(probe: P) -> P::Output {
        probe.plain()
    }
}

/// Visitor passed to [`Component::probe`].
///
/// Exactly one method is called per probe. `renderable` can only be called
/// for component types that implement [`Renderable`], which is what lets
/// implementors hand out code requiring that bound.

pub trait CapabilityProbe<C> {
    /// Value produced by the probe.
    type Output;

    /// The component has no secondary capability.
    fn plain(self) -> Self::Output;

    /// The component is [`Renderable`].
    fn renderable(self) -> Self::Output
    where
        C: Renderable;
}

/// Implements [`Component`] for a type.
///
/// `impl_component!(T)` declares no capabilities.
/// `impl_component!(T: Renderable)` declares the renderable capability and
/// requires `T: Renderable`.

#[macro_export]
macro_rules! impl_component {
    ($ty:ty : Renderable) => {
        impl $crate::Component for $ty {
            #[inline]
            fn probe<P: $crate::CapabilityProbe<Self>>(probe: P) -> P::Output {
                probe.renderable()
            }
        }
    };
    ($ty:ty) => {
        impl $crate::Component for $ty {}
    };
}
