//! Owner callback slots.
//!
//! An owner is the object whose routines a dispatch entry invokes. The cache
//! never stores an owner: it is passed to every call, so one cached entry
//! serves every owner instance of the same type.
//!
//! ## Ordering
//! For a renderable component, an entry calls [`ComponentOwner::process_all`]
//! first and [`ComponentOwner::process_renderable`] second. If `process_all`
//! returns an error, `process_renderable` is skipped and the error is
//! returned as-is.

use crate::dispatch::component::{Component, Renderable};

/// Supplies the routines a dispatch entry calls.
///
/// ## Errors
/// `Error` is opaque to the cache. Whatever a routine returns is propagated
/// to the caller of `add` without wrapping.
///
/// ## Example
/// ```
/// use component_dispatch::{Component, ComponentOwner, Renderable};
///
/// #[derive(Default)]
/// struct Counter { all: usize, drawn: usize }
///
/// impl ComponentOwner for Counter {
///     type Error = std::convert::Infallible;
///
///     fn process_all<C: Component>(&mut self, _component: &C) -> Result<(), Self::Error> {
///         self.all += 1;
///         Ok(())
///     }
///
///     fn process_renderable<C: Component + Renderable>(&mut self, _component: &C) -> Result<(), Self::Error> {
///         self.drawn += 1;
///         Ok(())
///     }
/// }
/// ```

pub trait ComponentOwner: Sized + 'static {
    /// Error returned by the routines.
    type Error: 'static;

    /// Work that applies to every component.
    fn process_all<C: Component>(&mut self, component: &C) -> Result<(), Self::Error>;

    /// Work that applies only to renderable components.
    ///
    /// Only ever called with component types whose probe declared
    /// [`Renderable`].
    fn process_renderable<C: Component + Renderable>(&mut self, component: &C) -> Result<(), Self::Error>;
}
