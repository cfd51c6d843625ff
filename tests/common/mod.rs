#![allow(dead_code)]

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;

use component_dispatch::{impl_component, Component, ComponentOwner, Renderable};

/// Last path segment of `C`'s type name.
pub fn short_name<C>() -> &'static str {
    let name = type_name::<C>();
    name.rsplit("::").next().unwrap_or(name)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub layer: u8,
    pub x: f32,
    pub y: f32,
}

impl Renderable for Sprite {
    fn layer(&self) -> u8 { self.layer }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicOnly {
    pub ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hidden {
    pub layer: u8,
}

impl Renderable for Hidden {
    fn layer(&self) -> u8 { self.layer }
    fn is_visible(&self) -> bool { false }
}

impl_component!(Sprite: Renderable);
impl_component!(LogicOnly);
impl_component!(Hidden: Renderable);

pub fn sprite(layer: u8) -> Sprite {
    Sprite { layer, x: 0.0, y: 0.0 }
}

/// One routine invocation observed by [`Recorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    All(&'static str),
    Renderable { component: &'static str, layer: u8, visible: bool },
}

/// Owner that logs every routine call in order.
#[derive(Default, Debug)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn all_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::All(_))).count()
    }

    pub fn renderable_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Renderable { .. })).count()
    }
}

impl ComponentOwner for Recorder {
    type Error = Infallible;

    fn process_all<C: Component>(&mut self, _component: &C) -> Result<(), Self::Error> {
        self.calls.push(Call::All(short_name::<C>()));
        Ok(())
    }

    fn process_renderable<C: Component + Renderable>(&mut self, component: &C) -> Result<(), Self::Error> {
        self.calls.push(Call::Renderable {
            component: short_name::<C>(),
            layer: component.layer(),
            visible: component.is_visible(),
        });
        Ok(())
    }
}

/// Second owner type, so entries for different owners can be told apart.
#[derive(Default, Debug)]
pub struct Tally {
    pub all: usize,
    pub rendered: usize,
}

impl ComponentOwner for Tally {
    type Error = Infallible;

    fn process_all<C: Component>(&mut self, _component: &C) -> Result<(), Self::Error> {
        self.all += 1;
        Ok(())
    }

    fn process_renderable<C: Component + Renderable>(&mut self, _component: &C) -> Result<(), Self::Error> {
        self.rendered += 1;
        Ok(())
    }
}

/// Which routine a [`Faulty`] owner fails in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailIn {
    All,
    Renderable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutineError {
    pub routine: &'static str,
    pub component: &'static str,
}

impl fmt::Display for RoutineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed for {}", self.routine, self.component)
    }
}

impl std::error::Error for RoutineError {}

/// Owner whose routines fail on demand.
#[derive(Debug)]
pub struct Faulty {
    pub fail_in: FailIn,
    pub calls: Vec<&'static str>,
}

impl Faulty {
    pub fn new(fail_in: FailIn) -> Self {
        Self { fail_in, calls: Vec::new() }
    }
}

impl ComponentOwner for Faulty {
    type Error = RoutineError;

    fn process_all<C: Component>(&mut self, _component: &C) -> Result<(), Self::Error> {
        self.calls.push("process_all");
        if self.fail_in == FailIn::All {
            return Err(RoutineError { routine: "process_all", component: short_name::<C>() });
        }
        Ok(())
    }

    fn process_renderable<C: Component + Renderable>(&mut self, _component: &C) -> Result<(), Self::Error> {
        self.calls.push("process_renderable");
        if self.fail_in == FailIn::Renderable {
            return Err(RoutineError { routine: "process_renderable", component: short_name::<C>() });
        }
        Ok(())
    }
}
