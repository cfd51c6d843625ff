#![allow(dead_code)]

use std::convert::Infallible;

use component_dispatch::{impl_component, Component, ComponentOwner, Renderable};

pub const COMPONENTS_SMALL: usize = 10_000;
pub const COMPONENTS_MED: usize = 1_000_000;

#[derive(Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy)]
pub struct Sprite {
    pub layer: u8,
    pub atlas: u16,
}

impl Renderable for Sprite {
    fn layer(&self) -> u8 { self.layer }
}

impl_component!(Position);
impl_component!(Sprite: Renderable);

/// Owner doing just enough work that the calls are not optimized away.
#[derive(Default)]
pub struct Accumulator {
    pub sum: f32,
    pub layers: u64,
}

impl ComponentOwner for Accumulator {
    type Error = Infallible;

    #[inline]
    fn process_all<C: Component>(&mut self, _component: &C) -> Result<(), Self::Error> {
        self.sum += 1.0;
        Ok(())
    }

    #[inline]
    fn process_renderable<C: Component + Renderable>(&mut self, component: &C) -> Result<(), Self::Error> {
        self.layers += component.layer() as u64;
        Ok(())
    }
}

pub fn positions(n: usize) -> Vec<Position> {
    (0..n).map(|i| Position { x: i as f32, y: 0.0 }).collect()
}

pub fn sprites(n: usize) -> Vec<Sprite> {
    (0..n).map(|i| Sprite { layer: (i % 8) as u8, atlas: 0 }).collect()
}
