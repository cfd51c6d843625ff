//! # Dispatch Module
//!
//! Capability dispatch implementation.
//!
//! This module contains the building blocks of the dispatch cache:
//! - Component and capability declarations
//! - The capability predicate
//! - Owner callback slots
//! - Dispatch entry synthesis
//! - The concurrent type-indexed cache
//! - Alternative strategies used for comparison
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod config;
pub mod component;
pub mod capability;
pub mod owner;
pub mod entry;
pub mod cache;
pub mod strategy;
