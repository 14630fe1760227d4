//! Docklight Core
//!
//! Shared building blocks for the docklight crates: geometry primitives,
//! math re-exports, hashing collections, dock configuration, logging and
//! profiling hooks.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
