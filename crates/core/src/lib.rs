//! Voxel Fire-Spread Simulation Core
//!
//! A stochastic cellular-automaton fire rule over a sparse 3D voxel grid:
//! age-based decay, weather interaction, direct fuel-to-fuel ignition, and
//! fuel-to-air ignition at range, driven by a delayed re-invocation
//! scheduler.
//!
//! The crate is a library consumed by a host simulation loop. The host owns
//! the grid and is reached through the [`world::FireWorld`] seam; the
//! in-crate [`world::MemoryWorld`] implementation backs the tests and the
//! headless demo.

// Core types and utilities
pub mod core_types;

// Rule configuration and per-material flammability data
pub mod config;
pub mod flammability;

// Host seam and the in-memory reference host
pub mod world;

// The spread rule itself
pub mod engine;

// Re-export core types
pub use core_types::{materials, CellContent, Direction, FireCellState, GridPos, MaterialKind, SolidCell};

// Re-export configuration and data tables
pub use config::{
    AgeIncrement, ConfigError, DrawComparison, FailedSpread, FireRules, TickDelay, VerticalSearch,
    REFERENCE_MAX_AGE,
};
pub use flammability::{FlammabilityEntry, FlammabilityTable};

// Re-export the host seam and engine
pub use engine::SpreadEngine;
pub use world::{Difficulty, FireWorld, MemoryWorld, WorldEvent};
