//! Core types and utilities

pub mod fire_state;
pub mod material;
pub mod pos;

pub use fire_state::FireCellState;
pub use material::{materials, CellContent, MaterialKind, SolidCell};
pub use pos::{Direction, GridPos};
