//! Per-cell fire state: the age clock plus cosmetic face flags.

use serde::{Deserialize, Serialize};

/// State carried by a burning cell.
///
/// `age` drives decay and extinguish timing; it is clamped to the configured
/// ceiling on every write. The five face flags are a rendering/collision hint
/// derived once at placement from which neighbors are flammable; the
/// simulation rule never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FireCellState {
    pub age: u32,
    pub up: bool,
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

impl FireCellState {
    /// Copy of this state with `age` replaced and clamped to `max_age`.
    pub fn with_age(mut self, age: u32, max_age: u32) -> Self {
        self.age = age.min(max_age);
        self
    }

    /// True if any face flag is set.
    pub fn has_faces(&self) -> bool {
        self.up || self.north || self.south || self.west || self.east
    }
}
