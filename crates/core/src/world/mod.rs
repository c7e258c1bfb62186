//! The seam between the spread rule and its host.
//!
//! Everything the rule needs from the surrounding system — grid access,
//! weather, the global tick toggle, material classifications, the callback
//! scheduler, and the detonation hook — is reached through [`FireWorld`].
//! The real host is a game engine; [`MemoryWorld`] is the in-crate
//! implementation used by tests and the headless demo.

pub mod memory;

pub use memory::{MemoryWorld, WorldEvent};

use crate::core_types::{CellContent, FireCellState, GridPos, MaterialKind};

/// Host difficulty setting, consumed by the air-ignition formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Numeric level used in the ignition bonus (`7 * level`).
    pub fn level(self) -> u32 {
        match self {
            Difficulty::Peaceful => 0,
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Host-side collaborator interface for the spread rule.
///
/// Invalid coordinates are a contract violation of the implementor, not a
/// condition the rule handles; every method is total over valid positions.
/// Implementations must tolerate mutations landing on already-mutated cells
/// within one global step — the rule re-reads current state rather than
/// caching neighbor snapshots.
pub trait FireWorld {
    /// What currently occupies `pos`.
    fn content(&self, pos: GridPos) -> CellContent;

    /// Whether the occupant of `pos` presents a sturdy upward face that can
    /// support a fire cell resting on it.
    fn is_upward_sturdy(&self, pos: GridPos) -> bool;

    /// Put a fire cell at `pos`, replacing whatever was there. Also used to
    /// persist an age update on an existing fire cell.
    fn place_fire(&mut self, pos: GridPos, state: FireCellState);

    /// Revert `pos` to air.
    fn clear_cell(&mut self, pos: GridPos);

    /// Whether it is currently raining anywhere in the world.
    fn is_raining(&self) -> bool;

    /// Whether `pos` is exposed to the sky closely enough to be wetted when
    /// it rains. Purely geometric; combine with [`FireWorld::is_raining`].
    fn is_rain_exposed(&self, pos: GridPos) -> bool;

    /// Whether the biome at `pos` burns out fires faster (wet or humid
    /// climates).
    fn increased_burnout(&self, pos: GridPos) -> bool;

    /// Current host difficulty.
    fn difficulty(&self) -> Difficulty;

    /// Global game-rule gate for the whole simulation.
    fn fire_ticking_enabled(&self) -> bool;

    /// Whether `material` belongs to the always-burning group: fire resting
    /// on it never self-extinguishes.
    fn infinite_burn(&self, material: MaterialKind) -> bool;

    /// Whether `material` explodes when fire reaches it.
    fn detonable(&self, material: MaterialKind) -> bool;

    /// Ask the scheduler to invoke the rule for `pos` again after
    /// `delay` ticks.
    fn schedule_tick(&mut self, pos: GridPos, delay: u32);

    /// Detonation side effect for detonable materials.
    fn explode(&mut self, pos: GridPos);

    /// True if `pos` holds air.
    fn is_empty(&self, pos: GridPos) -> bool {
        self.content(pos).is_empty()
    }

    /// Fire state at `pos`, if it is burning.
    fn fire_state(&self, pos: GridPos) -> Option<FireCellState> {
        match self.content(pos) {
            CellContent::Fire(state) => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(Difficulty::Peaceful.level(), 0);
        assert_eq!(Difficulty::Easy.level(), 1);
        assert_eq!(Difficulty::Normal.level(), 2);
        assert_eq!(Difficulty::Hard.level(), 3);
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }
}
