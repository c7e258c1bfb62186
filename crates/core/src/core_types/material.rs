//! Material identifiers and voxel cell contents.

use serde::{Deserialize, Serialize};

use super::fire_state::FireCellState;

/// Opaque identifier for what occupies a voxel cell.
///
/// The simulation never interprets the id itself; all behavior is looked up
/// through the flammability table and the host's material classifications.
/// Equality and hashing are stable, which is all the rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialKind(pub u16);

/// Named materials used by the standard flammability table, the demo, and
/// the tests. Hosts are free to define their own ids; these are just a
/// convenient shared palette.
pub mod materials {
    use super::MaterialKind;

    pub const STONE: MaterialKind = MaterialKind(0);
    pub const PLANKS: MaterialKind = MaterialKind(1);
    pub const LOG: MaterialKind = MaterialKind(2);
    pub const LEAVES: MaterialKind = MaterialKind(3);
    pub const WOOL: MaterialKind = MaterialKind(4);
    pub const BOOKSHELF: MaterialKind = MaterialKind(5);
    pub const TNT: MaterialKind = MaterialKind(6);
    pub const TALL_GRASS: MaterialKind = MaterialKind(7);
    pub const VINES: MaterialKind = MaterialKind(8);
    pub const COAL_BLOCK: MaterialKind = MaterialKind(9);
    pub const HAY_BALE: MaterialKind = MaterialKind(10);
    pub const CARPET: MaterialKind = MaterialKind(11);
    pub const BAMBOO: MaterialKind = MaterialKind(12);
    pub const DRIED_KELP: MaterialKind = MaterialKind(13);
    pub const LECTERN: MaterialKind = MaterialKind(14);
    /// Sturdy rock that hosts typically classify as an infinite-burn base.
    pub const EMBER_ROCK: MaterialKind = MaterialKind(15);
}

/// A solid (non-fire) occupant of a cell.
///
/// `waterlogged` is the orthogonal wetness attribute: a waterlogged cell
/// reports zero ignite/burn odds no matter what the table says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidCell {
    pub material: MaterialKind,
    pub waterlogged: bool,
}

impl SolidCell {
    /// Dry solid cell of the given material.
    pub fn dry(material: MaterialKind) -> Self {
        SolidCell {
            material,
            waterlogged: false,
        }
    }

    /// Waterlogged solid cell of the given material.
    pub fn waterlogged(material: MaterialKind) -> Self {
        SolidCell {
            material,
            waterlogged: true,
        }
    }
}

/// What a grid cell currently holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellContent {
    /// Nothing (air).
    Empty,
    /// A burning cell with its age clock and face flags.
    Fire(FireCellState),
    /// A solid material occupant.
    Solid(SolidCell),
}

impl CellContent {
    /// True for air.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    /// The solid occupant, if any.
    pub fn as_solid(&self) -> Option<SolidCell> {
        match self {
            CellContent::Solid(cell) => Some(*cell),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_kind_equality() {
        assert_eq!(materials::LOG, MaterialKind(2));
        assert_ne!(materials::LOG, materials::LEAVES);
    }

    #[test]
    fn test_solid_cell_constructors() {
        assert!(!SolidCell::dry(materials::PLANKS).waterlogged);
        assert!(SolidCell::waterlogged(materials::PLANKS).waterlogged);
    }

    #[test]
    fn test_cell_content_accessors() {
        assert!(CellContent::Empty.is_empty());
        let solid = CellContent::Solid(SolidCell::dry(materials::STONE));
        assert!(!solid.is_empty());
        assert_eq!(solid.as_solid().unwrap().material, materials::STONE);
        assert!(CellContent::Empty.as_solid().is_none());
    }
}
