//! Grid position and face-direction types.

use nalgebra::Vector3;

/// Integer cell coordinate in the voxel grid.
///
/// This is a simple alias for `nalgebra::Vector3<i32>`, used throughout the
/// simulation both as a map key (it is `Eq + Hash`) and as an offset base for
/// neighborhood walks.
pub type GridPos = Vector3<i32>;

/// The six face directions of a voxel cell.
///
/// Horizontal directions follow the usual grid convention: north is -z,
/// south is +z, west is -x, east is +x. Up is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All six face directions.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The four horizontal face directions.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The five directions that carry a placement face flag (all but down).
    pub const PLACEMENT: [Direction; 5] = [
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset vector for this direction.
    pub fn offset(self) -> GridPos {
        match self {
            Direction::Down => GridPos::new(0, -1, 0),
            Direction::Up => GridPos::new(0, 1, 0),
            Direction::North => GridPos::new(0, 0, -1),
            Direction::South => GridPos::new(0, 0, 1),
            Direction::West => GridPos::new(-1, 0, 0),
            Direction::East => GridPos::new(1, 0, 0),
        }
    }

    /// Neighbor of `pos` one step in this direction.
    pub fn step(self, pos: GridPos) -> GridPos {
        pos + self.offset()
    }
}
