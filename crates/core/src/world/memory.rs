//! Sparse in-memory world used by tests and the headless demo.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::core_types::{CellContent, FireCellState, GridPos, MaterialKind, SolidCell};
use crate::world::{Difficulty, FireWorld};

/// One recorded world mutation.
///
/// The log exists so tests can assert on the exact sequence of grid
/// mutations instead of sampling end states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// A fire cell was placed (or its age persisted) at `pos`.
    FirePlaced { pos: GridPos, age: u32 },
    /// The cell at `pos` reverted to air.
    CellCleared { pos: GridPos },
    /// The detonation hook fired for `pos`; the cell is removed.
    Exploded { pos: GridPos },
}

#[derive(Debug, Clone, Copy)]
enum Cell {
    Fire(FireCellState),
    Solid(SolidCell),
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTick {
    due: u64,
    seq: u64,
    pos: GridPos,
}

impl PartialEq for ScheduledTick {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for ScheduledTick {}

impl PartialOrd for ScheduledTick {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTick {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Sparse voxel world with a deterministic tick queue.
///
/// Cells live in a hash map keyed by position; everything else is a small
/// set of knobs the tests flip directly. Rain exposure is geometric: a cell
/// is exposed unless some solid cell sits above it in the same column,
/// scanned up to the world height.
#[derive(Debug)]
pub struct MemoryWorld {
    cells: FxHashMap<GridPos, Cell>,
    height: i32,
    now: u64,
    queue: BinaryHeap<Reverse<ScheduledTick>>,
    pending: FxHashSet<GridPos>,
    seq: u64,
    events: Vec<WorldEvent>,
    non_sturdy: FxHashSet<MaterialKind>,
    infinite_burn_materials: FxHashSet<MaterialKind>,
    detonable_materials: FxHashSet<MaterialKind>,
    /// Whether it is raining.
    pub raining: bool,
    /// Whether the whole world counts as an increased-burnout biome.
    pub burnout_biome: bool,
    /// Host difficulty.
    pub difficulty_setting: Difficulty,
    /// Global fire-tick gate.
    pub fire_ticking: bool,
}

impl MemoryWorld {
    /// World with columns spanning `0..height`.
    pub fn new(height: i32) -> Self {
        MemoryWorld {
            cells: FxHashMap::default(),
            height,
            now: 0,
            queue: BinaryHeap::new(),
            pending: FxHashSet::default(),
            seq: 0,
            events: Vec::new(),
            non_sturdy: FxHashSet::default(),
            infinite_burn_materials: FxHashSet::default(),
            detonable_materials: FxHashSet::default(),
            raining: false,
            burnout_biome: false,
            difficulty_setting: Difficulty::default(),
            fire_ticking: true,
        }
    }

    /// Put a solid cell at `pos`.
    pub fn set_solid(&mut self, pos: GridPos, cell: SolidCell) {
        self.cells.insert(pos, Cell::Solid(cell));
    }

    /// Mark a material as lacking a sturdy upward face (plants and the
    /// like). Solids are sturdy by default.
    pub fn mark_non_sturdy(&mut self, material: MaterialKind) {
        self.non_sturdy.insert(material);
    }

    /// Classify a material as always-burning ground.
    pub fn mark_infinite_burn(&mut self, material: MaterialKind) {
        self.infinite_burn_materials.insert(material);
    }

    /// Classify a material as detonable.
    pub fn mark_detonable(&mut self, material: MaterialKind) {
        self.detonable_materials.insert(material);
    }

    /// Current simulation tick.
    pub fn current_tick(&self) -> u64 {
        self.now
    }

    /// Number of callbacks still armed.
    pub fn scheduled_len(&self) -> usize {
        self.queue.len()
    }

    /// Advance one tick and return the coordinates whose callbacks are due,
    /// in scheduling order. The host loop feeds these to the engine.
    pub fn advance_tick(&mut self) -> Vec<GridPos> {
        self.now += 1;
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.queue.peek().copied() {
            if next.due > self.now {
                break;
            }
            self.queue.pop();
            self.pending.remove(&next.pos);
            due.push(next.pos);
        }
        due
    }

    /// Mutation events recorded so far.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Take and reset the recorded events.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}

impl FireWorld for MemoryWorld {
    fn content(&self, pos: GridPos) -> CellContent {
        match self.cells.get(&pos) {
            None => CellContent::Empty,
            Some(Cell::Fire(state)) => CellContent::Fire(*state),
            Some(Cell::Solid(cell)) => CellContent::Solid(*cell),
        }
    }

    fn is_upward_sturdy(&self, pos: GridPos) -> bool {
        match self.cells.get(&pos) {
            Some(Cell::Solid(cell)) => !self.non_sturdy.contains(&cell.material),
            _ => false,
        }
    }

    fn place_fire(&mut self, pos: GridPos, state: FireCellState) {
        self.cells.insert(pos, Cell::Fire(state));
        self.events.push(WorldEvent::FirePlaced {
            pos,
            age: state.age,
        });
    }

    fn clear_cell(&mut self, pos: GridPos) {
        if self.cells.remove(&pos).is_some() {
            self.events.push(WorldEvent::CellCleared { pos });
        }
    }

    fn is_raining(&self) -> bool {
        self.raining
    }

    fn is_rain_exposed(&self, pos: GridPos) -> bool {
        (pos.y + 1..self.height)
            .all(|y| !matches!(self.cells.get(&GridPos::new(pos.x, y, pos.z)), Some(Cell::Solid(_))))
    }

    fn increased_burnout(&self, _pos: GridPos) -> bool {
        self.burnout_biome
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty_setting
    }

    fn fire_ticking_enabled(&self) -> bool {
        self.fire_ticking
    }

    fn infinite_burn(&self, material: MaterialKind) -> bool {
        self.infinite_burn_materials.contains(&material)
    }

    fn detonable(&self, material: MaterialKind) -> bool {
        self.detonable_materials.contains(&material)
    }

    fn schedule_tick(&mut self, pos: GridPos, delay: u32) {
        // A coordinate is armed at most once; re-arming while a callback is
        // already pending is coalesced. Removal never cancels: the engine
        // absorbs callbacks that fire for vacated cells.
        if !self.pending.insert(pos) {
            trace!(
                "coalesced duplicate schedule at ({}, {}, {})",
                pos.x,
                pos.y,
                pos.z
            );
            return;
        }
        self.seq += 1;
        self.queue.push(Reverse(ScheduledTick {
            due: self.now + u64::from(delay),
            seq: self.seq,
            pos,
        }));
    }

    fn explode(&mut self, pos: GridPos) {
        self.cells.remove(&pos);
        self.events.push(WorldEvent::Exploded { pos });
    }
}
