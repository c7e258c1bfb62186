//! Per-material flammability odds.
//!
//! The table is built once at startup from a registration list and passed to
//! the engine by shared reference; it is never mutated during simulation.
//! Materials missing from the table are inert (both odds zero), which is a
//! valid state rather than an error.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core_types::{materials, MaterialKind};

/// How strongly a material encourages an adjacent air cell to ignite.
pub const IGNITE_INSTANT: u32 = 60;
pub const IGNITE_EASY: u32 = 30;
pub const IGNITE_MEDIUM: u32 = 15;
pub const IGNITE_HARD: u32 = 5;

/// How readily a material is converted into fire by adjacent fire.
pub const BURN_INSTANT: u32 = 100;
pub const BURN_EASY: u32 = 60;
pub const BURN_MEDIUM: u32 = 20;
pub const BURN_HARD: u32 = 5;

/// Flammability odds for one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlammabilityEntry {
    /// Tendency to cause an adjacent empty cell to ignite.
    pub ignite_encouragement: u32,
    /// Tendency to be consumed by adjacent fire.
    pub burn_susceptibility: u32,
}

/// Immutable mapping from material to flammability odds.
#[derive(Debug, Clone, Default)]
pub struct FlammabilityTable {
    entries: FxHashMap<MaterialKind, FlammabilityEntry>,
}

impl FlammabilityTable {
    /// Empty table; every material is inert.
    pub fn new() -> Self {
        FlammabilityTable::default()
    }

    /// Register or replace a material's odds. Bootstrap-time only.
    pub fn register(&mut self, material: MaterialKind, ignite: u32, burn: u32) {
        self.entries.insert(
            material,
            FlammabilityEntry {
                ignite_encouragement: ignite,
                burn_susceptibility: burn,
            },
        );
    }

    /// Ignite encouragement for `material`, 0 if unregistered.
    pub fn ignite(&self, material: MaterialKind) -> u32 {
        self.entries
            .get(&material)
            .map_or(0, |entry| entry.ignite_encouragement)
    }

    /// Burn susceptibility for `material`, 0 if unregistered.
    pub fn burn(&self, material: MaterialKind) -> u32 {
        self.entries
            .get(&material)
            .map_or(0, |entry| entry.burn_susceptibility)
    }

    /// Whether `material` counts as flammable for survival and placement.
    pub fn can_sustain_fire(&self, material: MaterialKind) -> bool {
        self.ignite(material) > 0
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no material is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The standard registration list over the built-in material palette.
    ///
    /// Odds follow the classic groupings: structural wood is hard to
    /// encourage but burns at a moderate rate, foliage and fabric catch
    /// easily, dry plant matter does both, and dense fuels like logs and
    /// coal smolder slowly.
    pub fn standard() -> Self {
        let mut table = FlammabilityTable::new();
        table.register(materials::PLANKS, IGNITE_HARD, BURN_MEDIUM);
        table.register(materials::LOG, IGNITE_HARD, BURN_HARD);
        table.register(materials::COAL_BLOCK, IGNITE_HARD, BURN_HARD);
        table.register(materials::LEAVES, IGNITE_EASY, BURN_EASY);
        table.register(materials::WOOL, IGNITE_EASY, BURN_EASY);
        table.register(materials::DRIED_KELP, IGNITE_EASY, BURN_EASY);
        table.register(materials::BOOKSHELF, IGNITE_EASY, BURN_MEDIUM);
        table.register(materials::LECTERN, IGNITE_EASY, BURN_MEDIUM);
        table.register(materials::TNT, IGNITE_MEDIUM, BURN_INSTANT);
        table.register(materials::VINES, IGNITE_MEDIUM, BURN_INSTANT);
        table.register(materials::TALL_GRASS, IGNITE_INSTANT, BURN_INSTANT);
        table.register(materials::HAY_BALE, IGNITE_INSTANT, BURN_MEDIUM);
        table.register(materials::CARPET, IGNITE_INSTANT, BURN_MEDIUM);
        table.register(materials::BAMBOO, IGNITE_INSTANT, BURN_EASY);
        table
    }
}
