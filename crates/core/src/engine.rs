//! The tick-driven fire-spread rule.
//!
//! One engine instance borrows its immutable configuration and is invoked by
//! the host scheduler once per armed coordinate. Each invocation re-reads
//! current grid state (other cells may have mutated the neighborhood earlier
//! in the same global step); the only deliberate staleness is the cell's own
//! age snapshot taken at the top of the tick.

use rand::Rng;
use tracing::{debug, trace};

use crate::config::{ConfigError, FailedSpread, FireRules};
use crate::core_types::{Direction, FireCellState, GridPos};
use crate::flammability::FlammabilityTable;
use crate::world::FireWorld;

/// Resistance base for direct spread into the four horizontal neighbors.
const HORIZONTAL_SPREAD_RESISTANCE: u32 = 300;
/// Resistance base for direct spread straight up and down.
const VERTICAL_SPREAD_RESISTANCE: u32 = 250;
/// Resistance reduction in increased-burnout biomes.
const BURNOUT_BIOME_RELIEF: u32 = 50;
/// Gate numerator for direct spread, per unit of the age scale factor.
const SPREAD_GATE_NUMERATOR: u32 = 5;
/// Gate age offset for direct spread, per unit of the age scale factor.
const SPREAD_GATE_AGE_OFFSET: u32 = 10;
/// Lonely fires above sturdy ground are tolerated up to this age (times
/// the age scale factor).
const LONELY_AGE_THRESHOLD: u32 = 3;
/// Rain extinguish chance at age zero.
const RAIN_BASE_CHANCE: f32 = 0.2;
/// Additional rain extinguish chance per normalized age step.
const RAIN_AGE_CHANCE: f32 = 0.03;
/// Base resistance for igniting an air cell at range.
const AIR_IGNITION_RESISTANCE: u32 = 100;
/// Extra resistance per level above the first when the target sits more
/// than one level above the fire.
const AIR_IGNITION_HEIGHT_PENALTY: u32 = 100;
/// Fixed numerator bonus for air ignition.
const AIR_IGNITION_BONUS: u32 = 40;
/// Numerator bonus per difficulty level.
const DIFFICULTY_BONUS: u32 = 7;
/// Normalized-age offset in the air-ignition denominator.
const AIR_IGNITION_AGE_OFFSET: u32 = 30;

/// The spread rule, bound to one rule set and one flammability table.
#[derive(Debug, Clone, Copy)]
pub struct SpreadEngine<'a> {
    rules: &'a FireRules,
    table: &'a FlammabilityTable,
}

impl<'a> SpreadEngine<'a> {
    /// Build an engine, rejecting degenerate configurations up front.
    pub fn new(
        rules: &'a FireRules,
        table: &'a FlammabilityTable,
    ) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(SpreadEngine { rules, table })
    }

    /// The rule set this engine runs.
    pub fn rules(&self) -> &FireRules {
        self.rules
    }

    /// Ignite encouragement of the cell at `pos`; waterlogged cells and
    /// non-solids report zero.
    fn ignite_odds_at<W: FireWorld + ?Sized>(&self, world: &W, pos: GridPos) -> u32 {
        match world.content(pos).as_solid() {
            Some(cell) if !cell.waterlogged => self.table.ignite(cell.material),
            _ => 0,
        }
    }

    /// Whether the cell at `pos` can feed an adjacent fire.
    pub fn can_burn_at<W: FireWorld + ?Sized>(&self, world: &W, pos: GridPos) -> bool {
        self.ignite_odds_at(world, pos) > 0
    }

    /// Whether any of the six face neighbors of `pos` is flammable.
    pub fn is_valid_fire_location<W: FireWorld + ?Sized>(
        &self,
        world: &W,
        pos: GridPos,
    ) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| self.can_burn_at(world, dir.step(pos)))
    }

    /// Strongest ignite encouragement among the six face neighbors of an
    /// empty cell. Zero for occupied cells: only air can be encouraged.
    pub fn max_neighbor_encouragement<W: FireWorld + ?Sized>(
        &self,
        world: &W,
        pos: GridPos,
    ) -> u32 {
        if !world.is_empty(pos) {
            return 0;
        }
        Direction::ALL
            .into_iter()
            .map(|dir| self.ignite_odds_at(world, dir.step(pos)))
            .max()
            .unwrap_or(0)
    }

    /// Whether a fire cell at `pos` survives: it needs sturdy ground below
    /// or at least one flammable neighbor.
    pub fn can_survive<W: FireWorld + ?Sized>(&self, world: &W, pos: GridPos) -> bool {
        world.is_upward_sturdy(Direction::Down.step(pos))
            || self.is_valid_fire_location(world, pos)
    }

    /// Whether a fresh fire cell may be placed at `pos`.
    pub fn can_place_at<W: FireWorld + ?Sized>(&self, world: &W, pos: GridPos) -> bool {
        world.is_empty(pos) && self.can_survive(world, pos)
    }

    /// Initial state for a fire placed at `pos`: fresh age, with face flags
    /// derived from neighbor flammability when the cell below offers
    /// neither fuel nor support.
    pub fn initial_state<W: FireWorld + ?Sized>(
        &self,
        world: &W,
        pos: GridPos,
    ) -> FireCellState {
        let below = Direction::Down.step(pos);
        if self.can_burn_at(world, below) || world.is_upward_sturdy(below) {
            return FireCellState::default();
        }
        FireCellState {
            age: 0,
            up: self.can_burn_at(world, Direction::Up.step(pos)),
            north: self.can_burn_at(world, Direction::North.step(pos)),
            south: self.can_burn_at(world, Direction::South.step(pos)),
            west: self.can_burn_at(world, Direction::West.step(pos)),
            east: self.can_burn_at(world, Direction::East.step(pos)),
        }
    }

    /// Place a fire cell at `pos` if placement rules allow it, arming the
    /// scheduler. Returns whether fire was placed.
    pub fn ignite<W, R>(&self, world: &mut W, pos: GridPos, rng: &mut R) -> bool
    where
        W: FireWorld + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.can_place_at(world, pos) {
            return false;
        }
        let state = self.initial_state(world, pos);
        world.place_fire(pos, state);
        world.schedule_tick(pos, self.rules.tick_delay.sample(rng));
        true
    }

    /// Whether `pos` or one of its four horizontal neighbors is rain
    /// exposed. Only meaningful while it rains.
    fn is_near_rain<W: FireWorld + ?Sized>(&self, world: &W, pos: GridPos) -> bool {
        world.is_rain_exposed(pos)
            || Direction::HORIZONTAL
                .into_iter()
                .any(|dir| world.is_rain_exposed(dir.step(pos)))
    }

    /// One scheduled invocation of the rule for the fire cell at `pos`.
    pub fn tick<W, R>(&self, world: &mut W, pos: GridPos, rng: &mut R)
    where
        W: FireWorld + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(state) = world.fire_state(pos) else {
            // Stale callback for a cell removed since scheduling; absorb it.
            // No re-arm here, or vacated coordinates would ring forever.
            trace!("stale tick at ({}, {}, {})", pos.x, pos.y, pos.z);
            return;
        };

        world.schedule_tick(pos, self.rules.tick_delay.sample(rng));

        if !world.fire_ticking_enabled() {
            return;
        }

        if !self.can_survive(world, pos) {
            world.clear_cell(pos);
            return;
        }

        let below = Direction::Down.step(pos);
        let infinite_burn = world
            .content(below)
            .as_solid()
            .is_some_and(|cell| world.infinite_burn(cell.material));

        // Deliberately stale for the rest of this invocation: every formula
        // below uses the age observed here even after a newer age has been
        // persisted.
        let age = state.age;
        let scale = self.rules.scale();

        if !infinite_burn
            && world.is_raining()
            && self.is_near_rain(world, pos)
            && rng.random::<f32>()
                < RAIN_BASE_CHANCE + self.rules.normalized_age(age) as f32 * RAIN_AGE_CHANCE
        {
            debug!("rain extinguished fire at ({}, {}, {})", pos.x, pos.y, pos.z);
            world.clear_cell(pos);
            return;
        }

        let updated_age = self.rules.advance_age(age, rng);
        if updated_age != age {
            world.place_fire(pos, state.with_age(updated_age, self.rules.max_age));
        }

        if !infinite_burn {
            if !self.is_valid_fire_location(world, pos) {
                // Lonely fire: nothing left to burn beside it. Tolerated on
                // sturdy ground while young, removed otherwise.
                if !world.is_upward_sturdy(below) || age > LONELY_AGE_THRESHOLD * scale {
                    world.clear_cell(pos);
                }
                return;
            }
            if age == self.rules.max_age && !self.can_burn_at(world, below) {
                debug!("fire burned out at ({}, {}, {})", pos.x, pos.y, pos.z);
                world.clear_cell(pos);
                return;
            }
        }

        let burnout = world.increased_burnout(pos);
        let relief = if burnout { BURNOUT_BIOME_RELIEF } else { 0 };

        for dir in Direction::HORIZONTAL {
            self.try_spread_into(
                world,
                dir.step(pos),
                HORIZONTAL_SPREAD_RESISTANCE - relief,
                age,
                rng,
            );
        }
        if self.rules.vertical_adjacent_spread {
            self.try_spread_into(
                world,
                Direction::Up.step(pos),
                VERTICAL_SPREAD_RESISTANCE - relief,
                age,
                rng,
            );
            self.try_spread_into(
                world,
                Direction::Down.step(pos),
                VERTICAL_SPREAD_RESISTANCE - relief,
                age,
                rng,
            );
        }

        let difficulty_bonus = DIFFICULTY_BONUS * world.difficulty().level();
        for dx in -1..=1 {
            for dz in -1..=1 {
                for dy in self.rules.vertical_search.range() {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let mut resistance = AIR_IGNITION_RESISTANCE;
                    if dy > 1 {
                        resistance += ((dy - 1) as u32) * AIR_IGNITION_HEIGHT_PENALTY;
                    }
                    let target = pos + GridPos::new(dx, dy, dz);
                    let encouragement = self.max_neighbor_encouragement(world, target);
                    if encouragement == 0 {
                        continue;
                    }
                    let mut odds = (encouragement + AIR_IGNITION_BONUS + difficulty_bonus)
                        / (self.rules.normalized_age(age) + AIR_IGNITION_AGE_OFFSET);
                    if burnout {
                        odds /= 2;
                    }
                    if odds > 0
                        && self
                            .rules
                            .draw_comparison
                            .accepts(rng.random_range(0..resistance), odds)
                        && !(world.is_raining() && world.is_rain_exposed(target))
                    {
                        debug!(
                            "fire jumped to air at ({}, {}, {})",
                            target.x, target.y, target.z
                        );
                        let fresh = self.initial_state(world, target);
                        world.place_fire(target, fresh);
                        world.schedule_tick(target, self.rules.tick_delay.sample(rng));
                    }
                }
            }
        }
    }

    /// Direct fuel-to-fuel spread attempt against one neighbor.
    fn try_spread_into<W, R>(
        &self,
        world: &mut W,
        target: GridPos,
        resistance: u32,
        age: u32,
        rng: &mut R,
    ) where
        W: FireWorld + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(cell) = world.content(target).as_solid() else {
            return;
        };
        let burn = if cell.waterlogged {
            0
        } else {
            self.table.burn(cell.material)
        };
        if burn == 0 {
            return;
        }
        if !self
            .rules
            .draw_comparison
            .accepts(rng.random_range(0..resistance), burn)
        {
            return;
        }

        // The affected block ignites only if the fire is young enough and
        // the target is not being rained on; what happens to it otherwise
        // is the configured failure policy.
        let scale = self.rules.scale();
        let gate = rng.random_range(0..age + SPREAD_GATE_AGE_OFFSET * scale)
            < SPREAD_GATE_NUMERATOR * scale;
        if gate && !(world.is_raining() && world.is_rain_exposed(target)) {
            debug!(
                "fire spread into ({}, {}, {})",
                target.x, target.y, target.z
            );
            let fresh = self.initial_state(world, target);
            world.place_fire(target, fresh);
            world.schedule_tick(target, self.rules.tick_delay.sample(rng));
        } else {
            match self.rules.failed_spread {
                FailedSpread::ConsumeFuel => world.clear_cell(target),
                FailedSpread::LeaveFuel => {}
            }
        }

        if world.detonable(cell.material) {
            world.explode(target);
        }
    }
}
