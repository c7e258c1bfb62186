//! Scenario tests for the spread rule: extinguish paths, spread targeting,
//! policy forks, and the detonation hook, each on a small hand-built world.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use voxfire_core::{
    materials, AgeIncrement, CellContent, FailedSpread, FireCellState, FireRules, FireWorld,
    FlammabilityTable, GridPos, MemoryWorld, SolidCell, SpreadEngine, TickDelay, WorldEvent,
};

fn pos(x: i32, y: i32, z: i32) -> GridPos {
    GridPos::new(x, y, z)
}

/// Honor `RUST_LOG` when debugging a scenario; repeated calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Deterministic aging and a one-tick re-arm keep scenarios short.
fn quick_rules() -> FireRules {
    FireRules {
        tick_delay: TickDelay::Fixed(1),
        age_increment: AgeIncrement::Deterministic,
        ..FireRules::default()
    }
}

fn fill_floor(world: &mut MemoryWorld, material: voxfire_core::MaterialKind, half_extent: i32) {
    for x in -half_extent..=half_extent {
        for z in -half_extent..=half_extent {
            world.set_solid(pos(x, 0, z), SolidCell::dry(material));
        }
    }
}

/// Advance one world tick and run the rule for every due coordinate.
fn run_tick(engine: &SpreadEngine, world: &mut MemoryWorld, rng: &mut StdRng) {
    for due in world.advance_tick() {
        engine.tick(world, due, rng);
    }
}

#[test]
fn test_max_age_fire_over_inert_ground_dies_deterministically() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::STONE, 2);
    // A flammable neighbor keeps the lonely-fire branch out of the way.
    world.set_solid(pos(1, 1, 0), SolidCell::dry(materials::LEAVES));
    world.place_fire(pos(0, 1, 0), FireCellState::default().with_age(15, 15));
    world.drain_events();

    engine.tick(&mut world, pos(0, 1, 0), &mut rng);

    assert_eq!(world.content(pos(0, 1, 0)), CellContent::Empty);
    // The burnout path stops the tick before any spread happens.
    assert_eq!(
        world.events(),
        &[WorldEvent::CellCleared { pos: pos(0, 1, 0) }]
    );
}

#[test]
fn test_lonely_fire_survives_until_age_threshold() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::STONE, 2);
    world.place_fire(pos(0, 1, 0), FireCellState::default().with_age(3, 15));

    // Age 3 is exactly the threshold: tolerated on sturdy ground.
    engine.tick(&mut world, pos(0, 1, 0), &mut rng);
    assert!(world.fire_state(pos(0, 1, 0)).is_some());

    // The next tick sees age 4 and removes it.
    engine.tick(&mut world, pos(0, 1, 0), &mut rng);
    assert_eq!(world.content(pos(0, 1, 0)), CellContent::Empty);
}

#[test]
fn test_unsupported_lonely_fire_dies_in_one_tick_at_any_age() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();

    for age in [0, 1, 7, 15] {
        let mut rng = StdRng::seed_from_u64(u64::from(age));
        let mut world = MemoryWorld::new(32);
        world.place_fire(
            pos(0, 5, 0),
            FireCellState::default().with_age(age, 15),
        );
        engine.tick(&mut world, pos(0, 5, 0), &mut rng);
        assert_eq!(
            world.content(pos(0, 5, 0)),
            CellContent::Empty,
            "age {age} fire should not float"
        );
    }
}

#[test]
fn test_stale_callback_is_absorbed() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::STONE, 1);
    assert!(engine.ignite(&mut world, pos(0, 1, 0), &mut rng));

    // The host removes the cell before the callback fires.
    world.clear_cell(pos(0, 1, 0));
    world.drain_events();

    run_tick(&engine, &mut world, &mut rng);
    assert!(world.events().is_empty());
    assert_eq!(world.scheduled_len(), 0);
}

#[test]
fn test_infinite_burn_ground_never_self_extinguishes() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(21);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::EMBER_ROCK, 2);
    world.mark_infinite_burn(materials::EMBER_ROCK);
    world.raining = true;
    world.place_fire(pos(0, 1, 0), FireCellState::default().with_age(15, 15));
    world.schedule_tick(pos(0, 1, 0), 1);

    for _ in 0..50 {
        run_tick(&engine, &mut world, &mut rng);
    }
    assert!(world.fire_state(pos(0, 1, 0)).is_some());
}

#[test]
fn test_air_ignition_only_targets_empty_cells() {
    init_tracing();
    // Encourager that never burns directly, so every new fire must come
    // from the air-ignition path.
    let mut table = FlammabilityTable::new();
    table.register(materials::LEAVES, 60, 0);

    let rules = quick_rules();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(13);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::EMBER_ROCK, 3);
    world.mark_infinite_burn(materials::EMBER_ROCK);
    world.set_solid(pos(1, 1, 1), SolidCell::dry(materials::LEAVES));
    // Occupied cells adjacent to the encourager must never ignite.
    world.set_solid(pos(0, 1, 1), SolidCell::dry(materials::STONE));
    world.set_solid(pos(1, 2, 1), SolidCell::dry(materials::STONE));
    assert!(engine.ignite(&mut world, pos(0, 1, 0), &mut rng));
    world.drain_events();

    for _ in 0..600 {
        run_tick(&engine, &mut world, &mut rng);
    }

    assert_eq!(
        world.content(pos(0, 1, 1)),
        CellContent::Solid(SolidCell::dry(materials::STONE))
    );
    assert_eq!(
        world.content(pos(1, 2, 1)),
        CellContent::Solid(SolidCell::dry(materials::STONE))
    );
    assert_eq!(
        world.content(pos(1, 1, 1)),
        CellContent::Solid(SolidCell::dry(materials::LEAVES))
    );

    // Every ignition landed on one of the air cells beside the encourager
    // (or was the original fire's age persisting); occupied cells were
    // never targeted.
    let allowed = [pos(0, 1, 0), pos(1, 1, 0), pos(2, 1, 1), pos(1, 1, 2)];
    for event in world.events() {
        if let WorldEvent::FirePlaced { pos: placed, .. } = event {
            assert!(
                allowed.contains(placed),
                "unexpected ignition at {placed:?}"
            );
        }
    }
    assert!(world.fire_state(pos(1, 1, 0)).is_some());
}

#[test]
fn test_detonable_material_explodes_when_reached() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::EMBER_ROCK, 2);
    world.mark_infinite_burn(materials::EMBER_ROCK);
    world.mark_detonable(materials::TNT);
    world.set_solid(pos(1, 1, 0), SolidCell::dry(materials::TNT));
    assert!(engine.ignite(&mut world, pos(0, 1, 0), &mut rng));

    let mut exploded = false;
    for _ in 0..300 {
        run_tick(&engine, &mut world, &mut rng);
        if world
            .events()
            .iter()
            .any(|event| *event == WorldEvent::Exploded { pos: pos(1, 1, 0) })
        {
            exploded = true;
            break;
        }
    }
    assert!(exploded, "fire never reached the detonable block");
    assert_eq!(world.content(pos(1, 1, 0)), CellContent::Empty);
}

/// Replay the event log, tracking which positions hold fire, and return the
/// set of positions that were cleared while holding something other than
/// fire (consumed fuel).
fn consumed_solids(initial_fires: &[GridPos], events: &[WorldEvent]) -> Vec<GridPos> {
    let mut fires: FxHashSet<GridPos> = initial_fires.iter().copied().collect();
    let mut consumed = Vec::new();
    for event in events {
        match event {
            WorldEvent::FirePlaced { pos, .. } => {
                fires.insert(*pos);
            }
            WorldEvent::CellCleared { pos } | WorldEvent::Exploded { pos } => {
                if !fires.remove(pos) {
                    consumed.push(*pos);
                }
            }
        }
    }
    consumed
}

#[test]
fn test_leave_fuel_policy_never_consumes_unignited_fuel() {
    init_tracing();
    let rules = quick_rules();
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::EMBER_ROCK, 3);
    world.mark_infinite_burn(materials::EMBER_ROCK);
    for x in 1..=3 {
        world.set_solid(pos(x, 1, 0), SolidCell::dry(materials::LEAVES));
    }
    assert!(engine.ignite(&mut world, pos(0, 1, 0), &mut rng));
    world.drain_events();

    let mut placed = FxHashSet::default();
    for _ in 0..400 {
        run_tick(&engine, &mut world, &mut rng);
    }
    for event in world.events() {
        if let WorldEvent::FirePlaced { pos: p, .. } = event {
            placed.insert(*p);
        }
    }

    assert!(
        consumed_solids(&[pos(0, 1, 0)], world.events()).is_empty(),
        "LeaveFuel must only ever clear fire cells"
    );
    // Sanity: the fire did spread somewhere.
    assert!(placed.len() > 1);
}

#[test]
fn test_consume_fuel_policy_scorches_fuel() {
    init_tracing();
    let rules = FireRules {
        failed_spread: FailedSpread::ConsumeFuel,
        ..quick_rules()
    };
    let table = FlammabilityTable::standard();
    let engine = SpreadEngine::new(&rules, &table).unwrap();

    let mut scorched = false;
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = MemoryWorld::new(32);
        fill_floor(&mut world, materials::EMBER_ROCK, 3);
        world.mark_infinite_burn(materials::EMBER_ROCK);
        for x in 1..=3 {
            world.set_solid(pos(x, 1, 0), SolidCell::dry(materials::LEAVES));
        }
        assert!(engine.ignite(&mut world, pos(0, 1, 0), &mut rng));
        world.drain_events();

        for _ in 0..400 {
            run_tick(&engine, &mut world, &mut rng);
        }
        if !consumed_solids(&[pos(0, 1, 0)], world.events()).is_empty() {
            scorched = true;
            break;
        }
    }
    assert!(
        scorched,
        "ConsumeFuel should destroy some fuel without igniting it"
    );
}

#[test]
fn test_planar_search_never_ignites_other_levels() {
    init_tracing();
    let mut table = FlammabilityTable::new();
    table.register(materials::LEAVES, 60, 0);

    let rules = FireRules {
        vertical_search: voxfire_core::VerticalSearch::Planar,
        vertical_adjacent_spread: false,
        ..quick_rules()
    };
    let engine = SpreadEngine::new(&rules, &table).unwrap();
    let mut rng = StdRng::seed_from_u64(17);

    let mut world = MemoryWorld::new(32);
    fill_floor(&mut world, materials::EMBER_ROCK, 3);
    world.mark_infinite_burn(materials::EMBER_ROCK);
    // Encourager one level up: reachable by the column search, invisible to
    // the planar one.
    world.set_solid(pos(1, 2, 1), SolidCell::dry(materials::LEAVES));
    assert!(engine.ignite(&mut world, pos(0, 1, 0), &mut rng));
    world.drain_events();

    for _ in 0..600 {
        run_tick(&engine, &mut world, &mut rng);
    }

    for event in world.events() {
        if let WorldEvent::FirePlaced { pos: placed, .. } = event {
            assert_eq!(placed.y, 1, "planar search ignited off-plane at {placed:?}");
        }
    }
}
