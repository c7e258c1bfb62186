//! Headless fire-spread demo: a fuel line on an inert floor, driven by the
//! scheduler loop and printed as a top-down ASCII snapshot.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use voxfire_core::{
    materials, AgeIncrement, CellContent, Difficulty, FailedSpread, FireRules, FireWorld,
    FlammabilityTable, GridPos, MemoryWorld, SolidCell, SpreadEngine, TickDelay, VerticalSearch,
    WorldEvent,
};

/// Voxel fire-spread demo with configurable rule policies
#[derive(Parser, Debug)]
#[command(name = "voxfire-demo")]
#[command(about = "Headless voxel fire-spread demo", long_about = None)]
struct Args {
    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 400)]
    ticks: u64,

    /// Random seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Length of the fuel line
    #[arg(short, long, default_value_t = 8)]
    line: i32,

    /// Fixed re-arm delay in ticks
    #[arg(long, default_value_t = 2)]
    delay: u32,

    /// Let it rain
    #[arg(long)]
    rain: bool,

    /// Difficulty (peaceful, easy, normal, hard)
    #[arg(short, long, default_value = "normal", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Consume fuel on failed ignition attempts instead of leaving it
    #[arg(long)]
    consume: bool,

    /// Restrict the air-ignition search to the fire's own plane
    #[arg(long)]
    planar: bool,

    /// Run this many seeds in parallel and report how often the fire
    /// crossed the whole line (0 = single verbose run)
    #[arg(short, long, default_value_t = 0)]
    batches: u64,
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value.to_ascii_lowercase().as_str() {
        "peaceful" => Ok(Difficulty::Peaceful),
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        other => Err(format!(
            "unknown difficulty '{other}' (expected peaceful, easy, normal, hard)"
        )),
    }
}

fn rules_from(args: &Args) -> FireRules {
    FireRules {
        tick_delay: TickDelay::Fixed(args.delay),
        age_increment: AgeIncrement::Randomized,
        failed_spread: if args.consume {
            FailedSpread::ConsumeFuel
        } else {
            FailedSpread::LeaveFuel
        },
        vertical_search: if args.planar {
            VerticalSearch::Planar
        } else {
            VerticalSearch::Column { below: 1, above: 4 }
        },
        ..FireRules::default()
    }
}

/// Stone floor with a grass fuel line extending east from the fire.
fn build_scene(args: &Args) -> MemoryWorld {
    let mut world = MemoryWorld::new(48);
    world.raining = args.rain;
    world.difficulty_setting = args.difficulty;
    for x in -2..=args.line + 3 {
        for z in -3..=3 {
            world.set_solid(GridPos::new(x, 0, z), SolidCell::dry(materials::STONE));
        }
    }
    for x in 1..=args.line {
        world.set_solid(GridPos::new(x, 1, 0), SolidCell::dry(materials::TALL_GRASS));
    }
    world
}

struct RunOutcome {
    reached_at: Option<u64>,
    ignitions: u64,
    clears: u64,
}

fn run_once(args: &Args, seed: u64) -> RunOutcome {
    let rules = rules_from(args);
    let table = FlammabilityTable::standard();
    let engine = match SpreadEngine::new(&rules, &table) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            std::process::exit(2);
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = build_scene(args);
    engine.ignite(&mut world, GridPos::new(0, 1, 0), &mut rng);

    let far = GridPos::new(args.line, 1, 0);
    let mut reached_at = None;
    for tick in 1..=args.ticks {
        for due in world.advance_tick() {
            engine.tick(&mut world, due, &mut rng);
        }
        if reached_at.is_none() && world.fire_state(far).is_some() {
            reached_at = Some(tick);
        }
    }

    let mut ignitions = 0;
    let mut clears = 0;
    for event in world.events() {
        match event {
            WorldEvent::FirePlaced { age: 0, .. } => ignitions += 1,
            WorldEvent::FirePlaced { .. } => {}
            WorldEvent::CellCleared { .. } | WorldEvent::Exploded { .. } => clears += 1,
        }
    }

    if args.batches == 0 {
        print_snapshot(&world, args.line);
    }
    RunOutcome {
        reached_at,
        ignitions,
        clears,
    }
}

/// Top-down view of the y=1 layer.
fn print_snapshot(world: &MemoryWorld, line: i32) {
    println!("top-down snapshot (y = 1):");
    for z in -3..=3 {
        let mut row = String::new();
        for x in -2..=line + 3 {
            let glyph = match world.content(GridPos::new(x, 1, z)) {
                CellContent::Empty => '.',
                CellContent::Fire(_) => 'F',
                CellContent::Solid(cell) if cell.material == materials::TALL_GRASS => '#',
                CellContent::Solid(_) => '+',
            };
            row.push(glyph);
        }
        println!("  {row}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.batches > 0 {
        let outcomes: Vec<RunOutcome> = (0..args.batches)
            .into_par_iter()
            .map(|seed| run_once(&args, args.seed.wrapping_add(seed)))
            .collect();
        let reached = outcomes.iter().filter(|o| o.reached_at.is_some()).count();
        let mean_ticks: f64 = outcomes
            .iter()
            .filter_map(|o| o.reached_at)
            .map(|t| t as f64)
            .sum::<f64>()
            / reached.max(1) as f64;
        println!(
            "{reached}/{} runs crossed the {}-cell line within {} ticks",
            args.batches, args.line, args.ticks
        );
        if reached > 0 {
            println!("mean crossing tick: {mean_ticks:.1}");
        }
    } else {
        let outcome = run_once(&args, args.seed);
        match outcome.reached_at {
            Some(tick) => println!("fire crossed the line at tick {tick}"),
            None => println!("fire did not cross the line"),
        }
        println!(
            "{} ignitions, {} cells cleared over {} ticks",
            outcome.ignitions, outcome.clears, args.ticks
        );
    }
}
