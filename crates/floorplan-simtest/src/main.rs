//! Floor Plan Headless Harness
//!
//! Validates the pure planning pipeline and exports render-ready scenes.
//! Runs entirely in-process unless `--prompt` is given.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose
//!   cargo run -p floorplan-simtest -- --input rooms.json --out scene.json
//!   cargo run -p floorplan-simtest -- --prompt "3 bedrooms, east facing, 2 floors"

use std::path::PathBuf;

use floorplan_logic::adjacency::{are_adjacent, WallSide};
use floorplan_logic::building::{plan_building, plan_from_text, render_scene};
use floorplan_logic::config::{validate_config, FloorPacking, PlannerConfig};
use floorplan_logic::geometry::{errors_only, validate_building};
use floorplan_logic::palette::is_palette_color;
use floorplan_logic::room::{parse_raw_rooms, validate_rooms, RawRoom, RoomSpec};
use floorplan_upstream::{generate, FixedSource, MessagesClient, RoomSource, UpstreamConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

// ── Sample room list (same shape the upstream service returns) ─────────
const SAMPLE_ROOMS_JSON: &str = include_str!("../../../data/sample_rooms.json");

// ── Command line ────────────────────────────────────────────────────────

struct Args {
    verbose: bool,
    seed: u64,
    input: Option<PathBuf>,
    prompt: Option<String>,
    config: Option<PathBuf>,
    out: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        seed: 42,
        input: None,
        prompt: None,
        config: None,
        out: PathBuf::from("floor_plan_scene.json"),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--seed" => {
                let v = value("--seed")?;
                args.seed = v.parse().map_err(|_| format!("bad seed: {}", v))?;
            }
            "--input" => args.input = Some(PathBuf::from(value("--input")?)),
            "--prompt" => args.prompt = Some(value("--prompt")?),
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--out" => args.out = PathBuf::from(value("--out")?),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let config = match load_config(args.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let code = if args.input.is_some() || args.prompt.is_some() {
        run_generation(&args, &config)
    } else {
        run_harness(&args, &config)
    };
    std::process::exit(code);
}

fn load_config(path: Option<&PathBuf>) -> Result<PlannerConfig, String> {
    let config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .map_err(|e| format!("cannot read {}: {}", p.display(), e))?;
            serde_json::from_str(&text).map_err(|e| format!("bad config: {}", e))?
        }
        None => PlannerConfig::default(),
    };
    let errors = validate_config(&config);
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(format!("invalid config: {}", messages.join("; ")));
    }
    Ok(config)
}

// ── Generation mode ─────────────────────────────────────────────────────

fn run_generation(args: &Args, config: &PlannerConfig) -> i32 {
    let source: Box<dyn RoomSource> = if let Some(path) = &args.input {
        match std::fs::read_to_string(path) {
            Ok(text) => Box::new(FixedSource::new(text)),
            Err(e) => {
                eprintln!("cannot read {}: {}", path.display(), e);
                return 2;
            }
        }
    } else {
        match UpstreamConfig::from_env().and_then(MessagesClient::new) {
            Ok(client) => Box::new(client),
            Err(e) => {
                eprintln!("Error in generating floor plan parameters: {}", e);
                return 1;
            }
        }
    };

    let requirements = args.prompt.as_deref().unwrap_or("");
    let mut rng = StdRng::seed_from_u64(args.seed);
    let report = generate(source.as_ref(), requirements, config, &mut rng);
    if !report.is_ok() {
        eprintln!("{:?}", report.status);
        return 1;
    }

    let building = &report.building;
    let scene = render_scene(building, config);
    println!("Floor plan generated successfully!");
    println!("{}", scene.title);
    for (floor, layout) in &building.layouts {
        println!("  Floor {}:", floor);
        for r in &layout.rooms {
            println!(
                "    {:<20} ({:>5.1}, {:>5.1})  {}m x {}m  {}",
                r.name, r.x, r.y, r.dx, r.dy, r.color
            );
        }
    }
    println!(
        "  {} doors, {} windows",
        building.doors.len(),
        building.windows.len()
    );

    let warnings = validate_building(building, config.max_dimension);
    if args.verbose {
        for w in &warnings {
            println!("  ! [{}] {}", w.category, w.message);
        }
    }

    let json = match serde_json::to_string_pretty(&scene) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("cannot serialize scene: {}", e);
            return 1;
        }
    };
    if let Err(e) = std::fs::write(&args.out, json) {
        eprintln!("cannot write {}: {}", args.out.display(), e);
        return 1;
    }
    println!("Scene saved as '{}'", args.out.display());
    0
}

// ── Harness mode ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn run_harness(args: &Args, config: &PlannerConfig) -> i32 {
    println!("=== Floor Plan Harness ===\n");

    let mut results = Vec::new();

    // 1. Sample room list
    results.extend(validate_sample_rooms(config, args.seed, args.verbose));

    // 2. Packing sweep over random programs
    results.extend(validate_packing_sweep(config, args.seed, args.verbose));

    // 3. Doors and windows on a known layout
    results.extend(validate_openings(config));

    // 4. Scene emission
    results.extend(validate_scene(config, args.seed, args.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        1
    } else {
        0
    }
}

// ── 1. Sample Rooms ─────────────────────────────────────────────────────

fn validate_sample_rooms(config: &PlannerConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Rooms ---");
    let mut results = Vec::new();

    let raw: Vec<RawRoom> = match parse_raw_rooms(SAMPLE_ROOMS_JSON) {
        Ok(r) => r,
        Err(e) => {
            results.push(check("sample_parse", false, format!("{}", e)));
            return results;
        }
    };
    results.push(check(
        "sample_not_empty",
        !raw.is_empty(),
        format!("{} rooms", raw.len()),
    ));

    let mut rng = StdRng::seed_from_u64(seed);
    let rooms = validate_rooms(&raw, config, &mut rng);
    let bad_colors: Vec<&str> = rooms
        .iter()
        .filter(|r| !is_palette_color(&r.color))
        .map(|r| r.name.as_str())
        .collect();
    results.push(check(
        "sample_colors_in_palette",
        bad_colors.is_empty(),
        format!("{} rooms outside palette", bad_colors.len()),
    ));

    let again: Vec<RawRoom> = rooms.iter().map(RawRoom::from).collect();
    let twice = validate_rooms(&again, config, &mut rng);
    results.push(check(
        "sample_validation_idempotent",
        twice == rooms,
        "validate(validate(x)) == validate(x)".into(),
    ));

    let building = plan_building(&rooms, config);
    let floors = raw.iter().map(|r| r.floor.unwrap_or(0)).max().unwrap_or(0) + 1;
    results.push(check(
        "sample_floor_count",
        building.floor_count() == floors,
        format!("{} floors", building.floor_count()),
    ));

    if verbose {
        for (floor, layout) in &building.layouts {
            let (w, h) = layout.bounds();
            println!(
                "  floor {}: {} rooms, {:.1}×{:.1}m, utilization {:.0}%",
                floor,
                layout.rooms.len(),
                w,
                h,
                layout.utilization() * 100.0
            );
        }
    }

    results
}

// ── 2. Packing Sweep ────────────────────────────────────────────────────

fn random_rooms(rng: &mut StdRng, n: usize) -> Vec<RoomSpec> {
    (0..n)
        .map(|i| RoomSpec {
            name: format!("R{}", i),
            x: 0.0,
            y: 0.0,
            dx: rng.gen_range(1.0..10.0),
            dy: rng.gen_range(1.0..10.0),
            color: "grey".into(),
            floor: rng.gen_range(0..3),
        })
        .collect()
}

fn validate_packing_sweep(config: &PlannerConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Packing Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    for packing in [FloorPacking::PerFloor, FloorPacking::Shared] {
        let config = PlannerConfig {
            floor_packing: packing,
            ..config.clone()
        };
        let mut error_count = 0;
        let mut worst_util = 1.0_f32;
        for _ in 0..200 {
            let n = rng.gen_range(1..40);
            let building = plan_building(&random_rooms(&mut rng, n), &config);
            let all = validate_building(&building, config.max_dimension);
            error_count += errors_only(&all).len();
            for layout in building.layouts.values() {
                worst_util = worst_util.min(layout.utilization());
            }
        }
        results.push(check(
            &format!("sweep_{:?}_no_errors", packing),
            error_count == 0,
            format!("{} geometry errors over 200 programs", error_count),
        ));
        if verbose {
            println!("  {:?}: worst utilization {:.0}%", packing, worst_util * 100.0);
        }
    }

    results
}

// ── 3. Openings ─────────────────────────────────────────────────────────

fn validate_openings(config: &PlannerConfig) -> Vec<TestResult> {
    println!("--- Doors & Windows ---");
    let mut results = Vec::new();

    let text = r#"[{"name": "Hall", "dx": 4, "dy": 5}, {"name": "Kitchen", "dx": 3, "dy": 3}]"#;
    let mut rng = StdRng::seed_from_u64(0);
    let building = match plan_from_text(text, config, &mut rng) {
        Ok(b) => b,
        Err(e) => {
            results.push(check("openings_plan", false, e.to_string()));
            return results;
        }
    };

    let layout = building.layout(0);
    let positions: Vec<(f32, f32)> = layout
        .map(|l| l.rooms.iter().map(|r| (r.x, r.y)).collect())
        .unwrap_or_default();
    results.push(check(
        "hall_kitchen_positions",
        positions == vec![(0.0, 0.0), (0.0, 5.0)],
        format!("{:?}", positions),
    ));

    let adjacent = layout
        .filter(|l| l.rooms.len() == 2)
        .map(|l| {
            let (a, b) = (&l.rooms[0], &l.rooms[1]);
            are_adjacent(a, b) && are_adjacent(b, a)
        })
        .unwrap_or(false);
    results.push(check(
        "hall_kitchen_adjacent",
        adjacent && building.doors.len() == 1,
        format!("{} doors", building.doors.len()),
    ));

    let hall_sides: Vec<WallSide> = building
        .windows
        .iter()
        .filter(|w| w.room == 0)
        .map(|w| w.side)
        .collect();
    results.push(check(
        "hall_two_windows",
        hall_sides == vec![WallSide::West, WallSide::South],
        format!("{:?}", hall_sides),
    ));

    results
}

// ── 4. Scene ────────────────────────────────────────────────────────────

fn validate_scene(config: &PlannerConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Scene ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(seed);
    let report = generate(
        &FixedSource::new(SAMPLE_ROOMS_JSON),
        "sample",
        config,
        &mut rng,
    );
    results.push(check(
        "scene_generation_ok",
        report.is_ok(),
        format!("{:?}", report.status),
    ));

    let scene = render_scene(&report.building, config);
    let box_count: usize = scene.floors.iter().map(|f| f.rooms.len()).sum();
    results.push(check(
        "scene_one_box_per_room",
        box_count == report.building.room_count(),
        format!("{} boxes", box_count),
    ));

    let stacked = scene.floors.iter().enumerate().all(|(i, f)| {
        let expected = i as f32 * config.floor_height;
        (f.base_z - expected).abs() < 1e-4
            && f.rooms.iter().all(|b| (b.z[0] - expected).abs() < 1e-4)
    });
    results.push(check(
        "scene_floors_stacked",
        stacked,
        format!("{} floors", scene.floors.len()),
    ));

    let flat = scene
        .top_view
        .rooms
        .iter()
        .all(|b| b.z.iter().all(|z| *z == 0.0));
    results.push(check("scene_top_view_flat", flat, scene.title.clone()));

    match serde_json::to_string(&scene) {
        Ok(json) => {
            if verbose {
                println!("  scene JSON: {} bytes", json.len());
            }
            results.push(check("scene_serializes", true, format!("{} bytes", json.len())));
        }
        Err(e) => results.push(check("scene_serializes", false, e.to_string())),
    }

    results
}
