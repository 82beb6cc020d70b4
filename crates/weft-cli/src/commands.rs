//! CLI command implementations.

use weft_bench::metrics::BenchmarkMetrics;
use weft_bench::runner::BenchmarkRunner;
use weft_bench::scenarios::{Scenario, ScenarioKind};
use weft_cloth::ClothParameters;
use weft_debug::hooks::{InspectionHook, TelemetryHook};
use weft_debug::snapshot::StateSnapshot;
use weft_telemetry::{EventBus, TracingSink};
use weft_types::WeftError;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub struct RunArgs<'a> {
    pub scenario: &'a str,
    pub scene: Option<&'a str>,
    pub frames: Option<u32>,
    pub params: Option<&'a str>,
    pub snapshot: Option<&'a str>,
}

fn load_params(path: &str) -> Result<ClothParameters, WeftError> {
    let content = std::fs::read_to_string(path)?;
    let params: ClothParameters =
        toml::from_str(&content).map_err(|e| WeftError::InvalidConfig(e.to_string()))?;
    params.validate()?;
    tracing::debug!(path, ?params, "loaded cloth parameters");
    Ok(params)
}

/// Simulate one scene, streaming telemetry through `tracing`.
pub fn run(args: RunArgs<'_>) -> CmdResult {
    let mut scenario = match args.scene {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::from_kind(args.scenario.parse::<ScenarioKind>()?),
    };
    if let Some(frames) = args.frames {
        scenario.frames = frames;
    }
    if let Some(path) = args.params {
        scenario.params = load_params(path)?;
    }

    println!("weft run");
    println!("────────");
    println!("Scene:     {}", scenario.name);
    println!(
        "Grid:      {}x{} ({:?}, {} pinned)",
        scenario.grid.num_width_points,
        scenario.grid.num_height_points,
        scenario.grid.orientation,
        scenario.grid.pinned.len()
    );
    println!(
        "Frames:    {} x {} substeps ({:.2}s)",
        scenario.frames,
        scenario.step.substeps_per_frame,
        scenario.duration()
    );
    println!("Bodies:    {}", scenario.colliders.len());
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    let mut telemetry = TelemetryHook::new();

    let outcome = {
        let mut hooks: [&mut dyn InspectionHook; 1] = [&mut telemetry];
        BenchmarkRunner::run_with_hooks(&scenario, &mut hooks)?
    };
    telemetry.forward_to(&bus);
    bus.finish();

    let metrics = &outcome.metrics;
    println!("  Wall time:     {:.3}s", metrics.total_wall_time);
    println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
    println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
    println!("  Max displace:  {:.4}m", metrics.max_displacement);
    println!("  Max strain:    {:.4}", metrics.max_strain);

    if let Some(path) = args.snapshot {
        let snapshot =
            StateSnapshot::capture(&outcome.cloth, scenario.frames as u64, scenario.duration());
        snapshot.write_to(path)?;
        println!();
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Run built-in scenes and emit CSV.
pub fn benchmark(scenario_name: &str, frames: Option<u32>, output_path: Option<&str>) -> CmdResult {
    println!("weft benchmark");
    println!("══════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse()?]
    };

    let mut all_metrics = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(frames) = frames {
            scenario.frames = frames;
        }

        println!(
            "Running: {} ({} points, {} frames)",
            kind,
            scenario.grid.point_count(),
            scenario.frames
        );
        let metrics = BenchmarkRunner::run(&scenario)?;
        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

fn fmt_point([x, y, z]: [f32; 3]) -> String {
    format!("({x:.4}, {y:.4}, {z:.4})")
}

/// Print summary statistics of a snapshot.
pub fn inspect(path: &str) -> CmdResult {
    println!("weft snapshot inspector");
    println!("───────────────────────");
    println!();

    let snapshot = StateSnapshot::read_from(path)?;
    let summary = snapshot.summary();

    println!("Frame:        {}", snapshot.timestep);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!(
        "Grid:         {}x{} ({:?})",
        snapshot.grid.num_width_points, snapshot.grid.num_height_points, snapshot.grid.orientation
    );
    println!("Points:       {} ({} pinned)", summary.point_count, summary.pinned_count);
    println!("Bounds min:   {}", fmt_point(summary.bounds_min.to_array()));
    println!("Bounds max:   {}", fmt_point(summary.bounds_max.to_array()));
    println!("Centroid:     {}", fmt_point(summary.centroid.to_array()));
    println!("Last move:    {:.6}m", summary.max_step_displacement);
    if !summary.all_finite {
        println!("⚠ snapshot contains non-finite positions");
    }

    Ok(())
}

/// Validate a scene file (has a `[grid]` table) or a cloth-parameter file.
pub fn validate(path: &str) -> CmdResult {
    println!("weft validator");
    println!("──────────────");
    println!();

    if !path.ends_with(".toml") {
        return Err(format!("unsupported file '{path}', expected a .toml file").into());
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)?;
    if table.contains_key("grid") {
        let scenario = Scenario::from_toml_str(&content)?;
        println!(
            "✅ Scene '{}' is valid ({} points, {} bodies, {} frames).",
            scenario.name,
            scenario.grid.point_count(),
            scenario.colliders.len(),
            scenario.frames
        );
    } else {
        let params = load_params(path)?;
        println!("✅ Cloth parameters are valid.");
        println!("{}", serde_json::to_string_pretty(&params)?);
    }

    Ok(())
}
