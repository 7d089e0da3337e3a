//! Microgrid simulator entry point — CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use microgrid_sim::config::{ProfileConfig, ScenarioConfig};
use microgrid_sim::io::export::export_csv;
use microgrid_sim::sim::battery::Battery;
use microgrid_sim::sim::engine::Engine;
use microgrid_sim::sim::pid::PidController;
use microgrid_sim::sim::report::SummaryReport;
use microgrid_sim::sim::types::{DemandSampling, SimConfig};
use microgrid_sim::sources::{CyclicProfile, MainGrid};

/// Seed offsets keep the per-component RNG streams uncorrelated while all
/// deriving from the single scenario seed.
const SOLAR_SEED_OFFSET: u64 = 11;
const WIND_SEED_OFFSET: u64 = 23;
const LOAD_SEED_OFFSET: u64 = 37;
const GRID_SEED_OFFSET: u64 = 57;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    hours_override: Option<usize>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("microgrid-sim — hour-by-hour microgrid energy-balance simulator");
    eprintln!();
    eprintln!("Usage: microgrid-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, high_wind, deficit_stress)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --hours <n>              Override simulation duration in hours");
    eprintln!("  --telemetry-out <path>   Export the hourly log to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        hours_override: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--hours" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --hours requires an integer argument");
                    process::exit(1);
                }
                if let Ok(h) = args[i].parse::<usize>() {
                    cli.hours_override = Some(h);
                } else {
                    eprintln!("error: --hours value \"{}\" is not a valid integer", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds a profile from its config: explicit values when present, otherwise
/// seeded uniform draws from the bounds.
fn build_profile(cfg: &ProfileConfig, hours_per_cycle: usize, seed: u64) -> CyclicProfile {
    match &cfg.values {
        Some(values) => CyclicProfile::new(values.clone(), hours_per_cycle),
        None => CyclicProfile::uniform(cfg.min_kw, cfg.max_kw, hours_per_cycle, seed),
    }
}

/// Wires a validated scenario into a ready-to-run engine.
fn build_engine(cfg: &ScenarioConfig) -> Engine {
    let s = &cfg.simulation;
    let sampling = if s.demand_sampling == "per_hour" {
        DemandSampling::PerHour
    } else {
        DemandSampling::PerCall
    };
    let sim_config = SimConfig::new(s.hours_per_cycle, sampling);

    let solar = build_profile(&cfg.solar, s.hours_per_cycle, s.seed.wrapping_add(SOLAR_SEED_OFFSET));
    let wind = build_profile(&cfg.wind, s.hours_per_cycle, s.seed.wrapping_add(WIND_SEED_OFFSET));
    let load = build_profile(&cfg.load, s.hours_per_cycle, s.seed.wrapping_add(LOAD_SEED_OFFSET));

    let grid = MainGrid::new(
        cfg.grid.min_kw,
        cfg.grid.max_kw,
        s.seed.wrapping_add(GRID_SEED_OFFSET),
    );

    let pid = PidController::new(cfg.pid.kp, cfg.pid.ki, cfg.pid.kd);

    let bat = &cfg.battery;
    let mut battery = Battery::new(
        bat.capacity_kwh,
        bat.charge_rate,
        bat.discharge_rate,
        bat.charge_threshold,
        bat.discharge_threshold,
    );
    if let (Some(floor), Some(ceiling)) = (bat.threshold_floor, bat.threshold_ceiling) {
        battery = battery.with_threshold_bounds(floor, ceiling);
    }

    Engine::new(sim_config, solar, wind, load, grid, pid, battery)
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(hours) = cli.hours_override {
        scenario.simulation.duration_hours = hours;
    }

    // Configuration errors are fatal and reported before any step runs.
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mut engine = build_engine(&scenario);
    let records = engine.run(scenario.simulation.duration_hours).to_vec();

    // Per-hour status lines
    for r in &records {
        println!("{r}");
    }

    let report = SummaryReport::from_records(&records);
    println!("\n{report}");

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
