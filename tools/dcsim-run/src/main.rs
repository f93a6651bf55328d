use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;
use env_logger::Builder;
use serde::Serialize;

use dcsim_facility::model::failures::FailureEvent;
use dcsim_facility::{build, inject_failure, step, FailureInjector, History, ScenarioParams, SimulationMetrics};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Runs hourly simulation of a GPU facility
struct Args {
    /// Path to YAML file with scenario parameters
    #[arg(short, long)]
    config: PathBuf,

    /// Number of time steps to simulate
    #[arg(short, long, default_value_t = 24)]
    steps: u32,

    /// Failure scenario to inject before the given step, e.g. rack_failure@6 (can be repeated)
    #[arg(short, long, value_parser = parse_failure)]
    failure: Vec<(String, u32)>,

    /// Seed used to generate failure ids
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Path to produced JSON file with simulation results (printed to stdout if not set)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_failure(s: &str) -> Result<(String, u32), String> {
    let (key, step) = s
        .split_once('@')
        .ok_or_else(|| format!("expected <scenario>@<step>, got {}", s))?;
    let step = step.parse::<u32>().map_err(|e| format!("invalid step {}: {}", step, e))?;
    Ok((key.to_string(), step))
}

#[derive(Serialize)]
struct Results {
    scenario: ScenarioParams,
    steps: u32,
    end_time: NaiveDateTime,
    metrics: SimulationMetrics,
    active_failures: Vec<FailureEvent>,
    history: History,
}

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    let params = ScenarioParams::from_file(&args.config.to_string_lossy())?;
    let mut state = build(&params)?;

    let mut schedule: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for (key, at) in args.failure.iter() {
        schedule.entry(*at).or_default().push(key.clone());
    }
    let mut injector = FailureInjector::new(args.seed);
    for i in 0..args.steps {
        for key in schedule.get(&i).into_iter().flatten() {
            for event in injector.scenario_events(key, state.current_time)? {
                state = inject_failure(&state, event);
            }
        }
        state = step(&state);
    }
    log::info!(
        "finished {} steps: PUE {:.3}, cumulative cost ${:.2}, cumulative carbon {:.1} kg",
        args.steps,
        state.metrics.pue,
        state.metrics.cumulative_cost_usd,
        state.metrics.cumulative_carbon_kg
    );

    let results = Results {
        scenario: params,
        steps: args.steps,
        end_time: state.current_time,
        metrics: state.metrics,
        active_failures: state.active_failures,
        history: state.history,
    };
    let json = serde_json::to_string_pretty(&results)?;
    match args.output {
        Some(path) => std::fs::File::create(path)?.write_all(json.as_bytes())?,
        None => println!("{}", json),
    }
    Ok(())
}
