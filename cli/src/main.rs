//! Command-line front end for the gym disorder simulator
//!
//! Runs a batch of simulated days, prints the summary statistics, the
//! outcome distribution and a sensitivity sweep over the share of
//! disorganized gym-goers.

use clap::Parser;
use gym_disorder_core::stats::histogram::DEFAULT_BINS;
use gym_disorder_core::{
    sensitivity_sweep, Histogram, RackConfig, RunReport, SimulationConfig, SimulationError,
    SweepPoint, TrialRunner,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

mod render;

#[derive(Parser, Debug)]
#[command(name = "gym-disorder")]
#[command(about = "Monte Carlo simulation of dumbbell rack disorder")]
struct Args {
    /// Number of simulated days
    #[arg(short, long, default_value = "1000")]
    trials: usize,

    /// Total gym-goers per day
    #[arg(short, long, default_value = "100")]
    people: usize,

    /// How many of them are disorganized
    #[arg(short, long, default_value = "30")]
    disorganized: usize,

    /// JSON rack file mapping weight to unit count (default: standard rack)
    #[arg(short, long)]
    rack: Option<PathBuf>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Spread trials across all cores
    #[arg(long)]
    parallel: bool,

    /// Histogram bins
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,

    /// Skip the sensitivity sweep
    #[arg(long)]
    no_sweep: bool,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput {
    report: RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    sweep: Option<Vec<SweepPoint>>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimulationError> {
    let rack = load_rack(args.rack.as_deref())?;

    if args.disorganized > args.people {
        return Err(SimulationError::InvalidConfiguration(format!(
            "disorganized ({}) cannot exceed people ({})",
            args.disorganized, args.people
        )));
    }

    let config = SimulationConfig {
        rack: rack.clone(),
        organized_count: args.people - args.disorganized,
        disorganized_count: args.disorganized,
        trial_count: args.trials,
        rng_seed: args.seed,
    };

    let runner = TrialRunner::new(config.clone())?;

    let start = Instant::now();
    let summary = if args.parallel {
        runner.run_many_trials_parallel()?
    } else {
        runner.run_many_trials()?
    };
    info!("simulations finished in {:.2}s", start.elapsed().as_secs_f64());

    let report = RunReport::new(config, runner.master_seed(), summary)?;

    let sweep = if args.no_sweep {
        None
    } else {
        let start = Instant::now();
        let points = sensitivity_sweep(
            &rack,
            runner.config().total_people(),
            args.trials,
            Some(runner.master_seed()),
        )?;
        info!("sensitivity sweep finished in {:.2}s", start.elapsed().as_secs_f64());
        Some(points)
    };

    if args.json {
        let output = JsonOutput { report, sweep };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| SimulationError::Serialization(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    print!("{}", render::summary(&report));
    println!();
    print!(
        "{}",
        render::histogram(&Histogram::from_outcomes(&report.summary.outcomes, args.bins))
    );
    if let Some(points) = sweep {
        println!();
        print!("{}", render::sweep(&points));
    }

    Ok(())
}

fn load_rack(path: Option<&std::path::Path>) -> Result<RackConfig, SimulationError> {
    let Some(path) = path else {
        return Ok(RackConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|e| {
        SimulationError::InvalidConfiguration(format!("cannot read {}: {}", path.display(), e))
    })?;
    RackConfig::from_json(&text).map_err(SimulationError::InvalidConfiguration)
}
