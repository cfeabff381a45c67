//! slp-sim entry point: CLI wiring, logging, and scenario runs.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use slp_sim::cli::{Args, Command, ProfileArgs, SimulateArgs};
use slp_sim::io::export::{export_series_csv, export_steps_csv};
use slp_sim::runner::{RunError, assemble_series, load_catalog, run_scenario};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();

    let result = match Args::parse().command {
        Command::Profile(args) => profile(&args),
        Command::Simulate(args) => simulate(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn profile(args: &ProfileArgs) -> Result<(), RunError> {
    let cfg = args.scenario.load().map_err(|e| RunError::Config(vec![e]))?;
    let catalog = load_catalog(&cfg)?;
    let series = assemble_series(&cfg, &catalog)?;

    for (day, kwh) in series.daily_energy_kwh() {
        println!("{day}  {kwh:>8.3} kWh");
    }
    println!();
    println!("Points:       {}", series.len());
    println!("Total energy: {:.2} kWh", series.total_energy_kwh());
    if let Some(peak) = series.peak() {
        println!(
            "Peak:         {:.1} W at {}",
            peak.watts,
            peak.timestamp.format("%Y-%m-%d %H:%M")
        );
    }

    if let Some(path) = &args.out {
        export_series_csv(&series, path).map_err(slp_sim::ProfileError::from)?;
        info!(path = %path.display(), "load series written");
    }
    Ok(())
}

fn simulate(args: &SimulateArgs) -> Result<(), RunError> {
    let cfg = args.scenario.load().map_err(|e| RunError::Config(vec![e]))?;
    let catalog = load_catalog(&cfg)?;
    let result = run_scenario(&cfg, &catalog)?;

    if args.verbose_steps {
        for r in &result.steps {
            println!("{r}");
        }
        println!();
    }
    println!("{}", result.kpi);

    if let Some(path) = &args.telemetry_out {
        export_steps_csv(&result.steps, path).map_err(slp_sim::ProfileError::from)?;
        info!(path = %path.display(), "telemetry written");
    }
    Ok(())
}
