//! Scenario wiring: catalog loading, assembly, and dispatch for one run.

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, ScenarioConfig};
use crate::error::ProfileError;
use crate::profile::{InMemoryCatalog, LoadSeries, ProfileAssembler, ProfileCatalog};
use crate::sim::controller::{Controller, IdleController, PeakShavingController};
use crate::sim::engine::Engine;
use crate::sim::kpi::KpiReport;
use crate::sim::types::StepResult;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid scenario:\n{}", format_config_errors(.0))]
    Config(Vec<ConfigError>),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Results of one dispatch run.
pub struct SimulationResult {
    pub series: LoadSeries,
    pub steps: Vec<StepResult>,
    pub kpi: KpiReport,
}

/// Validates the scenario and loads its catalog directory.
///
/// # Errors
///
/// Returns [`RunError::Config`] with every validation error, or the catalog error.
pub fn load_catalog(config: &ScenarioConfig) -> Result<InMemoryCatalog, RunError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(RunError::Config(errors));
    }
    let catalog = InMemoryCatalog::from_dir(&config.profile.catalog_dir)?;
    info!(
        dir = %config.profile.catalog_dir.display(),
        types = catalog.profile_types().count(),
        "loaded profile catalog"
    );
    Ok(catalog)
}

/// Assembles the configured load series from `catalog`.
///
/// # Errors
///
/// Returns the assembly error (invalid range, missing profile).
pub fn assemble_series<C: ProfileCatalog + ?Sized>(
    config: &ScenarioConfig,
    catalog: &C,
) -> Result<LoadSeries, RunError> {
    let assembler = ProfileAssembler::with_holidays(config.holiday_calendar());
    let series = assembler.assemble(
        catalog,
        config.profile.from,
        config.profile.to,
        &config.profile_type(),
        config.dynamize(),
    )?;
    Ok(series)
}

/// Assembles the series and dispatches the configured battery over it.
///
/// # Errors
///
/// Returns validation, assembly, or battery errors.
pub fn run_scenario<C: ProfileCatalog + ?Sized>(
    config: &ScenarioConfig,
    catalog: &C,
) -> Result<SimulationResult, RunError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(RunError::Config(errors));
    }

    let series = assemble_series(config, catalog)?;
    let battery = config.build_battery()?;

    let (steps, capacity) = if config.dispatch.strategy == "idle" {
        dispatch(Engine::new(battery, IdleController), &series)?
    } else {
        let controller = PeakShavingController::new(config.dispatch.threshold_w);
        dispatch(Engine::new(battery, controller), &series)?
    };

    let kpi = KpiReport::from_results(&steps, LoadSeries::step_hours(), capacity);
    Ok(SimulationResult { series, steps, kpi })
}

fn dispatch<C: Controller>(
    mut engine: Engine<C>,
    series: &LoadSeries,
) -> Result<(Vec<StepResult>, f64), ProfileError> {
    let steps = engine.run(series)?;
    Ok((steps, engine.battery().capacity_kwh()))
}
