use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::{ConfigError, ScenarioConfig};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assemble the load series and print a per-day energy summary.
    Profile(ProfileArgs),

    /// Assemble the load series and dispatch the battery over it.
    Simulate(SimulateArgs),
}

/// Where the scenario comes from; `--scenario` and `--preset` are mutually exclusive.
#[derive(Clone, ClapArgs)]
pub struct ScenarioArgs {
    /// Load scenario from a TOML file.
    #[clap(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (household, household_large_battery, no_battery).
    #[clap(long)]
    pub preset: Option<String>,

    /// Override the directory holding the `<TYPE>.csv` profile tables.
    #[clap(long, env = "SLP_CATALOG_DIR")]
    pub catalog_dir: Option<PathBuf>,
}

impl ScenarioArgs {
    /// Resolves the scenario: `--scenario`, then `--preset`, then the household preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unreadable file or an unknown preset.
    pub fn load(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut cfg = match (&self.scenario, &self.preset) {
            (Some(path), _) => ScenarioConfig::from_toml_file(path)?,
            (None, Some(name)) => ScenarioConfig::from_preset(name)?,
            (None, None) => ScenarioConfig::household(),
        };
        if let Some(dir) = &self.catalog_dir {
            cfg.profile.catalog_dir.clone_from(dir);
        }
        Ok(cfg)
    }
}

#[derive(ClapArgs)]
pub struct ProfileArgs {
    #[clap(flatten)]
    pub scenario: ScenarioArgs,

    /// Export the assembled series to CSV.
    #[clap(long)]
    pub out: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct SimulateArgs {
    #[clap(flatten)]
    pub scenario: ScenarioArgs,

    /// Export step results to CSV.
    #[clap(long)]
    pub telemetry_out: Option<PathBuf>,

    /// Print every dispatch step.
    #[clap(long)]
    pub verbose_steps: bool,
}
