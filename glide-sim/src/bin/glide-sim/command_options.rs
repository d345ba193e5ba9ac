//! Command line option parsing.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use glide::math::{PositiveSign, ZeroOne};
use glide_sim::logging::LoggingArgs;
use glide_sim::{BuiltinScenario, OutputFormat, Scenario};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "glide-sim", author, about, version,
    next_display_order = None, // causes alphabetical sorting
)]
pub(crate) struct GlideSimArgs {
    /// Which built-in scenario to run.
    ///
    /// Mutually exclusive with --scenario-file.
    #[arg(value_enum, default_value = "glide")]
    pub(crate) scenario: BuiltinScenario,

    /// JSON file defining the scenario to run, or “-” to read standard input.
    #[arg(long = "scenario-file", value_name = "FILE", conflicts_with = "scenario")]
    pub(crate) scenario_file: Option<PathBuf>,

    /// Override the friction coefficient of the scenario: the fraction of velocity
    /// remaining after one second.
    #[arg(long = "friction", value_name = "F")]
    pub(crate) friction: Option<f64>,

    /// Override the threshold below which velocity is considered zero.
    #[arg(long = "rest-epsilon", value_name = "E")]
    pub(crate) rest_epsilon: Option<f64>,

    /// Override the time between samples, in seconds.
    #[arg(long = "time-step", value_name = "SECONDS")]
    pub(crate) time_step: Option<f64>,

    /// Override the length of time to simulate, in seconds.
    #[arg(long = "duration", value_name = "SECONDS")]
    pub(crate) duration: Option<f64>,

    /// Format of the samples written to stdout.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub(crate) format: OutputFormat,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

impl GlideSimArgs {
    /// Constructs the [`Scenario`] to run, by loading it or choosing a built-in scenario
    /// and then applying overrides.
    ///
    /// Returns an error if the file cannot be read or an override is out of range.
    pub(crate) fn scenario(&self) -> Result<Scenario, anyhow::Error> {
        let mut scenario = match &self.scenario_file {
            Some(path) => Scenario::load(path)?,
            None => self.scenario.scenario(),
        };

        if let Some(friction) = self.friction {
            scenario.friction = ZeroOne::try_from(friction).context("invalid --friction")?;
        }
        if let Some(rest_epsilon) = self.rest_epsilon {
            scenario.rest_epsilon =
                PositiveSign::try_from(rest_epsilon).context("invalid --rest-epsilon")?;
        }
        if let Some(time_step) = self.time_step {
            scenario.time_step = time_step;
        }
        if let Some(duration) = self.duration {
            scenario.duration = duration;
        }

        Ok(scenario)
    }
}
