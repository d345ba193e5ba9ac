//! Binary for replaying inertial motion scenarios.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::io;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser as _;

use glide_sim::{logging, run, write_samples};

mod command_options;
use command_options::GlideSimArgs;

fn main() -> Result<(), anyhow::Error> {
    let options = GlideSimArgs::parse();
    logging::install(&options.logging)?;

    let scenario = options.scenario()?;
    log::debug!("running scenario: {scenario:?}");

    let start_time = Instant::now();
    let samples = run(&scenario).context("scenario could not be run")?;
    log::debug!(
        "simulated {n} samples ({t:.3} s)",
        n = samples.len(),
        t = start_time.elapsed().as_secs_f32()
    );

    write_samples(&mut io::stdout().lock(), &samples, options.format)
        .context("failed to write output")?;
    Ok(())
}
