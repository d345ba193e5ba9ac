//! Replaying motion scenarios with [`glide`] bodies, for experimentation and for
//! checking the behavior of the library from the command line.
//!
//! This library exists primarily to serve the `glide-sim` binary target in this package,
//! and so that its pieces can be tested individually.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

pub mod logging;
mod output;
mod scenario;
mod simulate;

pub use output::{OutputFormat, write_samples};
pub use scenario::{BuiltinScenario, DragSample, Impulse, MAX_STEPS, Scenario};
pub use simulate::{Sample, run};
