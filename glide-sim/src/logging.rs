//! Logging to stderr.

use anyhow::Context as _;
use log::Log as _;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, clap::Args)]
#[expect(clippy::module_name_repetitions)]
pub struct LoggingArgs {
    /// Log the motion of the body to stderr.
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Remove timestamps from logs so that they are deterministic.
    ///
    /// This option is intended for internal tests only.
    #[arg(long = "simplify-log-format", hide = true)]
    pub simplify_log_format: bool,
}

/// Install a [`log`] global logger based on user-provided `options`.
///
/// Nothing is logged unless [`LoggingArgs::verbose`] is set.
pub fn install(options: &LoggingArgs) -> Result<(), anyhow::Error> {
    use log::LevelFilter::{Error, Off, Trace};

    let &LoggingArgs {
        verbose,
        simplify_log_format,
    } = options;

    let stderr_logger = verbose.then(|| {
        *simplelog::WriteLogger::new(
            Trace,
            // Note: This has no target filters because `SimLogger` calls
            // `standard_filter` to do it.
            simplelog::ConfigBuilder::new()
                .set_target_level(Off)
                .set_location_level(Off)
                .set_thread_level(Off)
                .set_time_level(if simplify_log_format { Off } else { Error })
                .build(),
            std::io::stderr(),
        )
    });
    let max_level = match &stderr_logger {
        Some(logger) => simplelog::SharedLogger::level(logger),
        None => Off,
    };

    log::set_boxed_logger(Box::new(SimLogger { stderr_logger }))
        .context("failed to initialize logging")?;
    log::set_max_level(max_level);
    Ok(())
}

/// Returns whether a log record should be shown: only those from this program and the
/// `glide` library, not from other dependencies.
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();
    target == "glide"
        || target.starts_with("glide::")
        || target == "glide_sim"
        || target.starts_with("glide_sim::")
}

/// [`log::Log`] implementation that [`install()`] registers globally.
struct SimLogger {
    stderr_logger: Option<simplelog::WriteLogger<std::io::Stderr>>,
}

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        standard_filter(metadata)
            && self.stderr_logger.as_ref().is_some_and(|l| l.enabled(metadata))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !standard_filter(record.metadata()) {
            return;
        }
        if let Some(stderr_logger) = &self.stderr_logger {
            stderr_logger.log(record);
        }
    }

    fn flush(&self) {
        if let Some(stderr_logger) = &self.stderr_logger {
            stderr_logger.flush();
        }
    }
}
