use std::fmt;
use std::io;

use manyfmt::Fmt;

use glide::util::ConciseDebug;

use crate::simulate::Sample;

/// How [`write_samples()`] presents the samples.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, clap::ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    /// One line of text per sample.
    #[default]
    Text,
    /// A JSON array of sample objects.
    Json,
}

/// Writes `samples` to `out` in the given format.
pub fn write_samples(
    out: &mut dyn io::Write,
    samples: &[Sample],
    format: OutputFormat,
) -> Result<(), anyhow::Error> {
    match format {
        OutputFormat::Text => {
            for sample in samples {
                writeln!(out, "{}", TextSample(sample))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, samples)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

struct TextSample<'a>(&'a Sample);

impl fmt::Display for TextSample<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Sample {
            time,
            ref position,
            ref velocity,
            speed,
            at_rest,
        } = *self.0;
        write!(f, "t = {time:.3}: position ")?;
        Fmt::fmt(&position[..], f, &ConciseDebug)?;
        write!(f, " velocity ")?;
        Fmt::fmt(&velocity[..], f, &ConciseDebug)?;
        write!(f, " speed {speed:.3}")?;
        if at_rest {
            write!(f, " at rest")?;
        }
        Ok(())
    }
}
