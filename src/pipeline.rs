//! File drivers: stream records in, canonicalize each cycle, write the
//! rendered result out in the same pass.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::canon::{Canonicalizer, Prettified};
use crate::codec::split_hi_lo;
use crate::config::RunConfig;
use crate::format::{CellStyle, format_cycle};
use crate::grid::Grid;
use crate::records::{Record, RecordError, RecordLayout, RecordReader};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Record { path: PathBuf, source: RecordError },
}

/// Counts reported by every driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub frames: usize,
}

impl RunSummary {
    fn add(&mut self, record: &Record) {
        self.records += 1;
        self.frames += record.frames.len();
    }
}

fn prettify_all(canon: &Canonicalizer, cycle: &[Grid]) -> Vec<Prettified> {
    cycle.iter().map(|g| canon.prettify(g)).collect()
}

/// Writes each record as its header, its frames line and the ASCII drawing
/// of the prettified cycle.
pub fn prettify_cycles<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: &RunConfig,
) -> Result<RunSummary, RecordError> {
    let canon = config.canonicalizer();
    let layout = config.layout_or(RecordLayout::frames_only);
    let mut summary = RunSummary::default();

    for record in RecordReader::new(input, layout) {
        let record = record?;
        let cycle = record.cycle(config.size)?;
        let pretty: Vec<Grid> = prettify_all(&canon, &cycle)
            .into_iter()
            .map(|p| p.grid)
            .collect();

        writeln!(output, "{}", record.header)?;
        writeln!(output, "{}", record.frames_line)?;
        output.write_all(format_cycle(&pretty, CellStyle::Ascii).as_bytes())?;

        debug!(line = record.line, frames = cycle.len(), "prettified cycle");
        summary.add(&record);
    }

    output.flush()?;
    Ok(summary)
}

/// Rolls every destination frame by the offset that prettifies its cycle
/// member, then writes the numeric destination block and the ASCII cycle
/// block, each followed by a blank line.
pub fn prettify_destinations<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: &RunConfig,
) -> Result<RunSummary, RecordError> {
    let canon = config.canonicalizer();
    let layout = config.layout_or(RecordLayout::with_destinations);
    let mut summary = RunSummary::default();

    for record in RecordReader::new(input, layout) {
        let record = record?;
        let cycle = record.cycle(config.size)?;
        let destinations = record.destinations(config.size)?;
        let pretty = prettify_all(&canon, &cycle);

        // extra frames on either side are dropped from the numeric block only
        if destinations.len() != cycle.len() {
            warn!(
                line = record.line,
                frames = cycle.len(),
                destinations = destinations.len(),
                "destination frame count differs from cycle length"
            );
        }

        let rolled_destinations: Vec<Grid<i64>> = destinations
            .iter()
            .zip(&pretty)
            .map(|(d, p)| d.roll(p.offset))
            .collect();
        let rolled_cycle: Vec<Grid> = pretty.into_iter().map(|p| p.grid).collect();

        writeln!(output, "{}", record.header)?;
        writeln!(output, "{}", record.frames_line)?;
        output.write_all(format_cycle(&rolled_destinations, CellStyle::Numeric).as_bytes())?;
        writeln!(output)?;
        output.write_all(format_cycle(&rolled_cycle, CellStyle::Ascii).as_bytes())?;
        writeln!(output)?;

        debug!(line = record.line, frames = cycle.len(), "prettified destinations");
        summary.add(&record);
    }

    output.flush()?;
    Ok(summary)
}

/// Re-encodes every frame as its high and low 64-bit halves; no board is
/// touched.
pub fn split_encoding<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    layout: RecordLayout,
) -> Result<RunSummary, RecordError> {
    let mut summary = RunSummary::default();

    for record in RecordReader::new(input, layout) {
        let record = record?;
        writeln!(output, "{}", record.header)?;
        for &frame in &record.frames {
            let (hi, lo) = split_hi_lo(frame);
            write!(output, "{hi} {lo} ")?;
        }
        writeln!(output)?;
        summary.add(&record);
    }

    output.flush()?;
    Ok(summary)
}

/// Opens `input` and creates `output`, runs `driver` over them and closes
/// both before returning. A failed run may leave a truncated output file.
pub fn run_file<F>(input: &Path, output: &Path, driver: F) -> Result<RunSummary, PipelineError>
where
    F: FnOnce(BufReader<File>, BufWriter<File>) -> Result<RunSummary, RecordError>,
{
    let reader = File::open(input).map_err(|source| PipelineError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let writer = File::create(output).map_err(|source| PipelineError::Create {
        path: output.to_path_buf(),
        source,
    })?;

    info!(input = %input.display(), output = %output.display(), "processing");
    let summary =
        driver(BufReader::new(reader), BufWriter::new(writer)).map_err(|source| {
            PipelineError::Record {
                path: input.to_path_buf(),
                source,
            }
        })?;
    info!(
        records = summary.records,
        frames = summary.frames,
        "finished {}",
        output.display()
    );
    Ok(summary)
}
