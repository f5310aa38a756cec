use crate::analysis::config::QuadrantConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::analysis::quadrant::{QuadrantCounter, QuadrantFractions};
use crate::core::io::source::FrameSource;
use std::io::Write;
use tracing::{info, instrument};

/// Counts quadrant occupancy for every selected frame, in increasing frame order.
///
/// `on_frame` sees each result as soon as it is computed; an error from it aborts the run.
#[instrument(skip_all, name = "quadrant_workflow")]
pub fn run<S, F>(
    source: &mut S,
    config: &QuadrantConfig,
    reporter: &ProgressReporter,
    mut on_frame: F,
) -> Result<Vec<QuadrantFractions>, AnalysisError>
where
    S: FrameSource + ?Sized,
    F: FnMut(&QuadrantFractions) -> Result<(), AnalysisError>,
{
    let counter = QuadrantCounter::default();
    let indices: Vec<usize> = config.frames.indices(source.num_frames()).collect();
    let mut results = Vec::with_capacity(indices.len());

    reporter.start_frames("Counting quadrants", indices.len());
    for index in indices {
        let frame = source.read_frame(index)?;
        let fractions = counter.count(&frame);
        info!("{} {}", fractions.frame, fractions.spread());
        on_frame(&fractions)?;
        results.push(fractions);
        reporter.report(Progress::FrameDone { frame: index });
    }
    reporter.finish_frames();

    info!("Counted quadrants for {} frame(s).", results.len());
    Ok(results)
}

/// Streams one `frame q1 q2 q3 q4 spread` line per frame, flushed as it is written.
pub struct QuadrantLineWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> QuadrantLineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .delimiter(b' ')
                .has_headers(false)
                .from_writer(writer),
        }
    }

    pub fn write(&mut self, fractions: &QuadrantFractions) -> Result<(), AnalysisError> {
        let mut record = Vec::with_capacity(6);
        record.push(fractions.frame.to_string());
        record.extend(fractions.fractions.iter().map(|f| f.to_string()));
        record.push(fractions.spread().to_string());
        self.writer.write_record(&record)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, AnalysisError> {
        self.writer
            .into_inner()
            .map_err(|e| {
                AnalysisError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
            })
    }
}
