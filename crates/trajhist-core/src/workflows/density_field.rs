use crate::analysis::config::DensityFieldConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::analysis::volume::VolumeField;
use crate::core::io::error::TrajectoryError;
use crate::core::io::raster::{frame_image_name, write_map_png};
use crate::core::io::source::{FilteredSource, FrameSource};
use crate::core::io::store::{VolumeStore, store_file_name};
use crate::core::models::frame::{Frame, ParticleFilter};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DensityFieldSummary {
    pub frames: Vec<usize>,
    /// Histogram shape, in store dimension order.
    pub shape: [usize; 3],
    pub store_path: Option<PathBuf>,
    pub images: Vec<PathBuf>,
}

/// Bins every selected frame into a 3-D histogram and persists it.
///
/// The grid comes from the cell of the first selected frame. When a store is requested it
/// is finished exactly once, whether the frame loop succeeds, fails or selects no frame.
#[instrument(skip_all, name = "density_field_workflow")]
pub fn run<S: FrameSource>(
    source: S,
    config: &DensityFieldConfig,
    reporter: &ProgressReporter,
) -> Result<DensityFieldSummary, AnalysisError> {
    let mut source = source;
    let reference = source.read_frame(reference_index(config, source.num_frames()))?;
    check_selection(&reference, &config.selection)?;

    let field = VolumeField::new(&reference.cell, config.axis, config.bin_width)?;
    debug!(
        "Volume grid {:?} over axes {:?} with bin width {}",
        field.shape(),
        field.axes(),
        config.bin_width
    );

    fs::create_dir_all(&config.output_dir)?;
    let mut source = FilteredSource::new(source, config.selection.clone());

    let mut store = if config.write_store {
        let path = config.output_dir.join(store_file_name(config.bin_width));
        Some(VolumeStore::create(path, &field.metadata())?)
    } else {
        None
    };

    let outcome = process_frames(&mut source, &field, config, store.as_mut(), reporter);

    let store_path = match store.map(VolumeStore::finish) {
        None => None,
        Some(Ok(path)) => Some(path),
        Some(Err(e)) if outcome.is_ok() => return Err(e.into()),
        Some(Err(e)) => {
            warn!("Failed to finalize the volume store after an aborted run: {}", e);
            None
        }
    };
    let (frames, images) = outcome?;

    info!(
        "Wrote density fields for {} frame(s){}.",
        frames.len(),
        store_path
            .as_ref()
            .map(|p| format!(" to {:?}", p))
            .unwrap_or_default()
    );
    Ok(DensityFieldSummary {
        frames,
        shape: field.shape(),
        store_path,
        images,
    })
}

/// First selected frame, or the frame nearest to `start` when the selection is empty so
/// that an empty run still yields a store with valid metadata.
fn reference_index(config: &DensityFieldConfig, num_frames: usize) -> usize {
    config
        .frames
        .indices(num_frames)
        .next()
        .unwrap_or_else(|| config.frames.start().min(num_frames.saturating_sub(1)))
}

fn check_selection(reference: &Frame, selection: &ParticleFilter) -> Result<(), AnalysisError> {
    let ParticleFilter::Species(name) = selection else {
        return Ok(());
    };
    if reference.species.is_none() {
        return Err(TrajectoryError::MissingSpecies {
            index: reference.index,
            filter: selection.to_string(),
        }
        .into());
    }
    if !reference.has_species(name) {
        return Err(AnalysisError::UnknownSpecies(name.clone()));
    }
    Ok(())
}

fn process_frames<S: FrameSource>(
    source: &mut S,
    field: &VolumeField,
    config: &DensityFieldConfig,
    mut store: Option<&mut VolumeStore>,
    reporter: &ProgressReporter,
) -> Result<(Vec<usize>, Vec<PathBuf>), AnalysisError> {
    let indices: Vec<usize> = config.frames.indices(source.num_frames()).collect();
    let mut frames = Vec::with_capacity(indices.len());
    let mut images = Vec::new();

    reporter.start_frames("Binning volume fields", indices.len());
    for index in indices {
        let frame = source.read_frame(index)?;
        let histogram = field.histogram(&frame);

        if let Some(store) = store.as_deref_mut() {
            store.append_frame(index, &histogram)?;
        }
        if let Some(map) = config
            .projection
            .and_then(|dimension| histogram.mean_projection(dimension))
        {
            let path = config.output_dir.join(frame_image_name(index));
            write_map_png(&path, &map)?;
            images.push(path);
        }

        frames.push(index);
        reporter.report(Progress::FrameDone { frame: index });
    }
    reporter.finish_frames();

    Ok((frames, images))
}
