use super::error::TrajectoryError;
use crate::core::models::frame::{Frame, ParticleFilter};

/// A random-access provider of trajectory frames.
///
/// Implementors return [`TrajectoryError::FrameOutOfRange`] for indices at or beyond
/// [`num_frames`](FrameSource::num_frames).
pub trait FrameSource {
    fn num_frames(&self) -> usize;

    fn read_frame(&mut self, index: usize) -> Result<Frame, TrajectoryError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn num_frames(&self) -> usize {
        (**self).num_frames()
    }

    fn read_frame(&mut self, index: usize) -> Result<Frame, TrajectoryError> {
        (**self).read_frame(index)
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn num_frames(&self) -> usize {
        (**self).num_frames()
    }

    fn read_frame(&mut self, index: usize) -> Result<Frame, TrajectoryError> {
        (**self).read_frame(index)
    }
}

/// Frames held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrajectory {
    frames: Vec<Frame>,
}

impl InMemoryTrajectory {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}

impl FrameSource for InMemoryTrajectory {
    fn num_frames(&self) -> usize {
        self.frames.len()
    }

    fn read_frame(&mut self, index: usize) -> Result<Frame, TrajectoryError> {
        let mut frame = self
            .frames
            .get(index)
            .cloned()
            .ok_or(TrajectoryError::FrameOutOfRange {
                index,
                available: self.frames.len(),
            })?;
        frame.index = index;
        Ok(frame)
    }
}

/// Applies a fixed [`ParticleFilter`] to every frame read from the wrapped source.
///
/// The filter is set once at construction and cannot be changed for the lifetime of
/// the wrapper.
pub struct FilteredSource<S> {
    inner: S,
    filter: ParticleFilter,
}

impl<S: FrameSource> FilteredSource<S> {
    pub fn new(inner: S, filter: ParticleFilter) -> Self {
        Self { inner, filter }
    }

    pub fn filter(&self) -> &ParticleFilter {
        &self.filter
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSource> FrameSource for FilteredSource<S> {
    fn num_frames(&self) -> usize {
        self.inner.num_frames()
    }

    fn read_frame(&mut self, index: usize) -> Result<Frame, TrajectoryError> {
        let frame = self.inner.read_frame(index)?;
        apply_filter(frame, &self.filter)
    }
}

fn apply_filter(mut frame: Frame, filter: &ParticleFilter) -> Result<Frame, TrajectoryError> {
    if filter.is_all() {
        return Ok(frame);
    }
    let species = frame
        .species
        .take()
        .ok_or_else(|| TrajectoryError::MissingSpecies {
            index: frame.index,
            filter: filter.to_string(),
        })?;

    let (positions, species): (Vec<_>, Vec<_>) = frame
        .positions
        .into_iter()
        .zip(species)
        .filter(|(_, name)| filter.matches(name))
        .unzip();

    frame.positions = positions;
    frame.species = Some(species);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cell::SimulationCell;
    use nalgebra::{Point3, Vector3};

    fn mixed_frame() -> Frame {
        let cell = SimulationCell::new(Vector3::zeros(), Vector3::new(10.0, 10.0, 10.0));
        Frame::new(
            0,
            cell,
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(2.0, 2.0, 2.0),
                Point3::new(3.0, 3.0, 3.0),
            ],
        )
        .with_species(vec!["O".into(), "H".into(), "O".into()])
    }

    #[test]
    fn in_memory_trajectory_reports_out_of_range_frames() {
        let mut traj = InMemoryTrajectory::new(vec![mixed_frame()]);
        assert_eq!(traj.num_frames(), 1);
        assert!(traj.read_frame(0).is_ok());
        assert!(matches!(
            traj.read_frame(1),
            Err(TrajectoryError::FrameOutOfRange {
                index: 1,
                available: 1
            })
        ));
    }

    #[test]
    fn in_memory_trajectory_stamps_the_requested_index() {
        let mut traj = InMemoryTrajectory::new(vec![mixed_frame(), mixed_frame()]);
        assert_eq!(traj.read_frame(1).unwrap().index, 1);
    }

    #[test]
    fn filtered_source_keeps_only_matching_species() {
        let traj = InMemoryTrajectory::new(vec![mixed_frame()]);
        let mut filtered = FilteredSource::new(traj, ParticleFilter::Species("O".into()));
        let frame = filtered.read_frame(0).unwrap();
        assert_eq!(frame.num_particles(), 2);
        assert_eq!(frame.positions[1], Point3::new(3.0, 3.0, 3.0));
        assert_eq!(frame.species.unwrap(), vec!["O".to_string(), "O".to_string()]);
    }

    #[test]
    fn filtered_source_with_all_filter_passes_frames_through() {
        let traj = InMemoryTrajectory::new(vec![mixed_frame()]);
        let mut filtered = FilteredSource::new(traj, ParticleFilter::All);
        assert_eq!(filtered.read_frame(0).unwrap(), mixed_frame());
    }

    #[test]
    fn filtering_without_species_information_fails() {
        let mut frame = mixed_frame();
        frame.species = None;
        let traj = InMemoryTrajectory::new(vec![frame]);
        let mut filtered = FilteredSource::new(traj, ParticleFilter::Species("O".into()));
        assert!(matches!(
            filtered.read_frame(0),
            Err(TrajectoryError::MissingSpecies { index: 0, .. })
        ));
    }
}
