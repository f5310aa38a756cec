use nalgebra::{Point3, Vector3};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use trajhist::analysis::config::{
    DensityFieldConfigBuilder, FrameRange, ProfileConfigBuilder, QuadrantConfig, RowSelection,
};
use trajhist::analysis::error::AnalysisError;
use trajhist::analysis::progress::{Progress, ProgressReporter};
use trajhist::core::io::lammps::LammpsDumpReader;
use trajhist::core::io::source::InMemoryTrajectory;
use trajhist::core::io::store::read_volume_store;
use trajhist::core::models::axis::Axis;
use trajhist::core::models::cell::SimulationCell;
use trajhist::core::models::frame::{Frame, ParticleFilter};
use trajhist::workflows::{density_field, profile, quadrant};

const TOLERANCE: f64 = 1e-9;

fn snapshot(timestep: u64, atoms: &[(&str, f64, f64, f64)]) -> String {
    let mut text = format!(
        "ITEM: TIMESTEP\n{}\nITEM: NUMBER OF ATOMS\n{}\nITEM: BOX BOUNDS pp pp pp\n\
         -4.0 4.0\n-4.0 4.0\n0.0 2.0\nITEM: ATOMS id element x y z\n",
        timestep,
        atoms.len()
    );
    for (id, (species, x, y, z)) in atoms.iter().enumerate() {
        text.push_str(&format!("{} {} {} {} {}\n", id + 1, species, x, y, z));
    }
    text
}

fn write_dump(dir: &Path) -> std::path::PathBuf {
    let frames = [
        snapshot(0, &[("O", -3.0, 1.0, 0.5), ("O", 3.0, 1.0, 0.5), ("H", 1.0, -1.0, 1.5)]),
        snapshot(100, &[("O", -1.0, 1.0, 0.5), ("O", 1.0, 1.0, 0.5), ("H", 1.0, 1.0, 1.5)]),
        snapshot(200, &[("O", -1.0, -1.0, 0.5), ("O", 3.0, 3.0, 0.5), ("H", 3.0, 3.0, 1.5)]),
    ];
    let path = dir.join("traj.atom");
    fs::write(&path, frames.concat()).unwrap();
    path
}

#[test]
fn profile_workflow_reads_a_dump_file() {
    let dir = TempDir::new().unwrap();
    let mut reader = LammpsDumpReader::open(write_dump(dir.path())).unwrap();
    let config = ProfileConfigBuilder::new()
        .axis(Axis::X)
        .bin_width(2.0)
        .build()
        .unwrap();

    let result = profile::run(&mut reader, &config, &ProgressReporter::new()).unwrap();

    assert_eq!(result.table.frames(), &[0, 1, 2]);
    assert_eq!(result.stats.x, vec![-3.0, -1.0, 1.0, 3.0]);
    let total: f64 = result.stats.avg_profile.iter().sum();
    assert!((total - 3.0).abs() < TOLERANCE);
    assert!(result.asymmetry >= 0.0);
}

#[test]
fn row_selection_beyond_the_table_is_an_invalid_state() {
    let dir = TempDir::new().unwrap();
    let mut reader = LammpsDumpReader::open(write_dump(dir.path())).unwrap();
    let config = ProfileConfigBuilder::new()
        .axis(Axis::X)
        .bin_width(2.0)
        .rows(RowSelection::new(5, None, 1).unwrap())
        .build()
        .unwrap();

    let err = profile::run(&mut reader, &config, &ProgressReporter::new()).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidState(_)));
}

#[test]
fn quadrant_workflow_streams_lines_for_each_frame() {
    let dir = TempDir::new().unwrap();
    let mut reader = LammpsDumpReader::open(write_dump(dir.path())).unwrap();
    let mut writer = quadrant::QuadrantLineWriter::new(Vec::new());

    let results = quadrant::run(
        &mut reader,
        &QuadrantConfig::default(),
        &ProgressReporter::new(),
        |f| writer.write(f),
    )
    .unwrap();

    assert_eq!(results.len(), 3);
    for fractions in &results {
        assert!((fractions.sum() - 1.0).abs() < TOLERANCE);
    }
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert_eq!(text.lines().count(), 3);
    let third = (1.0_f64 / 3.0).to_string();
    let first_line = format!("0 0 {third} {third} {third} {third}\n");
    assert!(text.starts_with(&first_line));
}

#[test]
fn density_field_workflow_filters_species_and_reports_progress() {
    let dir = TempDir::new().unwrap();
    let reader = LammpsDumpReader::open(write_dump(dir.path())).unwrap();
    let config = DensityFieldConfigBuilder::new()
        .bin_width(2.0)
        .output_dir(dir.path().join("fields"))
        .selection(ParticleFilter::from_selection("H"))
        .projection(0)
        .build()
        .unwrap();

    let done = std::sync::Mutex::new(Vec::new());
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        if let Progress::FrameDone { frame } = event {
            done.lock().unwrap().push(frame);
        }
    }));

    let summary = density_field::run(reader, &config, &reporter).unwrap();
    drop(reporter);
    assert_eq!(done.into_inner().unwrap(), vec![0, 1, 2]);
    assert_eq!(summary.images.len(), 3);

    let stored = read_volume_store(summary.store_path.unwrap()).unwrap();
    assert_eq!(stored.frames.len(), 3);
    for hist in stored.frames.values() {
        assert_eq!(hist.iter().map(|&c| c as u32).sum::<u32>(), 1);
    }
}

#[test]
fn density_field_needs_species_information_to_filter() {
    let dir = TempDir::new().unwrap();
    let cell = SimulationCell::new(Vector3::zeros(), Vector3::repeat(2.0));
    let source =
        InMemoryTrajectory::new(vec![Frame::new(0, cell, vec![Point3::new(1.0, 1.0, 1.0)])]);
    let config = DensityFieldConfigBuilder::new()
        .bin_width(1.0)
        .output_dir(dir.path().to_path_buf())
        .selection(ParticleFilter::from_selection("O"))
        .frames(FrameRange::default())
        .build()
        .unwrap();

    let err = density_field::run(source, &config, &ProgressReporter::new()).unwrap_err();
    assert!(matches!(err, AnalysisError::Trajectory(_)));
}
