use super::error::StoreError;
use crate::core::binning::edges::BinEdges;
use crate::core::binning::histogram::Histogram3D;
use ndarray::{Array1, Array3};
use ndarray_npy::{NpzReader, NpzWriter};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const LENGTHS_ENTRY: &str = "Ls";
pub const BINNING_ENTRIES: [&str; 3] = ["binning_x", "binning_y", "binning_z"];
const FRAME_PREFIX: &str = "frame_";
const NPY_SUFFIX: &str = ".npy";

pub fn frame_entry_name(frame_index: usize) -> String {
    format!("{}{}", FRAME_PREFIX, frame_index)
}

/// File name of the store for a given bin width, e.g. `hist-data-dl1.0.npz`.
pub fn store_file_name(bin_width: f64) -> String {
    format!("hist-data-dl{:?}.npz", bin_width)
}

/// One-time header of a volume store.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMetadata {
    /// Cell edge lengths, in histogram dimension order.
    pub lengths: [f64; 3],
    /// Bin edges, in histogram dimension order.
    pub edges: [BinEdges; 3],
}

/// Append-only NumPy `.npz` archive holding one 3-D byte histogram per frame.
///
/// Metadata is written on creation; [`finish`](VolumeStore::finish) must be called
/// exactly once to finalize the archive.
pub struct VolumeStore {
    writer: NpzWriter<File>,
    path: PathBuf,
    frames_written: usize,
}

impl VolumeStore {
    pub fn create<P: AsRef<Path>>(path: P, metadata: &VolumeMetadata) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        debug!("Creating volume store at {:?}", path);
        let file = File::create(&path)?;
        let mut store = Self {
            writer: NpzWriter::new(file),
            path,
            frames_written: 0,
        };

        store.add_vector(LENGTHS_ENTRY, &Array1::from(metadata.lengths.to_vec()))?;
        for (name, edges) in BINNING_ENTRIES.iter().zip(metadata.edges.iter()) {
            store.add_vector(name, &Array1::from(edges.as_slice().to_vec()))?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Stores the histogram of `frame_index` as unsigned bytes.
    pub fn append_frame(
        &mut self,
        frame_index: usize,
        histogram: &Histogram3D,
    ) -> Result<(), StoreError> {
        let (bytes, clipped) = histogram.to_bytes();
        if clipped > 0 {
            warn!(
                "Frame {}: {} bin(s) exceed 255 particles and were saturated in the store.",
                frame_index, clipped
            );
        }
        let name = frame_entry_name(frame_index);
        self.writer
            .add_array(name.as_str(), &bytes)
            .map_err(|source| StoreError::Write { name, source })?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn finish(self) -> Result<PathBuf, StoreError> {
        self.writer.finish().map_err(|source| StoreError::Write {
            name: "<archive>".to_string(),
            source,
        })?;
        debug!(
            "Closed volume store {:?} with {} frame(s).",
            self.path, self.frames_written
        );
        Ok(self.path)
    }

    fn add_vector(&mut self, name: &str, array: &Array1<f64>) -> Result<(), StoreError> {
        self.writer
            .add_array(name, array)
            .map_err(|source| StoreError::Write {
                name: name.to_string(),
                source,
            })
    }
}

/// Contents of a volume store read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredVolume {
    pub lengths: Array1<f64>,
    pub edges: [Array1<f64>; 3],
    pub frames: BTreeMap<usize, Array3<u8>>,
}

pub fn read_volume_store<P: AsRef<Path>>(path: P) -> Result<StoredVolume, StoreError> {
    let mut npz = NpzReader::new(File::open(path)?)?;
    let names = npz.names()?;

    let entry = |name: &str| -> Result<String, StoreError> {
        names
            .iter()
            .find(|n| *n == name || n.strip_suffix(NPY_SUFFIX) == Some(name))
            .cloned()
            .ok_or_else(|| StoreError::MalformedEntry(name.to_string()))
    };

    let lengths: Array1<f64> = npz.by_name(&entry(LENGTHS_ENTRY)?)?;
    let edges: [Array1<f64>; 3] = [
        npz.by_name(&entry(BINNING_ENTRIES[0])?)?,
        npz.by_name(&entry(BINNING_ENTRIES[1])?)?,
        npz.by_name(&entry(BINNING_ENTRIES[2])?)?,
    ];

    let mut frames = BTreeMap::new();
    for raw in &names {
        let stem = raw.strip_suffix(NPY_SUFFIX).unwrap_or(raw);
        let Some(index) = stem.strip_prefix(FRAME_PREFIX) else {
            continue;
        };
        let index: usize = index
            .parse()
            .map_err(|_| StoreError::MalformedEntry(raw.clone()))?;
        let data: Array3<u8> = npz.by_name(raw)?;
        frames.insert(index, data);
    }

    Ok(StoredVolume {
        lengths,
        edges,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::binning::histogram::histogram_3d;
    use crate::core::models::axis::Axis;
    use nalgebra::Point3;
    use tempfile::TempDir;

    fn metadata() -> VolumeMetadata {
        VolumeMetadata {
            lengths: [2.0, 2.0, 3.0],
            edges: [
                BinEdges::spanning(0.0, 2.0, 1.0).unwrap(),
                BinEdges::spanning(0.0, 2.0, 1.0).unwrap(),
                BinEdges::spanning(0.0, 3.0, 1.0).unwrap(),
            ],
        }
    }

    fn histogram(points: &[Point3<f64>]) -> Histogram3D {
        let meta = metadata();
        histogram_3d(
            points,
            [&meta.edges[0], &meta.edges[1], &meta.edges[2]],
            [Axis::X, Axis::Y, Axis::Z],
        )
    }

    #[test]
    fn store_file_name_keeps_the_decimal_point() {
        assert_eq!(store_file_name(1.0), "hist-data-dl1.0.npz");
        assert_eq!(store_file_name(0.25), "hist-data-dl0.25.npz");
    }

    #[test]
    fn histograms_round_trip_bit_exact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(store_file_name(1.0));

        let first = histogram(&[Point3::new(0.5, 0.5, 0.5), Point3::new(1.5, 0.5, 2.5)]);
        let second = histogram(&vec![Point3::new(1.2, 1.8, 1.1); 7]);

        let mut store = VolumeStore::create(&path, &metadata()).unwrap();
        store.append_frame(3, &first).unwrap();
        store.append_frame(12, &second).unwrap();
        assert_eq!(store.frames_written(), 2);
        let written = store.finish().unwrap();
        assert_eq!(written, path);

        let stored = read_volume_store(&path).unwrap();
        assert_eq!(stored.lengths.to_vec(), vec![2.0, 2.0, 3.0]);
        assert_eq!(stored.edges[2].to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(stored.frames.len(), 2);
        assert_eq!(stored.frames[&3], first.to_bytes().0);
        assert_eq!(stored.frames[&12], second.to_bytes().0);
        assert_eq!(stored.frames[&12][[1, 1, 1]], 7);
    }

    #[test]
    fn empty_store_still_holds_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.npz");

        VolumeStore::create(&path, &metadata())
            .unwrap()
            .finish()
            .unwrap();

        let stored = read_volume_store(&path).unwrap();
        assert!(stored.frames.is_empty());
        assert_eq!(stored.edges[0].len(), 3);
    }
}
