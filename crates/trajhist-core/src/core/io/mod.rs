//! Input/output for trajectory frames and analysis results.
//!
//! Frames enter through the [`source::FrameSource`] trait; the LAMMPS text dump reader is
//! the bundled file adapter. Volume fields leave through the NumPy `.npz` based
//! [`store::VolumeStore`] and optional PNG projections written by [`raster`].

pub mod error;
pub mod lammps;
pub mod raster;
pub mod source;
pub mod store;
