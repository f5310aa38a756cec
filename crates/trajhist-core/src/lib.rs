//! # trajhist Core Library
//!
//! Spatial histogramming and profile statistics for molecular-dynamics trajectories.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SimulationCell`, `Frame`),
//!   bin edge generation and histogramming, and I/O adapters (frame sources, the volume
//!   store, projection rasters).
//!
//! - **[`analysis`]: The Logic Core.** Immutable run configuration and the analysis
//!   components: profile accumulation, statistics reduction, the asymmetry metric,
//!   quadrant occupancy and 3-D volume fields.
//!
//! - **[`workflows`]: The Public API.** End-to-end runs that tie a frame source, the
//!   analysis components and the output writers together.

pub mod analysis;
pub mod core;
pub mod workflows;
