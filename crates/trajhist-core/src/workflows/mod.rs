//! # Workflows Module
//!
//! End-to-end runs over a frame source. Each workflow validates its configuration,
//! walks the selected frames in increasing order, reports progress and hands back a
//! result ready to be printed or persisted.
//!
//! - **Profile** ([`profile`]) - 1-D density profile along an axis, its statistics and
//!   asymmetry score.
//! - **Quadrant** ([`quadrant`]) - Per-frame occupancy of the xy sign quadrants.
//! - **Density Field** ([`density_field`]) - Per-frame 3-D histograms written to a volume
//!   store, with optional projection images.

pub mod density_field;
pub mod profile;
pub mod quadrant;
