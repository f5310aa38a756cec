//! # Core Module
//!
//! Fundamental building blocks shared by every analysis:
//!
//! - **Models** ([`models`]) - Axes, simulation cells, frames and particle filters
//! - **Binning** ([`binning`]) - Bin edge generation and 1-D / 3-D histogramming
//! - **File I/O** ([`io`]) - Frame sources, the structured volume store and raster output

pub mod binning;
pub mod io;
pub mod models;
