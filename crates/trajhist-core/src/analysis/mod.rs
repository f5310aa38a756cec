//! # Analysis Module
//!
//! The histogram and statistics components operating on trajectory frames.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Immutable run configuration and its builders
//! - **Error Handling** ([`error`]) - The analysis error taxonomy
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Profile Accumulation** ([`accumulator`]) - Per-frame 1-D histograms stacked into a table
//! - **Statistics** ([`stats`]) - Mean/std profiles, number density and normalization
//! - **Asymmetry** ([`asymmetry`]) - Signed-region trapezoidal imbalance of a density profile
//! - **Quadrants** ([`quadrant`]) - Occupancy of the four sign quadrants of the xy plane
//! - **Volume Fields** ([`volume`]) - Coarse-grained 3-D density histograms
//!
//! All components run sequentially on a single thread; frames are processed strictly in
//! increasing index order.

pub mod accumulator;
pub mod asymmetry;
pub mod config;
pub mod error;
pub mod progress;
pub mod quadrant;
pub mod stats;
pub mod volume;
