//! Fixed-width bin edges and histogramming of particle coordinates.
//!
//! Every bin is half-open, `edges[i] <= p < edges[i + 1]`, including the last one, so the
//! total count of a histogram equals the number of inputs inside `[edges[0], edges[n])`.
//! Values outside that range, and non-finite values, are dropped without error.

pub mod edges;
pub mod error;
pub mod histogram;
