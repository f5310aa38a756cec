use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum BinningError {
    #[error("Bin width must be positive and finite (got {0})")]
    InvalidWidth(f64),

    #[error("Extent to bin must be positive and finite (got {0})")]
    InvalidExtent(f64),

    #[error("At least two bin edges are required (got {0})")]
    TooFewEdges(usize),

    #[error("Bin edges must be strictly increasing (edge {index} is {value})")]
    NotIncreasing { index: usize, value: f64 },

    #[error("Bin edges must be evenly spaced (gap {index} is {gap}, expected {expected})")]
    UnevenSpacing {
        index: usize,
        gap: f64,
        expected: f64,
    },
}
