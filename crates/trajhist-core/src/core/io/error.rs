use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: DumpParseErrorKind },

    #[error("Frame {index} is out of range (trajectory has {available} frames)")]
    FrameOutOfRange { index: usize, available: usize },

    #[error("Frame {index} carries no particle species; cannot filter by {filter}")]
    MissingSpecies { index: usize, filter: String },

    #[error("Trajectory contains no frames")]
    Empty,
}

#[derive(Debug, Error)]
pub enum DumpParseErrorKind {
    #[error("Expected '{expected}' but found '{found}'")]
    UnexpectedItem { expected: &'static str, found: String },

    #[error("Invalid integer value '{0}'")]
    InvalidInt(String),

    #[error("Invalid float value '{0}'")]
    InvalidFloat(String),

    #[error("Box bounds line needs {expected} values, found {found}")]
    InvalidBounds { expected: usize, found: usize },

    #[error("ATOMS header lacks coordinate columns for axis {0}")]
    MissingCoordinates(char),

    #[error("Atom line has {found} columns, header declares {expected}")]
    ColumnCount { expected: usize, found: usize },

    #[error("Unexpected end of file")]
    UnexpectedEof,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write array '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: ndarray_npy::WriteNpzError,
    },

    #[error("Failed to read store: {0}")]
    Read(#[from] ndarray_npy::ReadNpzError),

    #[error("Store entry '{0}' is missing or malformed")]
    MalformedEntry(String),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
