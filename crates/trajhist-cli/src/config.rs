//! Run configuration assembled from CLI arguments, an optional TOML file and built-in
//! defaults, in that order of precedence.

mod builder;
mod defaults;
mod file;

pub use builder::{build_density_field, build_profile, build_quadrant};
pub use file::FileConfig;
