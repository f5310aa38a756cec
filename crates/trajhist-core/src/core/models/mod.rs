//! Data models describing trajectory frames and the simulation cell.

pub mod axis;
pub mod cell;
pub mod frame;
