//! Data models for point sets and their arrangement on a square grid.

pub mod grid;
pub mod placement;
pub mod point_set;
