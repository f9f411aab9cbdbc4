//! # Core Module
//!
//! Fundamental building blocks of GridPlace: the data models describing a diagram and its
//! arrangement on a grid, the energy function used to compare arrangements, and I/O utilities.
//!
//! - **Diagram Representation** ([`models`]) - Points, connections, grids, cells and placements
//! - **Energy Calculations** ([`energy`]) - Connection length and collinearity scoring
//! - **Input Generation** ([`generation`]) - Random point sets for demos and benchmarks
//! - **File I/O** ([`io`]) - Reading and writing layout documents

pub mod energy;
pub mod generation;
pub mod io;
pub mod models;
