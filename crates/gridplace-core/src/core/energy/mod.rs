//! # Energy Module
//!
//! Scores how readable a placement is. Lower energy is better.
//!
//! Two sub-metrics are computed over all connections of a point set:
//!
//! - **Connection length** - the Euclidean distance, in cell units, between the cells of each
//!   connection's endpoints.
//! - **Incidental collinearity** - for each connection, the number of other points whose cells
//!   lie exactly on the segment between the endpoints. Such points would appear to sit on a line
//!   they do not belong to in the rendered diagram.
//!
//! Each sub-metric is aggregated as a total or a mean ([`scoring::Aggregation`]) and the two are
//! combined with explicit weights ([`scoring::EnergyWeights`]).
//!
//! - [`geometry`] - exact integer segment predicates
//! - [`term`] - the per-metric energy breakdown
//! - [`scoring`] - the [`scoring::Scorer`] evaluating a placement

pub mod geometry;
pub mod scoring;
pub mod term;
