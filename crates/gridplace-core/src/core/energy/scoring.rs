use super::geometry::is_on_segment;
use super::term::EnergyTerm;
use crate::core::models::placement::{Placement, PlacementError};
use crate::core::models::point_set::{Connection, PointId, PointSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ScoringError {
    #[error("Placement does not match the point set: {0}")]
    PlacementMismatch(#[from] PlacementError),

    #[error("The {term} weight must be finite and non-negative (got {value})")]
    InvalidWeight { term: &'static str, value: f64 },
}

/// Relative weights of the two energy terms.
///
/// There is no known "right" ratio between connection length and collinearity; both default to
/// `1.0` and callers are expected to tune them explicitly. Weights are finite and non-negative,
/// so every energy is non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWeights {
    length: f64,
    collinearity: f64,
}

impl EnergyWeights {
    pub fn new(length: f64, collinearity: f64) -> Result<Self, ScoringError> {
        Ok(Self {
            length: check_weight("length", length)?,
            collinearity: check_weight("collinearity", collinearity)?,
        })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn collinearity(&self) -> f64 {
        self.collinearity
    }
}

impl Default for EnergyWeights {
    fn default() -> Self {
        Self {
            length: 1.0,
            collinearity: 1.0,
        }
    }
}

fn check_weight(term: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScoringError::InvalidWeight { term, value })
    }
}

/// How per-connection values are folded into a sub-metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    #[default]
    Total,
    Mean,
}

impl Aggregation {
    #[inline]
    fn apply(self, sum: f64, count: usize) -> f64 {
        match self {
            Aggregation::Total => sum,
            Aggregation::Mean if count == 0 => 0.0,
            Aggregation::Mean => sum / count as f64,
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Total => write!(f, "total"),
            Aggregation::Mean => write!(f, "mean"),
        }
    }
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "total" | "sum" => Ok(Aggregation::Total),
            "mean" | "average" => Ok(Aggregation::Mean),
            other => Err(format!(
                "Unknown aggregation '{}'. Expected 'total' or 'mean'.",
                other
            )),
        }
    }
}

/// Evaluates the energy of placements of a fixed point set.
///
/// The scorer is a pure function of the point set and a placement: it holds no mutable state and
/// the same inputs always produce the same energy.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    point_set: &'a PointSet,
    weights: EnergyWeights,
    aggregation: Aggregation,
}

impl<'a> Scorer<'a> {
    pub fn new(point_set: &'a PointSet, weights: EnergyWeights, aggregation: Aggregation) -> Self {
        Self {
            point_set,
            weights,
            aggregation,
        }
    }

    #[inline]
    pub fn weights(&self) -> &EnergyWeights {
        &self.weights
    }

    #[inline]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Length of `connection` in cell units.
    #[inline]
    pub fn connection_length(&self, placement: &Placement, connection: &Connection) -> f64 {
        placement
            .cell(connection.from)
            .distance(&placement.cell(connection.to))
    }

    /// Points, other than the endpoints, lying on the segment drawn for `connection`.
    pub fn points_on_connection(
        &self,
        placement: &Placement,
        connection: &Connection,
    ) -> Vec<PointId> {
        incidental_points(placement, *connection).collect()
    }

    /// Unweighted breakdown of the placement's energy.
    ///
    /// A point set without connections scores zero on both terms.
    pub fn score(&self, placement: &Placement) -> Result<EnergyTerm, ScoringError> {
        placement.check_matches(self.point_set)?;

        let connections = self.point_set.connections();
        let (length_sum, collinear_sum) =
            connections
                .iter()
                .fold((0.0, 0usize), |(length, collinear), conn| {
                    (
                        length + self.connection_length(placement, conn),
                        collinear + incidental_points(placement, *conn).count(),
                    )
                });

        Ok(EnergyTerm::new(
            self.aggregation.apply(length_sum, connections.len()),
            self.aggregation
                .apply(collinear_sum as f64, connections.len()),
        ))
    }

    /// Weighted energy of the placement. Lower is better.
    pub fn energy(&self, placement: &Placement) -> Result<f64, ScoringError> {
        Ok(self.score(placement)?.weighted(&self.weights))
    }
}

fn incidental_points(
    placement: &Placement,
    connection: Connection,
) -> impl Iterator<Item = PointId> + '_ {
    let a = placement.cell(connection.from);
    let b = placement.cell(connection.to);
    placement
        .iter()
        .filter(move |&(point, cell)| !connection.is_endpoint(point) && is_on_segment(cell, a, b))
        .map(|(point, _)| point)
}
