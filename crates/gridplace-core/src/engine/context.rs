use super::config::{EnergyConfig, OptimizationConfig};
use super::progress::ProgressReporter;
use crate::core::energy::scoring::Scorer;
use crate::core::models::point_set::PointSet;

/// Read-only inputs shared by every optimization task of a run.
#[derive(Clone, Copy)]
pub struct OptimizationContext<'a> {
    pub point_set: &'a PointSet,
    pub scorer: Scorer<'a>,
    pub config: &'a OptimizationConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> OptimizationContext<'a> {
    pub fn new(
        point_set: &'a PointSet,
        energy: &EnergyConfig,
        config: &'a OptimizationConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            point_set,
            scorer: Scorer::new(point_set, energy.weights, energy.aggregation),
            config,
            reporter,
        }
    }
}
