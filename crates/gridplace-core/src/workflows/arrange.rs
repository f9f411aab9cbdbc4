use crate::core::models::grid::Grid;
use crate::core::models::placement::Placement;
use crate::core::models::point_set::PointSet;
use crate::engine::config::{EnergyConfig, OptimizationConfig};
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::hill_climb;
use rand::Rng;
use tracing::{info, instrument};

/// Sizes the grid for `point_set` and draws a uniformly random valid placement on it.
#[instrument(skip_all, fields(points = point_set.len(), canvas_width = canvas_width))]
pub fn initial_place(
    point_set: &PointSet,
    canvas_width: f64,
    rng: &mut impl Rng,
) -> Result<(Grid, Placement), EngineError> {
    let grid = Grid::for_points(point_set.len(), canvas_width)?;
    let placement = Placement::random(point_set.len(), &grid, rng)?;
    info!(
        grid_size = grid.size,
        cell_width = grid.cell_width,
        "Initial placement drawn."
    );
    Ok((grid, placement))
}

/// Runs one greedy hill climb starting at `placement` and returns the improved placement.
///
/// The result is never worse than `placement` under `energy`, and is itself a valid input for
/// another call.
#[instrument(skip_all, fields(iterations = config.iterations))]
pub fn optimize(
    point_set: &PointSet,
    placement: &Placement,
    config: &OptimizationConfig,
    energy: &EnergyConfig,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
) -> Result<Placement, EngineError> {
    let context = OptimizationContext::new(point_set, energy, config, reporter);

    reporter.report(Progress::TaskStart {
        total_steps: config.iterations as u64,
    });
    let outcome = hill_climb::run(placement.clone(), &context, rng)?;
    reporter.report(Progress::TaskFinish);

    info!(
        initial_energy = outcome.initial_energy,
        final_energy = outcome.final_energy,
        accepted = outcome.accepted,
        "Optimization pass complete."
    );
    Ok(outcome.placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::scoring::Scorer;
    use crate::core::models::point_set::Connection;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn path(n: usize) -> PointSet {
        let connections = (1..n).map(|i| Connection::new(i - 1, i)).collect();
        PointSet::new(n, connections).unwrap()
    }

    #[test]
    fn initial_place_returns_valid_placement_on_sized_grid() {
        let set = path(10);
        let mut rng = StdRng::seed_from_u64(12);
        let (grid, placement) = initial_place(&set, 500.0, &mut rng).unwrap();

        assert_eq!(grid.size, 4);
        assert_eq!(grid.cell_width, 125);
        assert_eq!(placement.len(), 10);
        assert_eq!(placement.grid_size(), 4);
        let unique: HashSet<_> = placement.cells().iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn initial_place_rejects_bad_canvas() {
        let set = path(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            initial_place(&set, -1.0, &mut rng),
            Err(EngineError::Grid { .. })
        ));
    }

    #[test]
    fn repeated_optimization_never_increases_energy() {
        let set = path(9);
        let energy = EnergyConfig::default();
        let config = OptimizationConfig::default();
        let reporter = ProgressReporter::new();
        let scorer = Scorer::new(&set, energy.weights, energy.aggregation);
        let mut rng = StdRng::seed_from_u64(99);

        let (_, mut placement) = initial_place(&set, 500.0, &mut rng).unwrap();
        let mut previous = scorer.energy(&placement).unwrap();
        for _ in 0..10 {
            placement = optimize(&set, &placement, &config, &energy, &mut rng, &reporter).unwrap();
            let current = scorer.energy(&placement).unwrap();
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn optimize_brackets_progress_with_task_events() {
        use std::sync::{Arc, Mutex};

        let set = path(4);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        let config = OptimizationConfig {
            iterations: 3,
            deadline: None,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let (_, placement) = initial_place(&set, 500.0, &mut rng).unwrap();

        optimize(
            &set,
            &placement,
            &config,
            &EnergyConfig::default(),
            &mut rng,
            &reporter,
        )
        .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], Progress::TaskStart { total_steps: 3 }));
        assert!(matches!(events[4], Progress::TaskFinish));
    }
}
