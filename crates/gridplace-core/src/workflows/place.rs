use crate::core::models::grid::Grid;
use crate::core::models::placement::Placement;
use crate::core::models::point_set::PointSet;
use crate::engine::config::PlacementConfig;
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::Solution;
use crate::engine::tasks::hill_climb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct PlacementResult {
    pub grid: Grid,
    /// Seed the chain generators were derived from. Re-running with it reproduces the result.
    pub seed: u64,
    /// One solution per chain, best first.
    pub solutions: Vec<Solution>,
}

impl PlacementResult {
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.first()
    }
}

/// Places `point_set` from scratch: every chain starts from its own random placement.
#[instrument(skip_all, name = "placement_workflow", fields(points = point_set.len()))]
pub fn run(
    point_set: &PointSet,
    config: &PlacementConfig,
    reporter: &ProgressReporter,
) -> Result<PlacementResult, EngineError> {
    run_chains(point_set, None, config, reporter)
}

/// Continues optimizing `start`: every chain climbs from the same placement with its own moves.
#[instrument(skip_all, name = "placement_workflow", fields(points = point_set.len()))]
pub fn run_from(
    point_set: &PointSet,
    start: &Placement,
    config: &PlacementConfig,
    reporter: &ProgressReporter,
) -> Result<PlacementResult, EngineError> {
    start.check_matches(point_set)?;
    run_chains(point_set, Some(start), config, reporter)
}

fn run_chains(
    point_set: &PointSet,
    start: Option<&Placement>,
    config: &PlacementConfig,
    reporter: &ProgressReporter,
) -> Result<PlacementResult, EngineError> {
    // === Phase 0: Preparation ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let grid = Grid::for_points(point_set.len(), config.canvas_width)?;
    if let Some(start) = start {
        if start.grid_size() != grid.size {
            return Err(EngineError::Initialization(format!(
                "Starting placement uses a {0}x{0} grid, but {1} points need a {2}x{2} grid",
                start.grid_size(),
                point_set.len(),
                grid.size
            )));
        }
    }
    let seed = config.seed.unwrap_or_else(|| thread_rng().r#gen());
    info!(
        points = point_set.len(),
        connections = point_set.connections().len(),
        grid_size = grid.size,
        chains = config.chains,
        seed,
        "Starting placement workflow."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Hill climbing ===
    reporter.report(Progress::PhaseStart {
        name: "Hill Climbing",
    });
    let context = OptimizationContext::new(
        point_set,
        &config.energy,
        &config.optimization,
        reporter,
    );
    // Deadline-bound runs may ask for an effectively unbounded iteration count.
    reporter.report(Progress::TaskStart {
        total_steps: (config.chains as u64).saturating_mul(config.optimization.iterations as u64),
    });

    #[cfg(not(feature = "parallel"))]
    let chains = 0..config.chains;
    #[cfg(feature = "parallel")]
    let chains = (0..config.chains).into_par_iter();

    let solutions = chains
        .map(|chain| run_chain(chain, seed, &grid, start, &context))
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Organize results ===
    let result = finalize_results(grid, seed, solutions);
    if let Some(best) = result.best() {
        info!(
            chain = best.chain,
            energy = best.energy,
            initial_energy = best.initial_energy,
            "Workflow complete."
        );
        reporter.report(Progress::Message(format!(
            "Best energy {:.4} (chain {}, from {:.4}).",
            best.energy, best.chain, best.initial_energy
        )));
    }
    Ok(result)
}

fn run_chain(
    chain: usize,
    seed: u64,
    grid: &Grid,
    start: Option<&Placement>,
    context: &OptimizationContext,
) -> Result<Solution, EngineError> {
    let mut rng = chain_rng(seed, chain);
    let initial = match start {
        Some(placement) => placement.clone(),
        None => Placement::random(context.point_set.len(), grid, &mut rng)?,
    };

    let outcome = hill_climb::run(initial, context, &mut rng)?;
    let term = context.scorer.score(&outcome.placement)?;
    debug!(
        chain,
        energy = outcome.final_energy,
        accepted = outcome.accepted,
        "Chain finished."
    );
    context.reporter.report(Progress::StatusUpdate {
        text: format!(
            "chain {} done at {:.3}, {} of {} accepted",
            chain, outcome.final_energy, outcome.accepted, outcome.proposals
        ),
    });

    Ok(Solution {
        chain,
        energy: outcome.final_energy,
        term,
        initial_energy: outcome.initial_energy,
        placement: outcome.placement,
        proposals: outcome.proposals,
        accepted: outcome.accepted,
        trace: outcome.trace,
    })
}

/// Independent generator for `chain`, derived from the run seed.
fn chain_rng(seed: u64, chain: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (chain as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn finalize_results(grid: Grid, seed: u64, mut solutions: Vec<Solution>) -> PlacementResult {
    solutions.sort();
    PlacementResult {
        grid,
        seed,
        solutions,
    }
}
