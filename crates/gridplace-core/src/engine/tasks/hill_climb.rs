use super::neighbor;
use crate::core::models::placement::Placement;
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::state::ChainState;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ClimbOutcome {
    pub placement: Placement,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub proposals: usize,
    pub accepted: usize,
    /// Energy after every accepted move, starting with the initial energy.
    pub trace: Vec<f64>,
}

/// Greedy hill climb from `initial`.
///
/// Runs for `context.config.iterations` proposals, or until the optional deadline passes. A
/// proposal replaces the current placement only when its energy is strictly lower, so the returned
/// energy never exceeds the initial one. Emits one [`Progress::TaskIncrement`] per proposal; the
/// caller owns the surrounding `TaskStart`/`TaskFinish` pair.
#[instrument(skip_all, name = "hill_climb_task", fields(iterations = context.config.iterations))]
pub fn run(
    initial: Placement,
    context: &OptimizationContext,
    rng: &mut impl Rng,
) -> Result<ClimbOutcome, EngineError> {
    initial.check_matches(context.point_set)?;
    let initial_energy = context.scorer.energy(&initial)?;
    let mut state = ChainState::new(initial, initial_energy);

    let started = Instant::now();
    for step in 0..context.config.iterations {
        if let Some(deadline) = context.config.deadline {
            if started.elapsed() >= deadline {
                debug!(step, "Deadline reached, stopping early.");
                break;
            }
        }

        let (mv, proposed) = neighbor::random_neighbor(&state.current, rng)?;
        let energy = context.scorer.energy(&proposed)?;
        if state.offer(proposed, energy) {
            debug!(
                step,
                kind = ?mv.kind,
                index = mv.index,
                energy,
                "Accepted move."
            );
        }
        context.reporter.report(Progress::TaskIncrement);
    }

    debug!(
        initial_energy,
        final_energy = state.current_energy,
        accepted = state.accepted,
        proposals = state.proposals,
        "Hill climb finished."
    );

    Ok(ClimbOutcome {
        initial_energy,
        final_energy: state.current_energy,
        proposals: state.proposals,
        accepted: state.accepted,
        trace: state.trace,
        placement: state.current,
    })
}
