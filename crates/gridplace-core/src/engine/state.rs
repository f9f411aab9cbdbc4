use crate::core::energy::term::EnergyTerm;
use crate::core::models::placement::Placement;
use std::cmp::Ordering;

/// The accepted chain of a single hill climb.
///
/// `current` is only ever replaced by a strictly lower-energy placement, so `trace` (the energy
/// after every acceptance, starting with the initial energy) is strictly decreasing.
#[derive(Debug, Clone)]
pub struct ChainState {
    pub current: Placement,
    pub current_energy: f64,
    pub proposals: usize,
    pub accepted: usize,
    pub trace: Vec<f64>,
}

impl ChainState {
    pub fn new(initial: Placement, initial_energy: f64) -> Self {
        Self {
            current: initial,
            current_energy: initial_energy,
            proposals: 0,
            accepted: 0,
            trace: vec![initial_energy],
        }
    }

    #[inline]
    pub fn initial_energy(&self) -> f64 {
        self.trace[0]
    }

    /// Records a proposal and keeps it iff it is strictly better than the current placement.
    pub fn offer(&mut self, proposed: Placement, proposed_energy: f64) -> bool {
        self.proposals += 1;
        if proposed_energy < self.current_energy {
            self.current = proposed;
            self.current_energy = proposed_energy;
            self.accepted += 1;
            self.trace.push(proposed_energy);
            true
        } else {
            false
        }
    }
}

/// Final result of one optimization chain.
#[derive(Debug, Clone)]
pub struct Solution {
    pub chain: usize,
    pub energy: f64,
    pub term: EnergyTerm,
    pub initial_energy: f64,
    pub placement: Placement,
    pub proposals: usize,
    pub accepted: usize,
    pub trace: Vec<f64>,
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Solution {}

impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Better solutions sort first: lower energy, then lower chain index.
impl Ord for Solution {
    fn cmp(&self, other: &Self) -> Ordering {
        self.energy
            .total_cmp(&other.energy)
            .then(self.chain.cmp(&other.chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::grid::Cell;

    fn placement(x: usize) -> Placement {
        Placement::from_cells(vec![Cell::new(x, 0)], 2).unwrap()
    }

    fn solution(chain: usize, energy: f64) -> Solution {
        Solution {
            chain,
            energy,
            term: EnergyTerm::default(),
            initial_energy: energy,
            placement: placement(0),
            proposals: 0,
            accepted: 0,
            trace: vec![energy],
        }
    }

    #[test]
    fn offer_accepts_only_strict_improvements() {
        let mut state = ChainState::new(placement(0), 5.0);

        assert!(!state.offer(placement(1), 5.0));
        assert!(!state.offer(placement(1), 6.0));
        assert_eq!(state.current, placement(0));

        assert!(state.offer(placement(1), 4.0));
        assert_eq!(state.current, placement(1));
        assert_eq!(state.current_energy, 4.0);
        assert_eq!(state.proposals, 3);
        assert_eq!(state.accepted, 1);
        assert_eq!(state.trace, vec![5.0, 4.0]);
        assert_eq!(state.initial_energy(), 5.0);
    }

    #[test]
    fn solutions_sort_by_energy_then_chain() {
        let mut solutions = vec![solution(0, 3.0), solution(2, 1.0), solution(1, 1.0)];
        solutions.sort();
        let order: Vec<_> = solutions.iter().map(|s| s.chain).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
