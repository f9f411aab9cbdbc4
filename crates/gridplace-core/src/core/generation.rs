use crate::core::models::point_set::{Connection, PointSet, PointSetError};
use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Generates a point set of `n` points joined by `connection_count` random connections.
///
/// Every unordered pair `(i, j)` with `i < j` is enumerated, the pairs are shuffled and the first
/// `connection_count` are kept, so the result never contains duplicates or self-loops.
///
/// # Errors
///
/// Returns [`PointSetError::NoPoints`] for `n == 0` and [`PointSetError::TooManyConnections`]
/// when more connections are requested than there are distinct pairs.
#[instrument(level = "debug", skip(rng))]
pub fn random_point_set(
    n: usize,
    connection_count: usize,
    rng: &mut impl Rng,
) -> Result<PointSet, PointSetError> {
    if n == 0 {
        return Err(PointSetError::NoPoints);
    }
    let max = PointSet::max_connections(n);
    if connection_count > max {
        return Err(PointSetError::TooManyConnections {
            requested: connection_count,
            n,
            max,
        });
    }

    // Quadratic in n, but a partial shuffle would still need the full pair list.
    let mut pairs: Vec<Connection> = (0..n)
        .tuple_combinations()
        .map(|(from, to)| Connection::new(from, to))
        .collect();
    let (chosen, _) = pairs.partial_shuffle(rng, connection_count);
    let connections = chosen.to_vec();

    debug!(
        points = n,
        connections = connections.len(),
        "Generated random point set."
    );
    PointSet::new(n, connections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn generates_requested_number_of_unique_connections() {
        let mut rng = StdRng::seed_from_u64(5);
        let set = random_point_set(10, 20, &mut rng).unwrap();

        assert_eq!(set.len(), 10);
        assert_eq!(set.connections().len(), 20);
        let keys: HashSet<_> = set.connections().iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), 20);
        assert!(set.connections().iter().all(|c| c.from < c.to && c.to < 10));
    }

    #[test]
    fn complete_graph_uses_every_pair() {
        let mut rng = StdRng::seed_from_u64(9);
        let set = random_point_set(6, 15, &mut rng).unwrap();
        assert_eq!(set.connections().len(), 15);
    }

    #[test]
    fn zero_connections_is_allowed() {
        let mut rng = StdRng::seed_from_u64(1);
        let set = random_point_set(3, 0, &mut rng).unwrap();
        assert!(set.connections().is_empty());
    }

    #[test]
    fn single_point_has_no_pairs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_point_set(1, 0, &mut rng).is_ok());
        assert!(matches!(
            random_point_set(1, 1, &mut rng),
            Err(PointSetError::TooManyConnections { max: 0, .. })
        ));
    }

    #[test]
    fn rejects_zero_points() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            random_point_set(0, 0, &mut rng),
            Err(PointSetError::NoPoints)
        );
    }

    #[test]
    fn is_reproducible_with_same_seed() {
        let a = random_point_set(12, 30, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = random_point_set(12, 30, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }
}
