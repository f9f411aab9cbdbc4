use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Points carry no attributes of their own; they are identified by index.
pub type PointId = usize;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PointSetError {
    #[error("A point set must contain at least one point")]
    NoPoints,

    #[error("Connection {from}-{to} references point {point}, but only {n} points exist")]
    PointOutOfRange {
        from: PointId,
        to: PointId,
        point: PointId,
        n: usize,
    },

    #[error("Connection from point {0} to itself is not allowed")]
    SelfLoop(PointId),

    #[error("Duplicate connection between points {from} and {to}")]
    DuplicateConnection { from: PointId, to: PointId },

    #[error("Requested {requested} connections, but {n} points allow at most {max}")]
    TooManyConnections {
        requested: usize,
        n: usize,
        max: usize,
    },
}

/// An unordered pair of distinct points joined by a line in the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: PointId,
    pub to: PointId,
}

impl Connection {
    pub fn new(from: PointId, to: PointId) -> Self {
        Self { from, to }
    }

    /// The pair with the smaller id first, so `(a, b)` and `(b, a)` compare equal.
    #[inline]
    pub fn key(&self) -> (PointId, PointId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }

    #[inline]
    pub fn is_endpoint(&self, point: PointId) -> bool {
        self.from == point || self.to == point
    }
}

impl From<(PointId, PointId)> for Connection {
    fn from((from, to): (PointId, PointId)) -> Self {
        Self::new(from, to)
    }
}

/// The immutable input of the optimizer: a point count and the connections between points.
///
/// A `PointSet` can only be obtained through [`PointSet::new`], which enforces that there is at
/// least one point, that every connection references existing points, and that there are no
/// self-loops or duplicate unordered pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSet {
    n: usize,
    connections: Vec<Connection>,
}

impl PointSet {
    pub fn new(n: usize, connections: Vec<Connection>) -> Result<Self, PointSetError> {
        if n == 0 {
            return Err(PointSetError::NoPoints);
        }

        let max = Self::max_connections(n);
        if connections.len() > max {
            return Err(PointSetError::TooManyConnections {
                requested: connections.len(),
                n,
                max,
            });
        }

        let mut seen = HashSet::with_capacity(connections.len());
        for conn in &connections {
            for point in [conn.from, conn.to] {
                if point >= n {
                    return Err(PointSetError::PointOutOfRange {
                        from: conn.from,
                        to: conn.to,
                        point,
                        n,
                    });
                }
            }
            if conn.from == conn.to {
                return Err(PointSetError::SelfLoop(conn.from));
            }
            if !seen.insert(conn.key()) {
                return Err(PointSetError::DuplicateConnection {
                    from: conn.from,
                    to: conn.to,
                });
            }
        }

        Ok(Self { n, connections })
    }

    /// Number of distinct unordered pairs among `n` points, saturating at `usize::MAX`.
    #[inline]
    pub fn max_connections(n: usize) -> usize {
        let m = n.saturating_sub(1);
        // Halve the even factor first so the product only overflows when the result does.
        if n % 2 == 0 {
            (n / 2).saturating_mul(m)
        } else {
            n.saturating_mul(m / 2)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn points(&self) -> std::ops::Range<PointId> {
        0..self.n
    }
}
