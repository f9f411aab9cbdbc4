use crate::core::models::grid::Cell;
use crate::core::models::placement::{CellMap, Placement};
use crate::engine::error::EngineError;
use rand::Rng;
use tracing::trace;

/// A cyclic shift of one grid line by a single position.
///
/// Columns are lines of fixed `x`; shifting up moves every occupant towards `y = 0` and wraps the
/// first one to the end. Rows are lines of fixed `y`; shifting left moves every occupant towards
/// `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    ShiftColumnUp,
    ShiftColumnDown,
    ShiftRowLeft,
    ShiftRowRight,
}

impl MoveKind {
    pub const ALL: [MoveKind; 4] = [
        MoveKind::ShiftColumnUp,
        MoveKind::ShiftColumnDown,
        MoveKind::ShiftRowLeft,
        MoveKind::ShiftRowRight,
    ];

    pub fn inverse(self) -> Self {
        match self {
            MoveKind::ShiftColumnUp => MoveKind::ShiftColumnDown,
            MoveKind::ShiftColumnDown => MoveKind::ShiftColumnUp,
            MoveKind::ShiftRowLeft => MoveKind::ShiftRowRight,
            MoveKind::ShiftRowRight => MoveKind::ShiftRowLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborMove {
    pub kind: MoveKind,
    /// Column (`x`) or row (`y`) being shifted.
    pub index: usize,
}

impl NeighborMove {
    pub fn new(kind: MoveKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// Draws a line index and a move kind, each uniformly at random.
    pub fn random(grid_size: usize, rng: &mut impl Rng) -> Self {
        let index = rng.gen_range(0..grid_size);
        let kind = MoveKind::ALL[rng.gen_range(0..MoveKind::ALL.len())];
        Self { kind, index }
    }

    pub fn inverse(self) -> Self {
        Self {
            kind: self.kind.inverse(),
            index: self.index,
        }
    }
}

/// Applies `mv` to a copy of `placement`. The input is left untouched.
///
/// A rotation permutes the occupants of a single line and leaves every other line as it was, so
/// the result is again a valid placement.
pub fn apply_move(placement: &Placement, mv: NeighborMove) -> Result<Placement, EngineError> {
    let size = placement.grid_size();
    if mv.index >= size {
        return Err(EngineError::Internal(format!(
            "Move index {} is outside the {}x{} grid",
            mv.index, size, size
        )));
    }

    let mut map = placement.to_cell_map();
    match mv.kind {
        MoveKind::ShiftColumnUp => map.column_mut(mv.index).rotate_left(1),
        MoveKind::ShiftColumnDown => map.column_mut(mv.index).rotate_right(1),
        MoveKind::ShiftRowLeft => rotate_row(&mut map, mv.index, true),
        MoveKind::ShiftRowRight => rotate_row(&mut map, mv.index, false),
    }

    Ok(map.into_placement()?)
}

/// Proposes a random neighbor of `placement`.
pub fn random_neighbor(
    placement: &Placement,
    rng: &mut impl Rng,
) -> Result<(NeighborMove, Placement), EngineError> {
    let size = placement.grid_size();
    if size == 0 {
        return Err(EngineError::Internal(
            "Cannot propose a move on an empty grid".to_string(),
        ));
    }

    let mv = NeighborMove::random(size, rng);
    trace!(kind = ?mv.kind, index = mv.index, "Proposing neighbor move.");
    Ok((mv, apply_move(placement, mv)?))
}

fn rotate_row(map: &mut CellMap, y: usize, left: bool) {
    let size = map.size();
    let mut row: Vec<_> = (0..size).map(|x| map.get(Cell::new(x, y))).collect();
    if left {
        row.rotate_left(1);
    } else {
        row.rotate_right(1);
    }
    for (x, occupant) in row.into_iter().enumerate() {
        map.set(Cell::new(x, y), occupant);
    }
}
