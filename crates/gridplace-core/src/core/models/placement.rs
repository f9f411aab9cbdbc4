use super::grid::{Cell, Grid};
use super::point_set::{PointId, PointSet};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PlacementError {
    #[error("Placement holds {actual} points, but the point set has {expected}")]
    WrongPointCount { expected: usize, actual: usize },

    #[error("Point {point} is placed at ({}, {}), outside the {grid_size}x{grid_size} grid", .cell.x, .cell.y)]
    CellOutOfBounds {
        point: PointId,
        cell: Cell,
        grid_size: usize,
    },

    #[error("Points {first} and {second} both occupy cell ({}, {})", .cell.x, .cell.y)]
    CellOccupied {
        first: PointId,
        second: PointId,
        cell: Cell,
    },

    #[error("A {grid_size}x{grid_size} grid cannot hold {points} points")]
    GridTooSmall { points: usize, grid_size: usize },

    #[error("Point {0} has no cell in the grid map")]
    MissingPoint(PointId),

    #[error("Point {0} appears in more than one cell of the grid map")]
    DuplicatePoint(PointId),
}

/// A total, injective assignment of points to grid cells.
///
/// Indexed by point id: `cells()[p]` is the cell of point `p`. Every constructor upholds the
/// invariant that all cells lie inside the grid and no two points share a cell, so a
/// `Placement` value is always valid. Optimizers never mutate a placement in place; they build a
/// new one and replace the old value when it is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    grid_size: usize,
    cells: Vec<Cell>,
}

impl Placement {
    /// Builds a placement from explicit cells, checking bounds and injectivity.
    pub fn from_cells(cells: Vec<Cell>, grid_size: usize) -> Result<Self, PlacementError> {
        if cells.len() > grid_size * grid_size {
            return Err(PlacementError::GridTooSmall {
                points: cells.len(),
                grid_size,
            });
        }

        let mut owners: Vec<Option<PointId>> = vec![None; grid_size * grid_size];
        for (point, &cell) in cells.iter().enumerate() {
            if cell.x >= grid_size || cell.y >= grid_size {
                return Err(PlacementError::CellOutOfBounds {
                    point,
                    cell,
                    grid_size,
                });
            }
            let slot = &mut owners[cell.x * grid_size + cell.y];
            if let Some(first) = *slot {
                return Err(PlacementError::CellOccupied {
                    first,
                    second: point,
                    cell,
                });
            }
            *slot = Some(point);
        }

        Ok(Self { grid_size, cells })
    }

    /// Samples a uniformly random placement of `n` points on `grid`.
    ///
    /// All cells are enumerated, shuffled with an unbiased Fisher-Yates shuffle, and the first `n`
    /// are assigned to points `0..n` in order.
    pub fn random(n: usize, grid: &Grid, rng: &mut impl Rng) -> Result<Self, PlacementError> {
        if n > grid.capacity() {
            return Err(PlacementError::GridTooSmall {
                points: n,
                grid_size: grid.size,
            });
        }

        let mut cells: Vec<Cell> = grid.cells().collect();
        cells.shuffle(rng);
        cells.truncate(n);

        Ok(Self {
            grid_size: grid.size,
            cells,
        })
    }

    /// Checks that this placement covers exactly the points of `point_set`.
    pub fn check_matches(&self, point_set: &PointSet) -> Result<(), PlacementError> {
        if self.cells.len() != point_set.len() {
            return Err(PlacementError::WrongPointCount {
                expected: point_set.len(),
                actual: self.cells.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cell(&self, point: PointId) -> Cell {
        self.cells[point]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, Cell)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    pub fn to_cell_map(&self) -> CellMap {
        CellMap::from_placement(self)
    }
}

/// What a grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    Occupied(PointId),
    #[default]
    Empty,
}

impl Occupant {
    #[inline]
    pub fn point(self) -> Option<PointId> {
        match self {
            Occupant::Occupied(p) => Some(p),
            Occupant::Empty => None,
        }
    }
}

/// The cell-indexed view of a [`Placement`]: for every cell, the point occupying it (if any).
///
/// Stored column-major, so `column(x)` is a contiguous slice ordered by `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMap {
    size: usize,
    points: usize,
    occupants: Vec<Occupant>,
}

impl CellMap {
    pub fn from_placement(placement: &Placement) -> Self {
        let size = placement.grid_size();
        let mut occupants = vec![Occupant::Empty; size * size];
        for (point, cell) in placement.iter() {
            occupants[cell.x * size + cell.y] = Occupant::Occupied(point);
        }
        Self {
            size,
            points: placement.len(),
            occupants,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Occupant {
        self.occupants[cell.x * self.size + cell.y]
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, occupant: Occupant) {
        self.occupants[cell.x * self.size + cell.y] = occupant;
    }

    #[inline]
    pub fn column(&self, x: usize) -> &[Occupant] {
        &self.occupants[x * self.size..(x + 1) * self.size]
    }

    #[inline]
    pub fn column_mut(&mut self, x: usize) -> &mut [Occupant] {
        &mut self.occupants[x * self.size..(x + 1) * self.size]
    }

    /// Converts back to the point-indexed form. Empty cells are skipped.
    pub fn into_placement(self) -> Result<Placement, PlacementError> {
        let mut cells: Vec<Option<Cell>> = vec![None; self.points];
        for x in 0..self.size {
            for y in 0..self.size {
                if let Occupant::Occupied(point) = self.occupants[x * self.size + y] {
                    let slot = cells
                        .get_mut(point)
                        .ok_or(PlacementError::MissingPoint(point))?;
                    if slot.is_some() {
                        return Err(PlacementError::DuplicatePoint(point));
                    }
                    *slot = Some(Cell::new(x, y));
                }
            }
        }

        let cells = cells
            .into_iter()
            .enumerate()
            .map(|(point, cell)| cell.ok_or(PlacementError::MissingPoint(point)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Placement {
            grid_size: self.size,
            cells,
        })
    }
}

impl fmt::Display for CellMap {
    /// Renders the map as rows of point ids, with `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.points.saturating_sub(1).to_string().len();
        for y in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|x| match self.get(Cell::new(x, y)) {
                    Occupant::Occupied(p) => format!("{:>width$}", p, width = width),
                    Occupant::Empty => format!("{:>width$}", ".", width = width),
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
