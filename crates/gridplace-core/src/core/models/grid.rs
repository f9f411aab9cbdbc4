use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GridError {
    #[error("Cannot size a grid for zero points")]
    NoPoints,

    #[error("Canvas width must be a positive, finite number of pixels (got {0})")]
    InvalidCanvasWidth(f64),
}

/// A grid location. `x` indexes columns and `y` indexes rows, both starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, in cell units.
    #[inline]
    pub fn distance(&self, other: &Cell) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(usize, usize)> for Cell {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// The square lattice the points are placed on.
///
/// `size` is the number of cells along each side and `cell_width` is the side length of a single
/// cell in canvas pixels. Both are derived once per point set by [`Grid::for_points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Grid {
    pub size: usize,
    pub cell_width: u32,
}

impl Grid {
    /// Sizes the smallest square grid holding `n` points on a canvas `canvas_width` pixels wide.
    ///
    /// `size = ceil(sqrt(n))`, so `size * size >= n` always holds and an injective placement is
    /// constructible. `cell_width = round(canvas_width / size)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoPoints`] for `n == 0` and [`GridError::InvalidCanvasWidth`] when the
    /// width is not a positive finite number.
    pub fn for_points(n: usize, canvas_width: f64) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::NoPoints);
        }
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(GridError::InvalidCanvasWidth(canvas_width));
        }

        let size = Self::size_for(n);
        let cell_width = (canvas_width / size as f64).round() as u32;
        Ok(Self { size, cell_width })
    }

    /// Side length of the smallest square grid holding `n` cells.
    #[inline]
    pub fn size_for(n: usize) -> usize {
        ceil_sqrt(n)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    /// All cells of the grid, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |x| (0..self.size).map(move |y| Cell::new(x, y)))
    }

    /// Pixel coordinates of the center of `cell` on the canvas.
    pub fn pixel_center(&self, cell: Cell) -> (u64, u64) {
        let width = u64::from(self.cell_width);
        let half = (width + 1) / 2;
        (cell.x as u64 * width + half, cell.y as u64 * width + half)
    }
}

/// Smallest `s` with `s * s >= n`, computed without floating-point rounding errors.
fn ceil_sqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s.saturating_mul(s) < n {
        s += 1;
    }
    while s > 0 && (s - 1).saturating_mul(s - 1) >= n {
        s -= 1;
    }
    s
}
