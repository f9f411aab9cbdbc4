use crate::core::energy::term::EnergyTerm;
use crate::core::models::grid::{Cell, Grid};
use crate::core::models::placement::{Placement, PlacementError};
use crate::core::models::point_set::{Connection, PointId, PointSet, PointSetError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid point set: {0}")]
    PointSet(#[from] PointSetError),

    #[error("Invalid placement: {0}")]
    Placement(#[from] PlacementError),

    #[error("Cell records do not cover points 0..{points} exactly once (offending point {point})")]
    CellRecords { points: usize, point: PointId },

    #[error("Grid of size {grid_size} recorded for {points} points, expected size {expected}")]
    GridSize {
        points: usize,
        grid_size: usize,
        expected: usize,
    },
}

/// One placed point, with its pixel center when the grid's cell width is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CellRecord {
    pub point: PointId,
    pub x: usize,
    pub y: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_x: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_y: Option<u64>,
}

/// Informational energy summary written alongside a placement. Ignored when reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EnergyRecord {
    pub length: f64,
    pub collinearity: f64,
    pub total: f64,
}

/// A TOML layout document.
///
/// ```toml
/// points = 3
///
/// [grid]
/// size = 2
/// cell-width = 250
///
/// [[connections]]
/// from = 0
/// to = 1
///
/// [[cells]]
/// point = 0
/// x = 0
/// y = 0
/// ```
///
/// `grid` and `cells` are optional: a document with only `points` and `connections` describes an
/// unplaced point set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LayoutDocument {
    pub points: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<CellRecord>,
}

impl LayoutDocument {
    /// A document describing only the point set.
    pub fn from_point_set(point_set: &PointSet) -> Self {
        Self {
            points: point_set.len(),
            grid: None,
            energy: None,
            connections: point_set.connections().to_vec(),
            cells: Vec::new(),
        }
    }

    /// A document describing a placed point set, including pixel centers of every point.
    pub fn from_placement(point_set: &PointSet, grid: &Grid, placement: &Placement) -> Self {
        let cells = placement
            .iter()
            .map(|(point, cell)| {
                let (px, py) = grid.pixel_center(cell);
                CellRecord {
                    point,
                    x: cell.x,
                    y: cell.y,
                    pixel_x: Some(px),
                    pixel_y: Some(py),
                }
            })
            .collect();

        Self {
            grid: Some(*grid),
            cells,
            ..Self::from_point_set(point_set)
        }
    }

    pub fn with_energy(mut self, term: EnergyTerm, total: f64) -> Self {
        self.energy = Some(EnergyRecord {
            length: term.length,
            collinearity: term.collinearity,
            total,
        });
        self
    }

    pub fn point_set(&self) -> Result<PointSet, LayoutFileError> {
        Ok(PointSet::new(self.points, self.connections.clone())?)
    }

    /// The recorded placement, or `None` if the document carries no cells.
    pub fn placement(&self) -> Result<Option<Placement>, LayoutFileError> {
        if self.cells.is_empty() {
            return Ok(None);
        }

        let expected = Grid::size_for(self.points);
        let grid_size = match self.grid {
            Some(grid) if grid.size != expected => {
                return Err(LayoutFileError::GridSize {
                    points: self.points,
                    grid_size: grid.size,
                    expected,
                });
            }
            Some(grid) => grid.size,
            None => expected,
        };

        let mut cells: Vec<Option<Cell>> = vec![None; self.points];
        for record in &self.cells {
            let slot = cells
                .get_mut(record.point)
                .filter(|slot| slot.is_none())
                .ok_or(LayoutFileError::CellRecords {
                    points: self.points,
                    point: record.point,
                })?;
            *slot = Some(Cell::new(record.x, record.y));
        }
        let cells = cells
            .into_iter()
            .enumerate()
            .map(|(point, cell)| {
                cell.ok_or(LayoutFileError::CellRecords {
                    points: self.points,
                    point,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Placement::from_cells(cells, grid_size)?))
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self, LayoutFileError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), LayoutFileError> {
        let content = toml::to_string(self)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LayoutFileError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), LayoutFileError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> PointSet {
        PointSet::new(
            4,
            vec![
                Connection::new(0, 1),
                Connection::new(1, 2),
                Connection::new(2, 3),
                Connection::new(3, 0),
            ],
        )
        .unwrap()
    }

    fn square() -> Placement {
        Placement::from_cells(
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(0, 1),
            ],
            2,
        )
        .unwrap()
    }

    #[test]
    fn reads_point_set_without_cells() {
        let content = r#"
            points = 3

            [[connections]]
            from = 0
            to = 1

            [[connections]]
            from = 2
            to = 1
        "#;
        let doc = LayoutDocument::read_from(&mut content.as_bytes()).unwrap();
        let set = doc.point_set().unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.connections()[1], Connection::new(2, 1));
        assert!(doc.placement().unwrap().is_none());
    }

    #[test]
    fn reads_cells_in_any_order() {
        let content = r#"
            points = 2

            [[cells]]
            point = 1
            x = 1
            y = 1

            [[cells]]
            point = 0
            x = 0
            y = 1
        "#;
        let doc = LayoutDocument::read_from(&mut content.as_bytes()).unwrap();
        let placement = doc.placement().unwrap().unwrap();

        assert_eq!(placement.grid_size(), 2);
        assert_eq!(placement.cell(0), Cell::new(0, 1));
        assert_eq!(placement.cell(1), Cell::new(1, 1));
    }

    #[test]
    fn rejects_missing_cell_record() {
        let content = r#"
            points = 2

            [[cells]]
            point = 0
            x = 0
            y = 0
        "#;
        let doc = LayoutDocument::read_from(&mut content.as_bytes()).unwrap();
        assert!(matches!(
            doc.placement(),
            Err(LayoutFileError::CellRecords { point: 1, .. })
        ));
    }

    #[test]
    fn rejects_invalid_connections() {
        let content = r#"
            points = 2

            [[connections]]
            from = 0
            to = 0
        "#;
        let doc = LayoutDocument::read_from(&mut content.as_bytes()).unwrap();
        assert!(matches!(
            doc.point_set(),
            Err(LayoutFileError::PointSet(PointSetError::SelfLoop(0)))
        ));
    }

    #[test]
    fn rejects_unknown_fields() {
        let content = "points = 2\ncolour = \"red\"\n";
        assert!(matches!(
            LayoutDocument::read_from(&mut content.as_bytes()),
            Err(LayoutFileError::Parse(_))
        ));
    }

    #[test]
    fn rejects_inconsistent_grid_size() {
        let content = r#"
            points = 2

            [grid]
            size = 3
            cell-width = 10

            [[cells]]
            point = 0
            x = 0
            y = 0

            [[cells]]
            point = 1
            x = 2
            y = 2
        "#;
        let doc = LayoutDocument::read_from(&mut content.as_bytes()).unwrap();
        assert!(matches!(
            doc.placement(),
            Err(LayoutFileError::GridSize { expected: 2, .. })
        ));
    }

    #[test]
    fn written_placement_can_be_read_back_from_file() {
        let set = cycle();
        let grid = Grid::for_points(4, 500.0).unwrap();
        let doc = LayoutDocument::from_placement(&set, &grid, &square())
            .with_energy(EnergyTerm::new(4.0, 0.0), 4.0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        doc.write_to_path(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("cell-width = 250"));
        assert!(content.contains("pixel-x = 375"));

        let read = LayoutDocument::read_from_path(&path).unwrap();
        assert_eq!(read.point_set().unwrap(), set);
        assert_eq!(read.placement().unwrap(), Some(square()));
        assert_eq!(read.energy.map(|e| e.total), Some(4.0));
    }
}
